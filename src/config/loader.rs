// Configuration loader
// Loads settings from ~/.briefsmith/config.toml, API key from the environment as fallback

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::constants::{API_KEY_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use super::settings::Config;

/// `~/.briefsmith`
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Load the user config, or defaults when no file exists
pub fn load_config() -> Result<Config> {
    let path = config_dir()?.join(CONFIG_FILE_NAME);

    let mut config = if path.exists() {
        read_config_file(&path)?
    } else {
        tracing::debug!("No config at {}; using defaults", path.display());
        Config::default()
    };

    finish(&mut config)?;
    Ok(config)
}

/// Load a specific config file. The file must exist.
pub fn load_config_from(path: &Path) -> Result<Config> {
    let mut config = read_config_file(path)?;
    finish(&mut config)?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn finish(config: &mut Config) -> Result<()> {
    config.apply_env_api_key(std::env::var(API_KEY_ENV).ok());
    config
        .validate()
        .context("Configuration validation failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [provider]
            api_key = "sk-file"
            base_url = "http://localhost:8080"

            [refinement]
            expected_questions = 4

            [logging]
            debug = true
            "#
        )
        .unwrap();

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.provider.api_key.as_deref(), Some("sk-file"));
        assert_eq!(config.provider.base_url, "http://localhost:8080");
        assert_eq!(config.refinement.expected_questions, 4);
        assert!(config.logging.debug);
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[provider\nmodel = ").unwrap();
        let err = load_config_from(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config file"));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[analysis]\nmax_priority_actions = 0").unwrap();
        let err = load_config_from(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("max_priority_actions"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config_from(&dir.path().join("nope.toml")).is_err());
    }
}
