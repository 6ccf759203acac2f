// Configuration structs

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::constants::*;

/// Language-model provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Falls back to `ANTHROPIC_API_KEY` when absent
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinementConfig {
    pub opening_question: String,
    /// Ask the model for a tailored opening question instead of the default
    pub ask_opening_question: bool,
    pub expected_questions: usize,
}

impl Default for RefinementConfig {
    fn default() -> Self {
        Self {
            opening_question: DEFAULT_OPENING_QUESTION.to_string(),
            ask_opening_question: false,
            expected_questions: DEFAULT_EXPECTED_QUESTIONS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub max_priority_actions: usize,
    /// Ask the model for a narrative analysis on top of the local scores
    pub enrichment_enabled: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_priority_actions: DEFAULT_MAX_PRIORITY_ACTIONS,
            enrichment_enabled: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub debug: bool,
    /// JSONL file receiving one entry per refinement round
    pub round_log: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub refinement: RefinementConfig,
    pub analysis: AnalysisConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.analysis.max_priority_actions == 0 {
            bail!("analysis.max_priority_actions must be at least 1");
        }
        if self.provider.max_tokens == 0 {
            bail!("provider.max_tokens must be at least 1");
        }
        if self.refinement.opening_question.trim().is_empty() {
            bail!("refinement.opening_question cannot be empty");
        }
        if self.provider.base_url.trim().is_empty() {
            bail!("provider.base_url cannot be empty");
        }
        if let Some(key) = &self.provider.api_key {
            if key.trim().is_empty() {
                bail!("provider.api_key is set but empty; remove it or set {API_KEY_ENV}");
            }
        }
        Ok(())
    }

    /// Fill a missing API key from the environment value, if any
    pub fn apply_env_api_key(&mut self, env_value: Option<String>) {
        if self.provider.api_key.is_none() {
            self.provider.api_key = env_value.filter(|k| !k.trim().is_empty());
        }
    }

    /// Where saved briefs go
    pub fn storage_dir(&self, config_dir: &std::path::Path) -> PathBuf {
        self.storage
            .dir
            .clone()
            .unwrap_or_else(|| config_dir.join(DEFAULT_STORAGE_SUBDIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.analysis.max_priority_actions, DEFAULT_MAX_PRIORITY_ACTIONS);
        assert!(!config.analysis.enrichment_enabled);
        assert!(!config.refinement.ask_opening_question);
        assert!(config.provider.api_key.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [provider]
            model = "claude-test"

            [analysis]
            max_priority_actions = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.provider.model, "claude-test");
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.analysis.max_priority_actions, 3);
        assert_eq!(config.refinement.expected_questions, DEFAULT_EXPECTED_QUESTIONS);
    }

    #[test]
    fn test_validation_rejects_zero_limits() {
        let mut config = Config::default();
        config.analysis.max_priority_actions = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.provider.max_tokens = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.refinement.opening_question = "   ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_key_only_fills_gaps() {
        let mut config = Config::default();
        config.apply_env_api_key(Some("sk-env".to_string()));
        assert_eq!(config.provider.api_key.as_deref(), Some("sk-env"));

        config.apply_env_api_key(Some("sk-other".to_string()));
        assert_eq!(config.provider.api_key.as_deref(), Some("sk-env"));

        let mut config = Config::default();
        config.apply_env_api_key(Some("  ".to_string()));
        assert!(config.provider.api_key.is_none());
    }

    #[test]
    fn test_storage_dir_default_and_override() {
        let base = std::path::Path::new("/home/u/.briefsmith");
        let mut config = Config::default();
        assert_eq!(config.storage_dir(base), base.join("briefs"));
        config.storage.dir = Some(PathBuf::from("/tmp/briefs"));
        assert_eq!(config.storage_dir(base), PathBuf::from("/tmp/briefs"));
    }
}
