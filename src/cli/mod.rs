// Command-line interface
//
// `analyze`, `check` and `merge` are one-shot; `refine` runs the
// interactive loop.

pub mod commands;
pub mod render;
pub mod repl;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use crate::assessment::{local_enriched_analysis, ActionLibrary, AnalysisEnricher, Analyzer};
use crate::brief::{changed_fields, merge_briefs, poor_fields, Brief};
use crate::claude::ClaudeClient;
use crate::config::{config_dir, Config};
use crate::criteria::CriteriaCatalog;
use crate::generators::{ClaudeGenerator, Generator};
use crate::logging::RoundLogger;
use crate::refinement::{GeneratorProposer, RefinementSession, SessionHandle, SessionSettings};
use crate::storage::{BriefMetadata, BriefStore, FileBriefStore};

#[derive(Parser, Debug)]
#[command(name = "briefsmith")]
#[command(about = "Score, plan and refine creative briefs")]
#[command(version)]
pub struct Cli {
    /// Config file (default: ~/.briefsmith/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Score every section and print the action plan
    Analyze {
        file: PathBuf,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
        /// Add a narrative analysis from the model (falls back to a local one)
        #[arg(long)]
        enrich: bool,
    },
    /// Exit non-zero unless every core section has substance
    Check { file: PathBuf },
    /// Merge an improved brief into an original without losing content
    Merge { original: PathBuf, improved: PathBuf },
    /// Build or improve a brief through a guided conversation
    Refine {
        /// Starting brief (default: empty)
        file: Option<PathBuf>,
        /// Source material (notes, call transcript) for the model to draw on
        #[arg(long)]
        source: Option<PathBuf>,
        /// Save the final brief to the brief store
        #[arg(long)]
        save: bool,
    },
}

pub fn read_brief(path: &Path) -> Result<Brief> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Brief::from_json_str(&text).with_context(|| format!("{} is not a valid brief", path.display()))
}

fn analyzer_for(config: &Config) -> Analyzer {
    Analyzer::new(
        Arc::new(CriteriaCatalog::standard()),
        Arc::new(ActionLibrary::standard()),
        config.analysis.max_priority_actions,
    )
}

fn build_generator(config: &Config) -> Result<Arc<dyn Generator>> {
    let Some(api_key) = config.provider.api_key.clone() else {
        bail!(
            "No API key configured.\n\n\
             Set ANTHROPIC_API_KEY, or add api_key under [provider] in ~/.briefsmith/config.toml"
        );
    };
    let client = ClaudeClient::with_base_url(api_key, &config.provider.base_url)?;
    Ok(Arc::new(ClaudeGenerator::new(
        Arc::new(client),
        config.provider.model.clone(),
        config.provider.max_tokens,
    )))
}

pub async fn run(cli: Cli, config: Config) -> Result<ExitCode> {
    match cli.command {
        CliCommand::Analyze { file, json, enrich } => analyze(&config, &file, json, enrich).await,
        CliCommand::Check { file } => check(&file),
        CliCommand::Merge { original, improved } => merge(&original, &improved),
        CliCommand::Refine { file, source, save } => {
            refine(&config, file.as_deref(), source.as_deref(), save).await
        }
    }
}

async fn analyze(config: &Config, file: &Path, json: bool, enrich: bool) -> Result<ExitCode> {
    let brief = read_brief(file)?;
    let report = analyzer_for(config).analyze(&brief);

    let enriched = if enrich || config.analysis.enrichment_enabled {
        let analysis = match build_generator(config) {
            Ok(generator) => AnalysisEnricher::new(generator).enrich(&brief, &report).await,
            Err(e) => {
                tracing::warn!("Enrichment unavailable, using local analysis: {:#}", e);
                local_enriched_analysis(&report)
            }
        };
        Some(analysis)
    } else {
        None
    };

    if json {
        let output = serde_json::json!({
            "report": &*report,
            "enriched": enriched,
        });
        println!("{}", serde_json::to_string_pretty(&output).context("Failed to serialize report")?);
    } else {
        println!("{}", render::render_report(&report));
        println!("{}", render::render_plan(&report.action_plan));
        if let Some(analysis) = &enriched {
            println!("{}", render::render_enriched(analysis));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn check(file: &Path) -> Result<ExitCode> {
    let brief = read_brief(file)?;
    let poor = poor_fields(&brief);
    println!("{}", render::render_completeness(&poor));
    Ok(if poor.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn merge(original: &Path, improved: &Path) -> Result<ExitCode> {
    let original = read_brief(original)?;
    let improved = read_brief(improved)?;
    let merged = merge_briefs(&original, &improved);

    eprintln!("{}", render::render_changes(&changed_fields(&original, &merged)));
    println!("{}", merged.to_pretty_json());
    Ok(ExitCode::SUCCESS)
}

async fn refine(config: &Config, file: Option<&Path>, source: Option<&Path>, save: bool) -> Result<ExitCode> {
    let brief = match file {
        Some(path) => read_brief(path)?,
        None => Brief::new(),
    };

    let generator = build_generator(config)?;
    let proposer = Arc::new(GeneratorProposer::new(generator));
    let mut session = RefinementSession::new(brief, proposer, SessionSettings::from(&config.refinement))
        .with_analyzer(analyzer_for(config));

    if let Some(path) = source {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read source {}", path.display()))?;
        session = session.with_source_transcript(text);
    }
    if let Some(path) = &config.logging.round_log {
        session = session.with_round_logger(RoundLogger::new(path.clone())?);
    }

    let session_id = session.id().to_string();
    let brief = repl::run_refine_loop(SessionHandle::new(session)).await?;

    let report = analyzer_for(config).analyze(&brief);
    println!("{}", render::render_report(&report));

    if save {
        let store = FileBriefStore::new(config.storage_dir(&config_dir()?))?;
        let mut metadata = BriefMetadata::new();
        metadata.insert("session".to_string(), session_id);
        if let Some(path) = file {
            metadata.insert("source_file".to_string(), path.display().to_string());
        }
        let id = store.save(&brief, metadata)?;
        println!("Saved brief {} to {}", id, store.dir().display());
    } else {
        println!("{}", brief.to_pretty_json());
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_refine_flags() {
        let cli = Cli::parse_from(["briefsmith", "refine", "brief.json", "--source", "notes.txt", "--save"]);
        match cli.command {
            CliCommand::Refine { file, source, save } => {
                assert_eq!(file, Some(PathBuf::from("brief.json")));
                assert_eq!(source, Some(PathBuf::from("notes.txt")));
                assert!(save);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_read_brief_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[1,2]").unwrap();
        let err = read_brief(&path).unwrap_err();
        assert!(format!("{err:#}").contains("bad.json"));
    }

    #[test]
    fn test_check_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brief.json");
        std::fs::write(&path, r#"{"title": "Spring Refresh 2025"}"#).unwrap();
        assert_eq!(check(&path).unwrap(), ExitCode::FAILURE);
    }

    #[test]
    fn test_generator_requires_api_key() {
        let config = Config::default();
        assert!(build_generator(&config).is_err());
    }
}
