// Round logger for refinement sessions

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundOutcome {
    Asked,
    Completed,
    Recovered,
    Discarded,
}

/// A single logged refinement round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundLogEntry {
    /// Unique ID for this entry
    pub id: String,

    pub timestamp: DateTime<Utc>,

    pub session_id: String,

    /// Question the user was answering
    pub question: String,

    pub answer: String,

    pub outcome: RoundOutcome,

    /// Top-level brief keys changed by the merge
    #[serde(default)]
    pub changed_fields: Vec<String>,

    /// Error text for recovered rounds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RoundLogEntry {
    pub fn new(session_id: &str, question: &str, answer: &str, outcome: RoundOutcome) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            session_id: session_id.to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            outcome,
            changed_fields: Vec::new(),
            error: None,
        }
    }

    pub fn with_changes(mut self, changed_fields: Vec<String>) -> Self {
        self.changed_fields = changed_fields;
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// Appends one JSON line per round. Rounds are rare, so nothing is buffered.
#[derive(Debug, Clone)]
pub struct RoundLogger {
    log_path: PathBuf,
}

impl RoundLogger {
    pub fn new(log_path: PathBuf) -> Result<Self> {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create logging directory")?;
        }
        Ok(Self { log_path })
    }

    pub fn log_round(&self, entry: &RoundLogEntry) -> Result<()> {
        let json = serde_json::to_string(entry).context("Failed to serialize round log entry")?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .context("Failed to open round log file")?;
        writeln!(file, "{}", json).context("Failed to write round log entry")?;

        debug!("Logged round {} ({:?})", entry.id, entry.outcome);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Read every entry back, skipping blank lines
    pub fn read_entries(&self) -> Result<Vec<RoundLogEntry>> {
        let contents = std::fs::read_to_string(&self.log_path).context("Failed to read round log file")?;
        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).context("Failed to parse round log entry"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_log_and_read_back() {
        let dir = tempdir().unwrap();
        let logger = RoundLogger::new(dir.path().join("logs/rounds.jsonl")).unwrap();

        let first = RoundLogEntry::new("s1", "Who is it for?", "Parents of toddlers", RoundOutcome::Asked)
            .with_changes(vec!["targetAudience".to_string()]);
        let second = RoundLogEntry::new("s1", "Budget?", "10k", RoundOutcome::Recovered)
            .with_error("could not parse collaborator response: eof");
        logger.log_round(&first).unwrap();
        logger.log_round(&second).unwrap();

        let entries = logger.read_entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].changed_fields, vec!["targetAudience"]);
        assert_eq!(entries[1].outcome, RoundOutcome::Recovered);
        assert!(entries[1].error.is_some());
        assert_ne!(entries[0].id, entries[1].id);
    }

    #[test]
    fn test_entries_are_single_lines() {
        let dir = tempdir().unwrap();
        let logger = RoundLogger::new(dir.path().join("rounds.jsonl")).unwrap();
        let entry = RoundLogEntry::new("s", "Q?", "line one\nline two", RoundOutcome::Completed);
        logger.log_round(&entry).unwrap();

        let contents = std::fs::read_to_string(logger.path()).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.contains("\"outcome\":\"completed\""));
    }
}
