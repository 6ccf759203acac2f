// Project-wide constants
//
// Centralised here so defaults and other magic values have one source of
// truth. Import via `use crate::config::constants::*;`.

/// Directory under `$HOME` holding config, saved briefs and logs.
pub const CONFIG_DIR_NAME: &str = ".briefsmith";

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Saved briefs live here (under the config dir) unless `[storage] dir` is set.
pub const DEFAULT_STORAGE_SUBDIR: &str = "briefs";

pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default maximum tokens for model requests.
pub const DEFAULT_MAX_TOKENS: u32 = 8000;

pub const REQUEST_TIMEOUT_SECS: u64 = 60;
pub const RETRY_MAX_ATTEMPTS: u32 = 3;
pub const RETRY_BASE_DELAY_MS: u64 = 1000;

/// Length of the "do these next" list.
pub const DEFAULT_MAX_PRIORITY_ACTIONS: usize = 8;

/// Rounds shown as the progress denominator before the loop finishes.
/// Informational only; the model decides when to stop.
pub const DEFAULT_EXPECTED_QUESTIONS: usize = 6;

pub const DEFAULT_OPENING_QUESTION: &str =
    "What are you launching, who is it for, and what should it achieve?";
