// Logging: tracing subscriber setup and the per-round JSONL log
//
// Diagnostics go to stderr through `tracing`. Refinement rounds can also be
// appended to a JSONL file for later review.

pub mod round_logger;

pub use round_logger::{RoundLogEntry, RoundLogger, RoundOutcome};

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. `RUST_LOG` wins over `debug`.
pub fn init(debug: bool) {
    let default_directive = if debug { "briefsmith=debug" } else { "briefsmith=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
