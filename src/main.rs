// Briefsmith
// Main entry point

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use briefsmith::cli::{self, Cli};
use briefsmith::config::{load_config, load_config_from};
use briefsmith::logging;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    logging::init(cli.debug || config.logging.debug);
    tracing::debug!("Loaded configuration");

    cli::run(cli, config).await
}
