//! sirius2usb - Download the most played tracks of SiriusXM channels

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, info};

mod catalog;
mod cli;
mod config;
mod download;
mod logging;
mod playlist;
mod sync;
mod utils;
mod xmplaylist;

use cli::Cli;
use config::RunConfig;
use sync::{ChannelOrchestrator, RunSummary};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        cli::commands::completion(shell);
        return ExitCode::SUCCESS;
    }

    let log_file = cli.log_file.clone().unwrap_or_else(logging::default_log_file);
    let _guard = match logging::init_logging(cli.debug, &log_file) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = RunConfig::from_cli(&cli);
    match run(&config, cli.debug).await {
        Ok(summary) => {
            cli::commands::print_summary(&summary, config.dispatch.execute);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("An error occurred: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &RunConfig, debug_enabled: bool) -> Result<RunSummary> {
    info!("Starting sirius2usb...");
    if debug_enabled {
        debug!("Debug mode enabled");
    }
    if !config.dispatch.execute {
        info!("Dry run: pass --download to write files");
    }

    let orchestrator = ChannelOrchestrator::from_config(config)?;
    Ok(orchestrator.run(&config.channels).await)
}
