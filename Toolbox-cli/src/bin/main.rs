use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use tracing::debug;

use toolbox_cli::{logging, output, run, Cli};

/// The main entry point for the toolbox command line
///
/// This function:
/// 1. Loads environment variables from a .env file when present
/// 2. Parses arguments (flags fall back to environment variables)
/// 3. Sets up tracing on stderr
/// 4. Runs the command and prints its outcome or failure notice
#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let dotenv_loaded = dotenv().is_ok();

    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    if !dotenv_loaded {
        debug!(".env file not found or couldn't be read. Using environment variables.");
    }

    match run(&cli).await {
        Ok(outcome) => {
            output::print_outcome(&outcome).context("failed to write command output")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            debug!("Command failed: {:?}", e);
            output::print_failure(&e.notice()).context("failed to write error output")?;
            Ok(ExitCode::FAILURE)
        }
    }
}
