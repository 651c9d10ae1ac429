mod cli;
mod config;
mod error;
mod model;
mod providers;
mod report;
mod ui;
mod util;

use std::io;
use std::process::ExitCode;

use anyhow::{anyhow, Result};

use cli::{Command, Verbosity};
use config::BacklogConfig;
use providers::azure_devops::AzureDevOpsProvider;
use report::{BacklogReporter, Outcome};

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbosity = match cli::parse_args(&args) {
        Ok(Command::Help) => {
            cli::print_help();
            return ExitCode::SUCCESS;
        }
        Ok(Command::Report(verbosity)) => verbosity,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // .env never overrides variables that are already set
    dotenvy::dotenv().ok();

    if let Err(e) = init_tracing(verbosity) {
        eprintln!("{e}");
    }

    let file_config = match config::load_file_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable config file");
            config::FileConfig::default()
        }
    };

    // The provider can only be built from a complete BacklogConfig, so a
    // missing setting exits here before any request is made.
    let config = match BacklogConfig::from_env(&file_config) {
        Ok(cfg) => cfg,
        Err(e) => {
            print!("{}", config::missing_config_message(&e));
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = run(&config).await {
        println!("❌ Critical Error: {e}");
    }
    ExitCode::SUCCESS
}

async fn run(config: &BacklogConfig) -> Result<()> {
    let provider = AzureDevOpsProvider::new(config);
    let reporter = BacklogReporter::new(config, &provider);
    let mut stdout = io::stdout().lock();
    let outcome = reporter.run(&mut stdout).await?;
    match &outcome {
        Outcome::Listed(items) => tracing::debug!(rows = items.len(), "backlog rendered"),
        Outcome::NoOpenItems => tracing::debug!("backlog is empty"),
        Outcome::QueryFailed { status, body } => {
            tracing::debug!(status, %body, "backlog query rejected")
        }
    }
    Ok(())
}

fn init_tracing(verbosity: Verbosity) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("BACKLOG_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(verbosity.as_filter_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
