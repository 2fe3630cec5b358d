//! mxl2ics CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use mxl2ics_cli::cli::{Cli, Command, ConfigAction};
use mxl2ics_cli::commands;
use mxl2ics_cli::config::AppConfig;
use mxl2ics_cli::error::{CliError, CliResult};
use mxl2ics_core::{SystemClock, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = match cli.config {
        Some(ref path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .map_err(CliError::Config)?;

    init_tracing(cli.tracing_config(&config)?)?;

    match cli.command {
        Command::Convert { input, output } => {
            commands::convert::run(&input, output.as_deref(), &SystemClock)
        }
        Command::Serve {
            bind,
            max_body_bytes,
        } => commands::serve::run(&config, bind, max_body_bytes).await,
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
