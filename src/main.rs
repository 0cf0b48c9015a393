// ABOUTME: Main entry point for the colabond command-line agent

use anyhow::{Context as _, Result};
use clap::{CommandFactory, Parser};
use std::process::ExitCode;

use colabond::cli::Cli;
use colabond::commands::{self, Context};
use colabond::config::AppConfig;
use colabond::console;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        return ExitCode::FAILURE;
    };

    match run(command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {:#}", e);
            console::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(command: colabond::cli::Command) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let config = AppConfig::load(cwd)?;
    setup_logging(&config);

    let ctx = Context::new(config);
    commands::run(&ctx, command).await
}

fn setup_logging(config: &AppConfig) {
    use std::fs::OpenOptions;
    use tracing_subscriber::prelude::*;

    let log_dir = config.logs_dir();
    if std::fs::create_dir_all(&log_dir).is_err() {
        return;
    }

    let log_file = log_dir.join(format!(
        "colabond-{}.log",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    // Logging is best effort; the CLI works without it
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_file) else {
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(file)
                .with_ansi(false), // No ANSI colors in log file
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("colabond={}", config.settings.log_level).into()),
        )
        .init();
}
