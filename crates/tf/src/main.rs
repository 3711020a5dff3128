use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod config;
mod dispatch;
mod output;

use cli::{Cli, Commands};
use commands::{CommandContext, CommandError};
use config::Config;
use dispatch::{LocalCommand, LocalDispatch, TaskCommand, TaskDispatch};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                match serde_json::to_string_pretty(&error_json) {
                    Ok(text) => eprintln!("{text}"),
                    Err(_) => eprintln!("Error: {e}"),
                }
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins; otherwise `--verbose` enables debug output and the
/// default shows warnings only.
fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: &Cli) -> commands::Result<()> {
    // A broken config file must not lock the user out of `tf config`
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) if matches!(cli.command, Some(Commands::Config { .. })) => {
            tracing::warn!(error = %e, "ignoring unreadable config");
            Config::default()
        }
        Err(e) => return Err(e),
    };
    let ctx = CommandContext::from_cli(cli, &config);

    if let Some(dispatch) = LocalDispatch::try_from_cli(cli) {
        return dispatch.execute(&ctx);
    }

    if let Some(dispatch) = TaskDispatch::from_cli(cli, &config) {
        let tasks = commands::load_tasks(cli, &config).await?;
        return dispatch.execute(&ctx, &tasks);
    }

    Ok(())
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Store(_) => "TASK_FILE_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the process exit status for an error.
fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Filter(_) | CommandError::Json(_) => 1,
        CommandError::Io(_) => 3,
        CommandError::Config(_) | CommandError::Store(_) => 5,
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    ExitCode::from(exit_status(e))
}
