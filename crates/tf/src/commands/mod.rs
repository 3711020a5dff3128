//! Command implementations for the tf CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod check;
pub mod completions;
pub mod config;
pub mod interactive;
pub mod list;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use task_filter_rs::{TaskRecord, TaskStore};

use crate::cli::Cli;
use crate::config::Config;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Filter parsing error.
    #[error("filter error: {0}")]
    Filter(#[from] task_filter_rs::filter::FilterError),

    /// Task file error.
    #[error("task file error: {0}")]
    Store(#[from] task_filter_rs::TaskStoreError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether dates render as ISO strings instead of relative days.
    pub iso_dates: bool,
    /// The instant `now` resolves to in filters parsed during this run.
    pub now: DateTime<Utc>,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments and configuration.
    ///
    /// Colors are on unless `--no-color`, `NO_COLOR`, or `output.color = false`
    /// says otherwise.
    pub fn from_cli(cli: &Cli, config: &Config) -> Self {
        let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && !no_color_env && config.output.color.unwrap_or(true),
            quiet: cli.quiet,
            iso_dates: config.output.date_format.as_deref() == Some("iso"),
            now: Utc::now(),
        }
    }
}

/// Resolves the task store: `--file` flag or env, then config, then the XDG default.
///
/// Returns the store and whether the path was given explicitly.
pub fn resolve_store(cli: &Cli, config: &Config) -> Result<(TaskStore, bool)> {
    if let Some(path) = &cli.file {
        return Ok((TaskStore::with_path(path.clone()), true));
    }
    if let Some(path) = &config.tasks_file {
        return Ok((TaskStore::with_path(PathBuf::from(path)), true));
    }
    Ok((TaskStore::new()?, false))
}

/// Loads task records for commands that evaluate filters.
///
/// An explicitly named file must exist; the default location may be absent,
/// in which case there are simply no tasks.
pub async fn load_tasks(cli: &Cli, config: &Config) -> Result<Vec<TaskRecord>> {
    let (store, explicit) = resolve_store(cli, config)?;
    tracing::debug!(path = %store.path().display(), explicit, "loading tasks");

    let tasks = if explicit {
        store.load_async().await?
    } else {
        store.load_or_default_async().await?
    };
    Ok(tasks)
}
