//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands split by whether they need the task file: `list` and
//! `interactive` evaluate filters against loaded tasks, everything else runs
//! without touching it.

use task_filter_rs::TaskRecord;

use crate::cli::{Cli, Commands, ConfigCommands, Shell};
use crate::commands::{self, CommandContext, CommandError, Result};
use crate::config::Config;

/// Result limit when neither `--limit` nor `list.limit` is set.
const DEFAULT_LIMIT: u32 = 50;

/// Trait for commands that run without loading tasks.
pub trait LocalCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that evaluate filters against tasks.
pub trait TaskCommand {
    /// Execute the command against the loaded tasks.
    fn execute(&self, ctx: &CommandContext, tasks: &[TaskRecord]) -> Result<()>;
}

/// Commands that don't read the task file.
pub enum LocalDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(Shell),
    Check { expression: &'a str, tokens: bool },
    Help,
}

impl<'a> LocalDispatch<'a> {
    /// Try to create a local dispatch from the CLI command.
    /// Returns None if the command needs tasks.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(*shell)),
            Some(Commands::Check { expression, tokens }) => Some(Self::Check {
                expression,
                tokens: *tokens,
            }),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl LocalCommand for LocalDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(*shell).map_err(CommandError::Io)
            }
            Self::Check { expression, tokens } => {
                let opts = commands::check::CheckOptions {
                    expression: expression.to_string(),
                    tokens: *tokens,
                };
                commands::check::execute(ctx, &opts)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("tf - task filter CLI");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
    }
}

/// Commands that read the task file.
pub enum TaskDispatch {
    List(commands::list::ListOptions),
    Interactive {
        initial: Option<String>,
        limit: u32,
    },
}

impl TaskDispatch {
    /// Create a task dispatch from the CLI command, filling gaps from config.
    pub fn from_cli(cli: &Cli, config: &Config) -> Option<Self> {
        let configured_limit = config.list.limit.unwrap_or(DEFAULT_LIMIT);

        match &cli.command {
            Some(Commands::List {
                filter,
                strict,
                sort,
                reverse,
                limit,
                all,
            }) => Some(Self::List(commands::list::ListOptions {
                filter: filter.clone().or_else(|| config.filter.default.clone()),
                strict: *strict,
                sort: *sort,
                reverse: *reverse,
                limit: limit.unwrap_or(configured_limit),
                all: *all,
            })),
            Some(Commands::Interactive) => Some(Self::Interactive {
                initial: config.filter.default.clone(),
                limit: configured_limit,
            }),
            _ => None,
        }
    }
}

impl TaskCommand for TaskDispatch {
    fn execute(&self, ctx: &CommandContext, tasks: &[TaskRecord]) -> Result<()> {
        match self {
            Self::List(opts) => commands::list::execute(ctx, opts, tasks),
            Self::Interactive { initial, limit } => {
                commands::interactive::execute(ctx, tasks, initial.as_deref(), *limit as usize)
            }
        }
    }
}
