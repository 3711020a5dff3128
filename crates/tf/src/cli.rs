//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the tf CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// tf - Filter task lists with boolean query expressions
#[derive(Parser, Debug)]
#[command(name = "tf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Task file to read (default: from config, then the XDG data dir)
    #[arg(short, long, global = true, env = "TF_TASKS_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tasks matching a filter
    #[command(alias = "l")]
    List {
        /// Filter expression (e.g., "priority = high && done = false")
        #[arg(short = 'F', long)]
        filter: Option<String>,

        /// Fail on an invalid filter instead of listing every task
        #[arg(long)]
        strict: bool,

        /// Sort by field
        #[arg(long, value_enum)]
        sort: Option<SortField>,

        /// Reverse sort order
        #[arg(long)]
        reverse: bool,

        /// Limit results (default: from config, else 50)
        #[arg(long)]
        limit: Option<u32>,

        /// Show all tasks (no limit)
        #[arg(long)]
        all: bool,
    },

    /// Parse a filter and print its expression tree
    #[command(alias = "c")]
    Check {
        /// Filter expression
        expression: String,

        /// Also print the token stream
        #[arg(long)]
        tokens: bool,
    },

    /// Edit a filter interactively and watch the result change
    #[command(alias = "i")]
    Interactive,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Sort fields for list command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortField {
    Due,
    Priority,
    Created,
    Title,
}

/// Supported shells for completions
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "filter.default")
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_with_filter() {
        let cli = Cli::try_parse_from(["tf", "list", "-F", "done = false", "--strict"]).unwrap();
        match cli.command {
            Some(Commands::List { filter, strict, .. }) => {
                assert_eq!(filter.as_deref(), Some("done = false"));
                assert!(strict);
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_list_alias_and_sort() {
        let cli = Cli::try_parse_from(["tf", "l", "--sort", "priority", "--reverse"]).unwrap();
        match cli.command {
            Some(Commands::List { sort, reverse, .. }) => {
                assert_eq!(sort, Some(SortField::Priority));
                assert!(reverse);
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_global_file_flag() {
        let cli = Cli::try_parse_from(["tf", "check", "done = true", "-f", "/tmp/t.json"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/t.json")));
    }

    #[test]
    fn test_interactive_alias() {
        let cli = Cli::try_parse_from(["tf", "i"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Interactive)));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["tf", "-q", "-v", "list"]).is_err());
    }

    #[test]
    fn test_config_set() {
        let cli = Cli::try_parse_from(["tf", "config", "set", "list.limit", "10"]).unwrap();
        match cli.command {
            Some(Commands::Config {
                command: Some(ConfigCommands::Set { key, value }),
            }) => {
                assert_eq!(key, "list.limit");
                assert_eq!(value, "10");
            }
            other => panic!("expected config set, got {other:?}"),
        }
    }
}
