//! Interactive command implementation.
//!
//! A prompt loop for building a filter: every submitted line is parsed from
//! scratch and evaluated against the loaded tasks, so the view always reflects
//! exactly what was typed. The previous query is offered for editing.

use std::io::{self, IsTerminal};

use chrono::Utc;
use dialoguer::Input;
use owo_colors::OwoColorize;
use task_filter_rs::filter::tokenize;
use task_filter_rs::TaskRecord;

use super::list::apply_filter;
use super::{CommandContext, CommandError, Result};
use crate::output::{
    format_filter_error, format_summary, format_tasks_json, format_tasks_table,
    FilterErrorOutput, ListOutput,
};

/// Lines that end the session.
const EXIT_COMMANDS: [&str; 3] = [":q", "quit", "exit"];

/// Returns true if `line` asks to leave the prompt loop.
fn is_exit_command(line: &str) -> bool {
    EXIT_COMMANDS.contains(&line.trim())
}

/// Executes the interactive command.
///
/// `initial` seeds the prompt (usually the configured default filter) and
/// `limit` caps how many tasks are shown per evaluation.
///
/// # Errors
///
/// Returns an error if stdin is not a terminal or the prompt fails.
pub fn execute(
    ctx: &CommandContext,
    tasks: &[TaskRecord],
    initial: Option<&str>,
    limit: usize,
) -> Result<()> {
    if !io::stdin().is_terminal() {
        return Err(CommandError::Config(
            "Interactive mode needs a terminal. Use 'tf list --filter <EXPR>' instead."
                .to_string(),
        ));
    }

    if !ctx.quiet && !ctx.json_output {
        let intro = format!("{} tasks loaded. Enter a filter, or :q to quit.", tasks.len());
        if ctx.use_colors {
            println!("{}", intro.green());
        } else {
            println!("{intro}");
        }
    }

    let mut query = initial.unwrap_or_default().to_string();

    loop {
        let line = match Input::<String>::new()
            .with_prompt("filter")
            .with_initial_text(&query)
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(dialoguer::Error::IO(e))
                if matches!(
                    e.kind(),
                    io::ErrorKind::UnexpectedEof | io::ErrorKind::Interrupted
                ) =>
            {
                break;
            }
            Err(e) => return Err(CommandError::Io(io::Error::other(e.to_string()))),
        };

        if is_exit_command(&line) {
            break;
        }

        query = line;
        render(ctx, &query, tasks, limit)?;
    }

    Ok(())
}

/// Evaluates `query` and prints the resulting view.
///
/// `now` is taken fresh for every entered line.
fn render(ctx: &CommandContext, query: &str, tasks: &[TaskRecord], limit: usize) -> Result<()> {
    let outcome = apply_filter(query, tasks, Utc::now());
    let matched = outcome.tasks.len();
    let shown: Vec<&TaskRecord> = outcome.tasks.into_iter().take(limit).collect();

    tracing::debug!(query, matched, "interactive filter evaluated");

    if ctx.json_output {
        let output = ListOutput {
            filter: Some(query),
            filter_error: outcome.error.as_ref().map(FilterErrorOutput::from),
            total: tasks.len(),
            matched,
            tasks: &shown,
        };
        println!("{}", format_tasks_json(&output)?);
        return Ok(());
    }

    if let Some(err) = &outcome.error {
        eprint!(
            "{}",
            format_filter_error(err, &tokenize(query), ctx.use_colors)
        );
        eprintln!("Showing all tasks.");
    }

    if !ctx.quiet {
        print!(
            "{}",
            format_tasks_table(&shown, ctx.iso_dates, ctx.use_colors)
        );
        if !shown.is_empty() {
            print!("{}", format_summary(shown.len(), matched, tasks.len()));
        }
        println!();
    }

    Ok(())
}
