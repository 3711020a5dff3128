//! Output formatting utilities for the tf CLI.
//!
//! - [`tasks`] - Task list output formatting (table, JSON, summary line)
//! - [`filter`] - Expression trees, token listings and filter error reports
//! - [`helpers`] - Common formatting utilities (truncation, priority, due dates)

mod filter;
pub mod helpers;
mod tasks;

pub use filter::{
    format_error_marker, format_expression_tree, format_filter_error, format_tokens,
    tokens_output, CheckOutput,
};
pub use tasks::{
    format_summary, format_tasks_json, format_tasks_table, FilterErrorOutput, ListOutput,
};
