//! List command implementation.
//!
//! Lists tasks from the task file, optionally narrowed by a filter expression.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use task_filter_rs::filter::{parse_instant, tokenize, FilterError, FilterEvaluator, FilterParser};
use task_filter_rs::TaskRecord;

use super::{CommandContext, CommandError, Result};
use crate::cli::SortField;
use crate::output::{
    format_filter_error, format_summary, format_tasks_json, format_tasks_table,
    FilterErrorOutput, ListOutput,
};

/// Options for the list command.
#[derive(Debug)]
pub struct ListOptions {
    /// Filter expression.
    pub filter: Option<String>,
    /// Fail on an invalid filter instead of falling back to every task.
    pub strict: bool,
    /// Sort field.
    pub sort: Option<SortField>,
    /// Reverse sort order.
    pub reverse: bool,
    /// Limit results.
    pub limit: u32,
    /// Show all tasks (no limit).
    pub all: bool,
}

/// The result of applying a filter query to a task list.
#[derive(Debug)]
pub struct FilterOutcome<'a> {
    /// The tasks to display.
    pub tasks: Vec<&'a TaskRecord>,
    /// The parse error, when the query was rejected and every task kept.
    pub error: Option<FilterError>,
}

/// Parses `query` with `now` pinned and evaluates it against every task.
///
/// An invalid query never narrows the list: the caller gets every task back
/// along with the error to report.
pub fn apply_filter<'a>(
    query: &str,
    tasks: &'a [TaskRecord],
    now: DateTime<Utc>,
) -> FilterOutcome<'a> {
    match FilterParser::parse_at(query, now) {
        Ok(expr) => FilterOutcome {
            tasks: FilterEvaluator::new(expr.as_ref()).filter_records(tasks),
            error: None,
        },
        Err(error) => FilterOutcome {
            tasks: tasks.iter().collect(),
            error: Some(error),
        },
    }
}

/// Executes the list command.
///
/// # Errors
///
/// Returns an error if the filter is invalid and `--strict` was given, or if
/// output serialization fails.
pub fn execute(ctx: &CommandContext, opts: &ListOptions, tasks: &[TaskRecord]) -> Result<()> {
    let query = opts.filter.as_deref().unwrap_or("");
    let outcome = apply_filter(query, tasks, ctx.now);

    if let Some(err) = &outcome.error {
        if opts.strict {
            return Err(CommandError::Filter(err.clone()));
        }
        if !ctx.json_output {
            eprint!(
                "{}",
                format_filter_error(err, &tokenize(query), ctx.use_colors)
            );
            eprintln!("Showing all tasks.");
        }
    }

    let matched = outcome.tasks.len();
    let items = sort_tasks(outcome.tasks, opts);
    let items = apply_limit(items, opts);

    tracing::debug!(
        total = tasks.len(),
        matched,
        shown = items.len(),
        "list filtered"
    );

    if ctx.json_output {
        let output = ListOutput {
            filter: opts.filter.as_deref(),
            filter_error: outcome.error.as_ref().map(FilterErrorOutput::from),
            total: tasks.len(),
            matched,
            tasks: &items,
        };
        println!("{}", format_tasks_json(&output)?);
    } else if !ctx.quiet {
        print!(
            "{}",
            format_tasks_table(&items, ctx.iso_dates, ctx.use_colors)
        );
        if !items.is_empty() {
            print!("{}", format_summary(items.len(), matched, tasks.len()));
        }
    }

    Ok(())
}

/// Orders `a` and `b`, placing missing values last.
fn missing_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.cmp(&b),
    }
}

/// Sorts tasks based on the provided options.
fn sort_tasks<'a>(mut tasks: Vec<&'a TaskRecord>, opts: &ListOptions) -> Vec<&'a TaskRecord> {
    if let Some(sort_field) = &opts.sort {
        match sort_field {
            SortField::Due => tasks.sort_by(|a, b| {
                missing_last(
                    a.due_date.as_deref().and_then(parse_instant),
                    b.due_date.as_deref().and_then(parse_instant),
                )
            }),
            SortField::Priority => tasks.sort_by(|a, b| {
                // Highest first
                missing_last(
                    a.priority.map(std::cmp::Reverse),
                    b.priority.map(std::cmp::Reverse),
                )
            }),
            SortField::Created => tasks.sort_by(|a, b| {
                missing_last(
                    a.created.as_deref().and_then(parse_instant),
                    b.created.as_deref().and_then(parse_instant),
                )
            }),
            SortField::Title => {
                tasks.sort_by_key(|t| t.title.to_lowercase());
            }
        }
    }

    if opts.reverse {
        tasks.reverse();
    }

    tasks
}

/// Applies the limit to the tasks.
fn apply_limit<'a>(tasks: Vec<&'a TaskRecord>, opts: &ListOptions) -> Vec<&'a TaskRecord> {
    if opts.all {
        tasks
    } else {
        tasks.into_iter().take(opts.limit as usize).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use task_filter_rs::Priority;

    fn options() -> ListOptions {
        ListOptions {
            filter: None,
            strict: false,
            sort: None,
            reverse: false,
            limit: 50,
            all: false,
        }
    }

    fn tasks() -> Vec<TaskRecord> {
        vec![
            TaskRecord {
                id: "1".into(),
                title: "beta".into(),
                priority: Some(Priority::Low),
                due_date: Some("2024-05-03".into()),
                ..TaskRecord::default()
            },
            TaskRecord {
                id: "2".into(),
                title: "Alpha".into(),
                priority: Some(Priority::High),
                done: true,
                ..TaskRecord::default()
            },
            TaskRecord {
                id: "3".into(),
                title: "gamma".into(),
                due_date: Some("2024-05-01T08:00:00Z".into()),
                ..TaskRecord::default()
            },
        ]
    }

    fn ids(tasks: &[&TaskRecord]) -> Vec<String> {
        tasks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_apply_filter_matches() {
        let tasks = tasks();
        let outcome = apply_filter("done = false", &tasks, Utc::now());
        assert!(outcome.error.is_none());
        assert_eq!(ids(&outcome.tasks), vec!["1", "3"]);
    }

    #[test]
    fn test_apply_filter_empty_query_keeps_all() {
        let tasks = tasks();
        let outcome = apply_filter("", &tasks, Utc::now());
        assert!(outcome.error.is_none());
        assert_eq!(outcome.tasks.len(), 3);
    }

    #[test]
    fn test_apply_filter_error_falls_back_to_all() {
        let tasks = tasks();
        let outcome = apply_filter("done = false &&", &tasks, Utc::now());
        assert!(matches!(
            outcome.error,
            Some(FilterError::UnexpectedEnd { position: 4 })
        ));
        assert_eq!(outcome.tasks.len(), 3);
    }

    #[test]
    fn test_apply_filter_pins_now() {
        let tasks = tasks();
        let may_2 = Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap();
        let april = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();

        assert_eq!(ids(&apply_filter("dueDate < now", &tasks, may_2).tasks), vec!["3"]);
        assert!(apply_filter("dueDate < now", &tasks, april).tasks.is_empty());
    }

    #[test]
    fn test_sort_by_due_missing_last() {
        let tasks = tasks();
        let opts = ListOptions {
            sort: Some(SortField::Due),
            ..options()
        };
        let sorted = sort_tasks(tasks.iter().collect(), &opts);
        assert_eq!(ids(&sorted), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_sort_by_priority_highest_first() {
        let tasks = tasks();
        let opts = ListOptions {
            sort: Some(SortField::Priority),
            ..options()
        };
        let sorted = sort_tasks(tasks.iter().collect(), &opts);
        assert_eq!(ids(&sorted), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_sort_by_title_reversed() {
        let tasks = tasks();
        let opts = ListOptions {
            sort: Some(SortField::Title),
            reverse: true,
            ..options()
        };
        let sorted = sort_tasks(tasks.iter().collect(), &opts);
        assert_eq!(ids(&sorted), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_apply_limit() {
        let tasks = tasks();
        let opts = ListOptions {
            limit: 2,
            ..options()
        };
        assert_eq!(apply_limit(tasks.iter().collect(), &opts).len(), 2);

        let opts = ListOptions {
            limit: 2,
            all: true,
            ..options()
        };
        assert_eq!(apply_limit(tasks.iter().collect(), &opts).len(), 3);
    }
}
