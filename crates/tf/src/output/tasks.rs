//! Task list output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;
use task_filter_rs::filter::FilterError;
use task_filter_rs::TaskRecord;

use super::helpers::{
    format_done, format_due, format_labels, format_priority, truncate_id, truncate_str,
};

/// JSON output for a filtered task list.
#[derive(Serialize)]
pub struct ListOutput<'a> {
    /// The filter that was applied, if any.
    pub filter: Option<&'a str>,
    /// Set when the filter failed to parse and every task was kept.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_error: Option<FilterErrorOutput>,
    /// Number of tasks before filtering.
    pub total: usize,
    /// Number of tasks that matched, before the limit.
    pub matched: usize,
    pub tasks: &'a [&'a TaskRecord],
}

/// JSON output for a filter error.
#[derive(Serialize)]
pub struct FilterErrorOutput {
    pub message: String,
    pub position: usize,
}

impl From<&FilterError> for FilterErrorOutput {
    fn from(err: &FilterError) -> Self {
        Self {
            message: err.message(),
            position: err.position(),
        }
    }
}

/// Formats a task list as JSON.
pub fn format_tasks_json(output: &ListOutput<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(output)
}

/// Formats tasks as a table.
pub fn format_tasks_table(tasks: &[&TaskRecord], iso_dates: bool, use_colors: bool) -> String {
    if tasks.is_empty() {
        return "No tasks found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!(
        "{:<8} {:<1} {:<6} {:<12} {:<15} {:<15} {}",
        "ID", "", "Pri", "Due", "Project", "Labels", "Title"
    );
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for task in tasks {
        let line = format!(
            "{:<8} {:<1} {:<6} {:<12} {:<15} {:<15} {}",
            truncate_id(&task.id),
            format_done(task.done, use_colors),
            format_priority(task.priority, use_colors),
            format_due(task.due_date.as_deref(), iso_dates, use_colors),
            task.project
                .as_deref()
                .map(|p| truncate_str(p, 15))
                .unwrap_or_default(),
            format_labels(&task.labels, 15),
            task.title
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

/// Summary line printed under the table, e.g. "3 of 12 tasks".
pub fn format_summary(shown: usize, matched: usize, total: usize) -> String {
    if shown < matched {
        format!("{shown} of {matched} matching tasks shown ({total} total)\n")
    } else {
        format!("{matched} of {total} tasks\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use task_filter_rs::Priority;

    fn sample() -> Vec<TaskRecord> {
        vec![
            TaskRecord {
                id: "task-0001-long-id".to_string(),
                title: "Write release notes".to_string(),
                priority: Some(Priority::High),
                labels: vec!["docs".to_string()],
                project: Some("Release".to_string()),
                ..TaskRecord::default()
            },
            TaskRecord {
                id: "2".to_string(),
                title: "Archive old tickets".to_string(),
                done: true,
                ..TaskRecord::default()
            },
        ]
    }

    #[test]
    fn test_table_empty() {
        assert_eq!(format_tasks_table(&[], false, false), "No tasks found.\n");
    }

    #[test]
    fn test_table_rows() {
        let tasks = sample();
        let refs: Vec<&TaskRecord> = tasks.iter().collect();
        let table = format_tasks_table(&refs, false, false);

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].starts_with("task-000"));
        assert!(lines[1].contains("high"));
        assert!(lines[1].contains("@docs"));
        assert!(lines[1].ends_with("Write release notes"));
        assert!(lines[2].contains(" x "));
    }

    #[test]
    fn test_json_output_shape() {
        let tasks = sample();
        let refs: Vec<&TaskRecord> = tasks.iter().collect();
        let output = ListOutput {
            filter: Some("done = true"),
            filter_error: None,
            total: 2,
            matched: 2,
            tasks: &refs,
        };

        let json: serde_json::Value =
            serde_json::from_str(&format_tasks_json(&output).unwrap()).unwrap();
        assert_eq!(json["filter"], "done = true");
        assert_eq!(json["total"], 2);
        assert_eq!(json["tasks"][0]["priority"], "high");
        assert!(json.get("filter_error").is_none());
    }

    #[test]
    fn test_json_output_with_error() {
        let err = FilterError::UnclosedParenthesis { position: 4 };
        let output = ListOutput {
            filter: Some("(done = true"),
            filter_error: Some(FilterErrorOutput::from(&err)),
            total: 0,
            matched: 0,
            tasks: &[],
        };

        let json: serde_json::Value =
            serde_json::from_str(&format_tasks_json(&output).unwrap()).unwrap();
        assert_eq!(json["filter_error"]["position"], 4);
        assert_eq!(json["filter_error"]["message"], "unclosed parenthesis");
    }

    #[test]
    fn test_summary() {
        assert_eq!(format_summary(3, 3, 10), "3 of 10 tasks\n");
        assert_eq!(
            format_summary(2, 5, 10),
            "2 of 5 matching tasks shown (10 total)\n"
        );
    }
}
