//! Common helper functions for output formatting.

use chrono::{DateTime, Local, NaiveDate};
use owo_colors::OwoColorize;
use task_filter_rs::filter::parse_instant;
use task_filter_rs::Priority;

/// Truncates an ID to 8 characters for display.
pub fn truncate_id(id: &str) -> String {
    truncate_chars(id, 8)
}

/// Truncates a string to a maximum length, marking the cut with "...".
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept = truncate_chars(s, max_len.saturating_sub(3));
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

fn truncate_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// Formats priority for display.
pub fn format_priority(priority: Option<Priority>, use_colors: bool) -> String {
    let Some(priority) = priority else {
        return String::new();
    };
    let label = priority.as_str();

    if use_colors {
        match priority {
            Priority::High => label.red().to_string(),
            Priority::Medium => label.yellow().to_string(),
            Priority::Low => label.dimmed().to_string(),
        }
    } else {
        label.to_string()
    }
}

/// Formats a due date for display.
///
/// Relative by default ("Today", "3 days ago"); `iso` keeps the stored string.
/// Unparseable dates are shown as-is.
pub fn format_due(due_date: Option<&str>, iso: bool, use_colors: bool) -> String {
    let Some(date_str) = due_date else {
        return String::new();
    };

    let Some(instant) = parse_instant(date_str) else {
        return date_str.to_string();
    };
    let today = Local::now().date_naive();
    let date = DateTime::<Local>::from(instant).date_naive();

    let display = if iso {
        date_str.to_string()
    } else {
        relative_day(date, today)
    };

    if use_colors {
        if date < today {
            display.red().to_string()
        } else if date == today {
            display.yellow().to_string()
        } else {
            display
        }
    } else {
        display
    }
}

/// Describes `date` relative to `today`.
fn relative_day(date: NaiveDate, today: NaiveDate) -> String {
    let days = (date - today).num_days();
    match days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        d if d < 0 => format!("{} days ago", -d),
        _ => date.format("%b %d").to_string(),
    }
}

/// Formats labels for display.
pub fn format_labels(labels: &[String], max_len: usize) -> String {
    if labels.is_empty() {
        return String::new();
    }

    let formatted: Vec<String> = labels.iter().map(|l| format!("@{l}")).collect();
    truncate_str(&formatted.join(" "), max_len)
}

/// Formats the completion marker.
pub fn format_done(done: bool, use_colors: bool) -> String {
    match (done, use_colors) {
        (true, true) => "x".green().to_string(),
        (true, false) => "x".to_string(),
        (false, _) => " ".to_string(),
    }
}
