//! Task records supplied by the host application.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::filter::{FieldValue, FilterRecord, FilterableField};

/// Task priority level.
///
/// Levels map onto the ordinal scale `low = 1`, `medium = 2`, `high = 3`,
/// which is what filter comparisons operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Returns the ordinal rank of this priority.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    /// Returns the lowercase name of this priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Looks up a priority by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task as handed to the filter engine.
///
/// Timestamps are kept in their ISO-8601 string form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Task identifier.
    #[serde(default)]
    pub id: String,

    /// Task title.
    #[serde(default)]
    pub title: String,

    /// Whether the task is completed.
    #[serde(default)]
    pub done: bool,

    /// Priority level, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    /// Completion progress.
    #[serde(default)]
    pub percent_done: f64,

    /// Due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    /// Start date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    /// End date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    /// When the task was completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_at: Option<String>,

    /// Assignee identifiers.
    #[serde(default)]
    pub assignees: Vec<String>,

    /// Label identifiers.
    #[serde(default)]
    pub labels: Vec<String>,

    /// Owning project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Reminder timestamps.
    #[serde(default)]
    pub reminders: Vec<String>,

    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

impl FilterRecord for TaskRecord {
    fn field_value(&self, field: FilterableField) -> FieldValue {
        match field {
            FilterableField::Done => FieldValue::Bool(self.done),
            FilterableField::Priority => self
                .priority
                .map_or(FieldValue::Null, |p| FieldValue::Number(f64::from(p.rank()))),
            FilterableField::PercentDone => FieldValue::Number(self.percent_done),
            FilterableField::DueDate => FieldValue::text_or_null(self.due_date.as_deref()),
            FilterableField::StartDate => FieldValue::text_or_null(self.start_date.as_deref()),
            FilterableField::EndDate => FieldValue::text_or_null(self.end_date.as_deref()),
            FilterableField::DoneAt => FieldValue::text_or_null(self.done_at.as_deref()),
            FilterableField::Assignees => FieldValue::List(self.assignees.clone()),
            FilterableField::Labels => FieldValue::List(self.labels.clone()),
            FilterableField::Project => FieldValue::text_or_null(self.project.as_deref()),
            FilterableField::Reminders => FieldValue::List(self.reminders.clone()),
            FilterableField::Created => FieldValue::text_or_null(self.created.as_deref()),
            FilterableField::Updated => FieldValue::text_or_null(self.updated.as_deref()),
        }
    }
}
