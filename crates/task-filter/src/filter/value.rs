//! Values extracted from records and the comparisons between them.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// The value of a record attribute, as seen by the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// The attribute is unset.
    Null,
    Bool(bool),
    Number(f64),
    /// Plain text, including ISO-8601 dates and timestamps.
    Text(String),
    /// A collection such as labels or assignees.
    List(Vec<String>),
}

impl FieldValue {
    /// Creates a text value from an optional string, mapping `None` to `Null`.
    pub fn text_or_null(value: Option<&str>) -> Self {
        value.map_or(FieldValue::Null, |s| FieldValue::Text(s.to_string()))
    }

    /// Returns true if the value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Returns the string form used by `like` and `in`.
    ///
    /// Lists join their elements with commas; `Null` has no string form.
    pub fn to_text(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Bool(b) => Some(b.to_string()),
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::List(items) => Some(items.join(",")),
        }
    }

    /// Strict equality: both values must be of the same kind and equal.
    pub fn strict_eq(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Number(a), FieldValue::Number(b)) => a == b,
            (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
            (FieldValue::List(a), FieldValue::List(b)) => a == b,
            _ => false,
        }
    }

    /// Equality that falls back to comparing string forms across kinds.
    pub fn loose_eq(&self, other: &FieldValue) -> bool {
        if self.strict_eq(other) {
            return true;
        }
        match (self.to_text(), other.to_text()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Orders two values for `>`, `>=`, `<` and `<=`.
    ///
    /// Returns `None` when either side is null or the kinds are not
    /// comparable. Text compares as instants when both sides parse as ISO
    /// dates, lexically otherwise.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Number(a), FieldValue::Number(b)) => a.partial_cmp(b),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => Some(a.cmp(b)),
            (FieldValue::Text(a), FieldValue::Text(b)) => {
                match (parse_instant(a), parse_instant(b)) {
                    (Some(a), Some(b)) => Some(a.cmp(&b)),
                    _ => Some(a.as_str().cmp(b.as_str())),
                }
            }
            _ => None,
        }
    }
}

/// Parses an ISO-8601 date or timestamp.
///
/// Accepts RFC 3339 (`2024-05-01T09:30:00Z`, with or without fractional
/// seconds or an offset), naive timestamps taken as UTC, and plain dates
/// taken as midnight UTC.
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
