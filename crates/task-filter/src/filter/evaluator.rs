//! Filter evaluation against task records.
//!
//! This module provides the [`FilterEvaluator`] for evaluating parsed filter
//! expressions against anything implementing [`FilterRecord`].
//!
//! # Example
//!
//! ```
//! use task_filter_rs::filter::{FilterEvaluator, FilterParser};
//! use task_filter_rs::{Priority, TaskRecord};
//!
//! let expr = FilterParser::parse("priority >= medium && done = false").unwrap();
//!
//! let task = TaskRecord {
//!     id: "1".to_string(),
//!     title: "Write report".to_string(),
//!     priority: Some(Priority::High),
//!     ..TaskRecord::default()
//! };
//!
//! let evaluator = FilterEvaluator::new(expr.as_ref());
//! assert!(evaluator.matches(&task));
//! ```

use std::cmp::Ordering;

use super::ast::{
    FilterCondition, FilterExpression, FilterOperator, FilterValue, FilterableField,
    LogicalOperator,
};
use super::value::FieldValue;
use crate::record::Priority;

/// A record that filter expressions can be evaluated against.
///
/// Implementors map each whitelisted field to a [`FieldValue`]; the
/// evaluator never sees any other attribute.
pub trait FilterRecord {
    /// Returns the value of `field` for this record.
    fn field_value(&self, field: FilterableField) -> FieldValue;
}

impl<T: FilterRecord + ?Sized> FilterRecord for &T {
    fn field_value(&self, field: FilterableField) -> FieldValue {
        (**self).field_value(field)
    }
}

/// Evaluates a parsed filter against records.
///
/// A `None` expression is the empty filter and matches every record.
#[derive(Debug, Clone, Copy)]
pub struct FilterEvaluator<'a> {
    expression: Option<&'a FilterExpression>,
}

impl<'a> FilterEvaluator<'a> {
    /// Creates a new filter evaluator.
    pub fn new(expression: Option<&'a FilterExpression>) -> Self {
        Self { expression }
    }

    /// Returns true if the record matches the filter.
    pub fn matches<R: FilterRecord + ?Sized>(&self, record: &R) -> bool {
        match self.expression {
            Some(expr) => evaluate_expression(expr, record),
            None => true,
        }
    }

    /// Filters a slice of records, returning only those that match.
    pub fn filter_records<'b, R: FilterRecord>(&self, records: &'b [R]) -> Vec<&'b R> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }
}

/// Evaluates an optional filter expression against a single record.
///
/// `None` always evaluates to `true`.
pub fn evaluate_filter<R: FilterRecord + ?Sized>(
    expression: Option<&FilterExpression>,
    record: &R,
) -> bool {
    FilterEvaluator::new(expression).matches(record)
}

/// Evaluates an expression node against a record.
fn evaluate_expression<R: FilterRecord + ?Sized>(expr: &FilterExpression, record: &R) -> bool {
    match expr {
        FilterExpression::Condition(condition) => evaluate_condition(condition, record),
        FilterExpression::Logical { op, left, right } => match op {
            LogicalOperator::And => {
                evaluate_expression(left, record) && evaluate_expression(right, record)
            }
            LogicalOperator::Or => {
                evaluate_expression(left, record) || evaluate_expression(right, record)
            }
        },
    }
}

/// Applies a single condition to a record.
fn evaluate_condition<R: FilterRecord + ?Sized>(condition: &FilterCondition, record: &R) -> bool {
    let field = condition.field;
    let actual = record.field_value(field);

    match (condition.operator, &condition.value) {
        (FilterOperator::In, FilterValue::List(items)) => is_in(field, &actual, items),
        (FilterOperator::NotIn, FilterValue::List(items)) => !is_in(field, &actual, items),
        // A list outside in / not in cannot come out of the parser
        (_, FilterValue::List(_)) | (FilterOperator::In | FilterOperator::NotIn, _) => false,
        (FilterOperator::Eq, value) => actual.strict_eq(&literal(field, value)),
        (FilterOperator::NotEq, value) => !actual.strict_eq(&literal(field, value)),
        (FilterOperator::Gt, value) => ordered(&actual, &literal(field, value), Ordering::is_gt),
        (FilterOperator::Gte, value) => ordered(&actual, &literal(field, value), Ordering::is_ge),
        (FilterOperator::Lt, value) => ordered(&actual, &literal(field, value), Ordering::is_lt),
        (FilterOperator::Lte, value) => ordered(&actual, &literal(field, value), Ordering::is_le),
        (FilterOperator::Like, value) => is_like(&actual, value),
    }
}

/// Converts a condition literal to a comparable value for `field`.
///
/// Priority names are mapped onto the same ordinal scale as record
/// priorities so that ordering operators express ranking.
fn literal(field: FilterableField, value: &FilterValue) -> FieldValue {
    match value {
        FilterValue::Bool(b) => FieldValue::Bool(*b),
        FilterValue::Number(n) => FieldValue::Number(*n),
        FilterValue::String(s) => list_item(field, s),
        FilterValue::List(items) => FieldValue::List(items.clone()),
    }
}

/// Converts one element of an `in` list to a comparable value for `field`.
fn list_item(field: FilterableField, item: &str) -> FieldValue {
    if field == FilterableField::Priority {
        if let Some(priority) = Priority::from_name(item) {
            return FieldValue::Number(f64::from(priority.rank()));
        }
    }
    FieldValue::Text(item.to_string())
}

/// Ordering comparisons; false whenever either side is null.
fn ordered(actual: &FieldValue, expected: &FieldValue, accept: fn(Ordering) -> bool) -> bool {
    if actual.is_null() || expected.is_null() {
        return false;
    }
    actual.compare(expected).is_some_and(accept)
}

/// `like`: case-insensitive substring match on string forms.
///
/// A collection matches on its comma-joined form.
fn is_like(actual: &FieldValue, pattern: &FilterValue) -> bool {
    let needle = match pattern {
        FilterValue::String(s) => s.to_lowercase(),
        FilterValue::Number(n) => n.to_string(),
        FilterValue::Bool(b) => b.to_string(),
        FilterValue::List(_) => return false,
    };

    match actual {
        FieldValue::Null => false,
        other => other
            .to_text()
            .is_some_and(|text| text.to_lowercase().contains(&needle)),
    }
}

/// `in`: the list contains the string form of the record value.
///
/// A collection is compared by its comma-joined form, never element-wise.
fn is_in(field: FilterableField, actual: &FieldValue, items: &[String]) -> bool {
    match actual {
        FieldValue::Null => false,
        _ => items
            .iter()
            .any(|item| actual.loose_eq(&list_item(field, item))),
    }
}
