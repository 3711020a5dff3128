//! Abstract Syntax Tree (AST) for filter expressions.

use std::fmt;

use serde::Serialize;

/// A task attribute that may appear on the left-hand side of a condition.
///
/// The set is closed: identifiers outside it are rejected by the parser, so
/// user input can never reach arbitrary record properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterableField {
    Done,
    Priority,
    PercentDone,
    DueDate,
    StartDate,
    EndDate,
    DoneAt,
    Assignees,
    Labels,
    Project,
    Reminders,
    Created,
    Updated,
}

impl FilterableField {
    /// Every filterable field, in display order.
    pub const ALL: [FilterableField; 13] = [
        FilterableField::Done,
        FilterableField::Priority,
        FilterableField::PercentDone,
        FilterableField::DueDate,
        FilterableField::StartDate,
        FilterableField::EndDate,
        FilterableField::DoneAt,
        FilterableField::Assignees,
        FilterableField::Labels,
        FilterableField::Project,
        FilterableField::Reminders,
        FilterableField::Created,
        FilterableField::Updated,
    ];

    /// Returns the name used for this field in filter expressions.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterableField::Done => "done",
            FilterableField::Priority => "priority",
            FilterableField::PercentDone => "percentDone",
            FilterableField::DueDate => "dueDate",
            FilterableField::StartDate => "startDate",
            FilterableField::EndDate => "endDate",
            FilterableField::DoneAt => "doneAt",
            FilterableField::Assignees => "assignees",
            FilterableField::Labels => "labels",
            FilterableField::Project => "project",
            FilterableField::Reminders => "reminders",
            FilterableField::Created => "created",
            FilterableField::Updated => "updated",
        }
    }

    /// Looks up a field by its exact (case-sensitive) name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for FilterableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FilterOperator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = "like")]
    Like,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "not in")]
    NotIn,
}

impl FilterOperator {
    /// Every operator, in display order.
    pub const ALL: [FilterOperator; 9] = [
        FilterOperator::Eq,
        FilterOperator::NotEq,
        FilterOperator::Gt,
        FilterOperator::Gte,
        FilterOperator::Lt,
        FilterOperator::Lte,
        FilterOperator::Like,
        FilterOperator::In,
        FilterOperator::NotIn,
    ];

    /// Returns the operator as written in filter expressions.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "=",
            FilterOperator::NotEq => "!=",
            FilterOperator::Gt => ">",
            FilterOperator::Gte => ">=",
            FilterOperator::Lt => "<",
            FilterOperator::Lte => "<=",
            FilterOperator::Like => "like",
            FilterOperator::In => "in",
            FilterOperator::NotIn => "not in",
        }
    }

    /// Looks up an operator by its symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == symbol)
    }

    /// Returns true for operators whose value is a list (`in`, `not in`).
    pub fn is_list(&self) -> bool {
        matches!(self, FilterOperator::In | FilterOperator::NotIn)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The literal on the right-hand side of a condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    String(String),
    List(Vec<String>),
    Number(f64),
    Bool(bool),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::String(s) => write!(f, "{s:?}"),
            FilterValue::List(items) => {
                let quoted: Vec<String> = items.iter().map(|i| format!("{i:?}")).collect();
                write!(f, "[{}]", quoted.join(", "))
            }
            FilterValue::Number(n) => write!(f, "{n}"),
            FilterValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// A single `field operator value` comparison; the leaf of the AST.
///
/// `value` is a [`FilterValue::List`] exactly when `operator` is `in` or
/// `not in`. The parser is the only producer of conditions and upholds this.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCondition {
    pub field: FilterableField,
    pub operator: FilterOperator,
    pub value: FilterValue,
}

/// Boolean connective joining two sub-expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOperator {
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "||")]
    Or,
}

impl LogicalOperator {
    /// Returns the connective as written in filter expressions.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "&&",
            LogicalOperator::Or => "||",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a parsed filter expression.
///
/// The tree is strictly binary and immutable once built. Parentheses only
/// affect parse order and leave no trace in the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterExpression {
    /// A leaf comparison.
    Condition(FilterCondition),

    /// Two sub-expressions joined by `&&` or `||`.
    Logical {
        #[serde(rename = "logical")]
        op: LogicalOperator,
        left: Box<FilterExpression>,
        right: Box<FilterExpression>,
    },
}

impl FilterExpression {
    /// Creates a condition leaf.
    ///
    /// # Example
    ///
    /// ```
    /// use task_filter_rs::filter::{FilterExpression, FilterableField, FilterOperator, FilterValue};
    ///
    /// let expr = FilterExpression::condition(
    ///     FilterableField::Done,
    ///     FilterOperator::Eq,
    ///     FilterValue::Bool(false),
    /// );
    /// assert!(matches!(expr, FilterExpression::Condition(_)));
    /// ```
    pub fn condition(field: FilterableField, operator: FilterOperator, value: FilterValue) -> Self {
        FilterExpression::Condition(FilterCondition {
            field,
            operator,
            value,
        })
    }

    /// Creates an `&&` node from two expressions.
    pub fn and(left: FilterExpression, right: FilterExpression) -> Self {
        FilterExpression::Logical {
            op: LogicalOperator::And,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Creates an `||` node from two expressions.
    pub fn or(left: FilterExpression, right: FilterExpression) -> Self {
        FilterExpression::Logical {
            op: LogicalOperator::Or,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl fmt::Display for FilterExpression {
    /// Renders the expression fully parenthesized, making grouping explicit.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterExpression::Condition(c) => {
                write!(f, "{} {} {}", c.field, c.operator, c.value)
            }
            FilterExpression::Logical { op, left, right } => {
                write!(f, "({left} {op} {right})")
            }
        }
    }
}
