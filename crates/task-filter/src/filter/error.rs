//! Error types for the filter parser.

use thiserror::Error;

use super::ast::{FilterOperator, FilterableField};

/// A specialized Result type for filter parsing operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur during filter parsing.
///
/// Every variant records `position`, the index of the offending token in the
/// token stream. It is not a character offset into the query string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The left-hand side is not a filterable field.
    #[error("unknown field '{field}'{}; valid fields: {}", did_you_mean(.suggestion), valid_fields())]
    UnknownField {
        /// The unrecognized identifier.
        field: String,
        /// Index of the offending token.
        position: usize,
        /// A close match among the valid fields, if any.
        suggestion: Option<String>,
    },

    /// The token after a field is not a comparison operator.
    #[error("unknown operator '{operator}'; valid operators: {}", valid_operators())]
    UnknownOperator {
        /// The unrecognized operator token.
        operator: String,
        /// Index of the offending token.
        position: usize,
    },

    /// The query ended right after a field name.
    #[error("missing operator after '{field}'")]
    MissingOperator {
        /// The field that was left without an operator.
        field: String,
        /// Index where the operator was expected.
        position: usize,
    },

    /// The query ended (or a list was empty) where a value was expected.
    #[error("missing value after '{field} {operator}'")]
    MissingValue {
        /// The field of the incomplete condition.
        field: String,
        /// The operator of the incomplete condition.
        operator: String,
        /// Index where the value was expected.
        position: usize,
    },

    /// A `(` was never closed.
    #[error("unclosed parenthesis")]
    UnclosedParenthesis {
        /// Index where the closing `)` was expected.
        position: usize,
    },

    /// The query ended where a condition was expected, e.g. after `&&`.
    #[error("unexpected end of expression")]
    UnexpectedEnd {
        /// Index where the condition was expected.
        position: usize,
    },

    /// Parentheses nest deeper than the parser allows.
    #[error("expression nested too deeply (limit {limit})")]
    TooDeep {
        /// Index of the `(` that exceeded the limit.
        position: usize,
        /// The maximum nesting depth.
        limit: usize,
    },

    /// The query joins more conditions than the parser allows.
    #[error("too many conditions (limit {limit})")]
    TooManyConditions {
        /// Index of the first connective past the limit.
        position: usize,
        /// The maximum number of conditions.
        limit: usize,
    },

    /// Tokens remained after a complete expression.
    #[error("unexpected token '{token}'")]
    UnexpectedToken {
        /// The unexpected token text.
        token: String,
        /// Index of the offending token.
        position: usize,
    },
}

impl FilterError {
    /// Creates an unknown field error.
    pub fn unknown_field(
        field: impl Into<String>,
        position: usize,
        suggestion: Option<String>,
    ) -> Self {
        FilterError::UnknownField {
            field: field.into(),
            position,
            suggestion,
        }
    }

    /// Creates an unknown operator error.
    pub fn unknown_operator(operator: impl Into<String>, position: usize) -> Self {
        FilterError::UnknownOperator {
            operator: operator.into(),
            position,
        }
    }

    /// Creates a missing operator error.
    pub fn missing_operator(field: FilterableField, position: usize) -> Self {
        FilterError::MissingOperator {
            field: field.to_string(),
            position,
        }
    }

    /// Creates a missing value error.
    pub fn missing_value(field: FilterableField, operator: FilterOperator, position: usize) -> Self {
        FilterError::MissingValue {
            field: field.to_string(),
            operator: operator.to_string(),
            position,
        }
    }

    /// Creates an unexpected token error.
    pub fn unexpected_token(token: impl Into<String>, position: usize) -> Self {
        FilterError::UnexpectedToken {
            token: token.into(),
            position,
        }
    }

    /// Returns the index of the token the error refers to.
    pub fn position(&self) -> usize {
        match self {
            FilterError::UnknownField { position, .. }
            | FilterError::UnknownOperator { position, .. }
            | FilterError::MissingOperator { position, .. }
            | FilterError::MissingValue { position, .. }
            | FilterError::UnclosedParenthesis { position }
            | FilterError::UnexpectedEnd { position }
            | FilterError::TooDeep { position, .. }
            | FilterError::TooManyConditions { position, .. }
            | FilterError::UnexpectedToken { position, .. } => *position,
        }
    }

    /// Returns the user-facing message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{s}'?)"),
        None => String::new(),
    }
}

fn valid_fields() -> String {
    FilterableField::ALL
        .iter()
        .map(FilterableField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn valid_operators() -> String {
    FilterOperator::ALL
        .iter()
        .map(FilterOperator::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
