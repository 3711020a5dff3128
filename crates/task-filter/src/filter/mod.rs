//! Filter query language for task records.
//!
//! A filter is a boolean expression over task attributes, typed by the user
//! and re-parsed on every edit. The pipeline has three stages, each depending
//! only on the previous one:
//!
//! 1. [`tokenize`] splits the query into tokens, honoring quoted literals.
//! 2. [`FilterParser`] builds a [`FilterExpression`] by recursive descent, or
//!    reports the first [`FilterError`].
//! 3. [`FilterEvaluator`] tests the expression against one record at a time.
//!
//! # Supported Syntax
//!
//! ## Conditions
//! - `field operator value`, e.g. `priority = high`, `percentDone >= 0.5`
//! - Fields: `done`, `priority`, `percentDone`, `dueDate`, `startDate`,
//!   `endDate`, `doneAt`, `assignees`, `labels`, `project`, `reminders`,
//!   `created`, `updated`
//! - Operators: `=`, `!=`, `>`, `>=`, `<`, `<=`, `like`, `in`, `not in`
//!
//! ## Values
//! - `true`, `false` - booleans
//! - `now` - the instant the filter was parsed
//! - numbers, bare words, or `"quoted text"` / `'quoted text'`
//! - `a,b,c` - lists, for `in` and `not in` only
//!
//! ## Boolean Operators
//! - `&&` - AND (binds tighter)
//! - `||` - OR
//! - `()` - Grouping; a group starts a term, so it may follow `||` but not `&&`
//!
//! # Example
//!
//! ```
//! use task_filter_rs::filter::{parse_filter_query, evaluate_filter};
//! use task_filter_rs::{Priority, TaskRecord};
//!
//! let expr = parse_filter_query("priority = high && done = false").unwrap();
//!
//! let tasks = vec![
//!     TaskRecord { id: "1".into(), priority: Some(Priority::High), ..TaskRecord::default() },
//!     TaskRecord { id: "2".into(), priority: Some(Priority::Low), ..TaskRecord::default() },
//! ];
//!
//! let matching: Vec<&TaskRecord> = tasks
//!     .iter()
//!     .filter(|t| evaluate_filter(expr.as_ref(), *t))
//!     .collect();
//! assert_eq!(matching.len(), 1);
//! assert_eq!(matching[0].id, "1");
//! ```

mod ast;
mod error;
mod evaluator;
mod lexer;
mod parser;
mod value;

pub use ast::{
    FilterCondition, FilterExpression, FilterOperator, FilterValue, FilterableField,
    LogicalOperator,
};
pub use error::{FilterError, FilterResult};
pub use evaluator::{evaluate_filter, FilterEvaluator, FilterRecord};
pub use lexer::{tokenize, Lexer, Token};
pub use parser::{parse_filter_query, FilterParser, MAX_CONDITIONS, MAX_NESTING};
pub use value::{parse_instant, FieldValue};
