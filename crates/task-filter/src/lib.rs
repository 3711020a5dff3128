//! Filter query language for in-memory task records.
//!
//! This crate parses user-typed filter expressions such as
//! `priority = high && done = false` and evaluates them against task records,
//! producing the filtered view a host application renders.
//!
//! - [`filter`] - tokenizer, parser, AST and evaluator
//! - [`TaskRecord`] - the task model filters run against
//! - [`TaskStore`] - loads task records from a JSON file

pub mod filter;
mod record;
mod store;

pub use record::{Priority, TaskRecord};
pub use store::{TaskStore, TaskStoreError};
