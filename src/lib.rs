//! `record-ops` is a small library of higher-order functions for working with collections of
//! plain records, such as highway dhaba ratings:
//!
//! - [`create_filter`] builds a predicate `record[field] <op> value`
//! - [`create_sorter`] builds a comparator for [`slice::sort_by`]
//! - [`create_mapper`] builds a projection keeping a subset of fields
//! - [`apply_operations`] threads a collection through a list of stages
//!
//! None of these fail. Bad inputs fall back to defined values: an unknown operator yields a
//! predicate that is always `false`, a missing field fails the predicate, non-list pipeline
//! input produces an empty result, and non-invokable operations are skipped.
//!
//! ## Records
//!
//! Collections are sequences of [`types::Value`]. A record is a [`types::Value::Record`]
//! wrapping a [`types::Record`], whose lookups return `None` for absent fields. A field set to
//! [`types::Value::Null`] is present.
//!
//! ## Example
//!
//! ```rust
//! use record_ops::{apply_operations, create_filter, create_mapper, Operation};
//! use record_ops::types::{Record, Value};
//!
//! let data = Value::List(vec![
//!     Value::from(Record::new().with("name", "Dhaba").with("rating", 3)),
//!     Value::from(Record::new().with("name", "Punjab Dhaba").with("rating", 5)),
//! ]);
//!
//! let out = apply_operations(
//!     data,
//!     vec![
//!         Operation::filter(create_filter("rating", ">=", Value::from(4))),
//!         Operation::map(create_mapper(&["rating"])),
//!     ],
//! );
//! assert_eq!(out, vec![Value::from(Record::new().with("rating", 5))]);
//! ```
//!
//! ## Modules
//!
//! - [`types`]: dynamic value and record types
//! - [`processing`]: filter/sort/map/pipeline/reduce
//! - [`ingestion`]: load records from JSON, NDJSON, or CSV
//! - [`execution`]: chunked parallel execution with metrics and observer hooks
//! - [`error`]: error type for the fallible (ingestion/engine) paths

pub mod error;
pub mod execution;
pub mod ingestion;
pub mod processing;
pub mod types;

pub use error::{OpsError, OpsResult};
pub use processing::{
    apply_operations, create_filter, create_mapper, create_sorter, Operation, Pipeline, SortOrder,
};
