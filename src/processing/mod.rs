//! In-memory record transformations.
//!
//! Every function here is pure: inputs are borrowed or consumed, never mutated behind the
//! caller's back, and nothing returns an error. Invalid inputs fall back to defined values
//! (an unknown operator filters everything out, non-list pipeline input yields an empty
//! result, and so on).
//!
//! - [`create_filter()`]: predicate factory (`field <op> value`)
//! - [`create_sorter()`]: comparator factory for [`slice::sort_by`]
//! - [`create_mapper()`]: projection factory keeping a subset of fields
//! - [`apply_operations()`] / [`Pipeline`]: sequential fold through stages
//! - [`reduce()`]: count/sum/min/max/mean over one field
//!
//! ## Example: filter → sort → project
//!
//! ```rust
//! use record_ops::processing::{
//!     apply_operations, create_filter, create_mapper, create_sorter, Operation, SortOrder,
//! };
//! use record_ops::types::{Record, Value};
//!
//! let dhabas = Value::List(vec![
//!     Value::from(Record::new().with("name", "Punjab Dhaba").with("rating", 4.5)),
//!     Value::from(Record::new().with("name", "Highway King").with("rating", 3.2)),
//!     Value::from(Record::new().with("name", "Sher-e-Punjab").with("rating", 4.8)),
//! ]);
//!
//! let best = apply_operations(
//!     dhabas,
//!     vec![
//!         Operation::filter(create_filter("rating", ">=", Value::from(4))),
//!         Operation::sort(create_sorter("rating", SortOrder::Desc)),
//!         Operation::map(create_mapper(&["name"])),
//!     ],
//! );
//!
//! assert_eq!(
//!     best,
//!     vec![
//!         Value::from(Record::new().with("name", "Sher-e-Punjab")),
//!         Value::from(Record::new().with("name", "Punjab Dhaba")),
//!     ]
//! );
//! ```

pub mod filter;
pub mod map;
pub mod pipeline;
pub mod reduce;
pub mod sort;

pub use filter::{create_filter, filter, CompareOp, Predicate};
pub use map::{create_mapper, map, project};
pub use pipeline::{apply_operations, Operation, Pipeline, Stage};
pub use reduce::{reduce, ReduceOp};
pub use sort::{compare_field, create_sorter, locale_compare, sort, SortOrder};
