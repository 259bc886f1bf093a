//! Record collections
//!
//! # Invariants
//!
//! - No two records in a collection share a unique value
//! - Stored order is insertion order; sorting produces a separate view
//! - Batch merges are partial: every item is attempted, failures are
//!   returned as data

mod collection;
mod errors;
mod filters;
mod sorter;

pub use collection::{to_indented_json, Collection};
pub use errors::{CollectionError, CollectionResult};
pub use filters::{LargeRecordFilter, LARGE_FIELD_THRESHOLD};
pub use sorter::{RecordSorter, SortOrder};
