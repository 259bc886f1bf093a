//! Configuration records
//!
//! A record is an open mapping of field name to scalar value that must carry
//! every field in [`REQUIRED_FIELDS`]. The first required field is the
//! unique key used by [`crate::collection::Collection`].
//!
//! Records are built full-or-nothing: if any check fails, no partially
//! populated record is ever returned.

mod errors;
mod record;
mod value;

pub use errors::{RecordError, RecordResult};
pub use record::Record;
pub use value::FieldValue;

/// Fields every record must contain, in default sort order
pub const REQUIRED_FIELDS: [&str; 4] = ["name", "hostname", "port", "username"];

/// Field whose value must be distinct across a collection
pub const UNIQUE_FIELD: &str = REQUIRED_FIELDS[0];
