//! Record ordering
//!
//! Sorting never mutates shared state: callers build a [`SortOrder`] for the
//! request and get back a sorted copy.

use std::cmp::Ordering;

use crate::record::{FieldValue, Record, REQUIRED_FIELDS};

/// Ordered list of field names used to compare records.
///
/// Requested keys come first, followed by the required fields as a
/// deterministic tiebreak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    keys: Vec<String>,
}

impl SortOrder {
    /// Order by the given keys, then by the required fields
    pub fn by<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut all: Vec<String> = keys.into_iter().map(Into::into).collect();
        all.extend(REQUIRED_FIELDS.iter().map(|f| f.to_string()));
        Self { keys: all }
    }

    /// The effective key list
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::by(std::iter::empty::<String>())
    }
}

/// Sorts records
pub struct RecordSorter;

impl RecordSorter {
    /// Compares two records key by key; the first differing key decides.
    pub fn compare(a: &Record, b: &Record, order: &SortOrder) -> Ordering {
        for key in order.keys() {
            let ordering = Self::compare_values(a.get(key), b.get(key));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Sorts records in place. Stable.
    pub fn sort(records: &mut [Record], order: &SortOrder) {
        records.sort_by(|a, b| Self::compare(a, b, order));
    }

    /// Returns a sorted copy, leaving the input untouched
    pub fn sorted_view(records: &[Record], order: &SortOrder) -> Vec<Record> {
        let mut view = records.to_vec();
        Self::sort(&mut view, order);
        view
    }

    /// A record lacking the key sorts before one that has it
    fn compare_values(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a_val), Some(b_val)) => a_val.compare(b_val),
        }
    }
}
