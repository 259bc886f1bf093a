//! Record filtering

use crate::record::Record;

/// Records with more fields than this count as large
pub const LARGE_FIELD_THRESHOLD: usize = 100;

/// Keeps records whose field count exceeds a threshold
pub struct LargeRecordFilter {
    threshold: usize,
}

impl LargeRecordFilter {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    /// Whether a record passes the filter
    pub fn matches(&self, record: &Record) -> bool {
        record.len() > self.threshold
    }

    /// Returns the matching records, preserving order
    pub fn apply<'a, I>(&self, records: I) -> Vec<Record>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        records
            .into_iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}

impl Default for LargeRecordFilter {
    fn default() -> Self {
        Self::new(LARGE_FIELD_THRESHOLD)
    }
}
