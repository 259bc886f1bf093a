//! Uniqueness-enforcing ordered record set

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use super::errors::{CollectionError, CollectionResult};
use super::sorter::{RecordSorter, SortOrder};
use crate::record::Record;

/// Ordered set of records keyed by the unique field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    records: Vec<Record>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in stored order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Finds the record holding `unique_value` and its position.
    ///
    /// Linear scan in stored order; the earliest match wins.
    pub fn find(&self, unique_value: &str) -> Option<(&Record, usize)> {
        self.records
            .iter()
            .enumerate()
            .find(|(_, r)| r.unique_value() == unique_value)
            .map(|(i, r)| (r, i))
    }

    /// Appends a record unless its unique value is already present
    pub fn add(&mut self, record: Record) -> CollectionResult<()> {
        if self.find(record.unique_value()).is_some() {
            return Err(CollectionError::Duplicate(record.unique_value().to_string()));
        }
        self.records.push(record);
        Ok(())
    }

    /// Removes the record holding `unique_value`, keeping the rest in order
    pub fn delete(&mut self, unique_value: &str) -> CollectionResult<Record> {
        match self.find(unique_value) {
            Some((_, index)) => Ok(self.records.remove(index)),
            None => Err(CollectionError::NotFound(unique_value.to_string())),
        }
    }

    /// Adds every record in order and returns the ones rejected as
    /// duplicates. Accepted records stay added even if others fail.
    pub fn merge_add<I>(&mut self, records: I) -> Collection
    where
        I: IntoIterator<Item = Record>,
    {
        let mut failed = Collection::new();
        for record in records {
            if self.find(record.unique_value()).is_some() {
                let _ = failed.add(record);
            } else {
                self.records.push(record);
            }
        }
        failed
    }

    /// Deletes by unique value for every record in order and returns the
    /// ones that matched nothing. Only the unique field of each input is
    /// consulted.
    pub fn merge_delete<I>(&mut self, records: I) -> Collection
    where
        I: IntoIterator<Item = Record>,
    {
        let mut failed = Collection::new();
        for record in records {
            if self.delete(record.unique_value()).is_err() {
                let _ = failed.add(record);
            }
        }
        failed
    }

    /// Sorted copy of this collection
    pub fn sorted(&self, order: &SortOrder) -> Collection {
        Collection {
            records: RecordSorter::sorted_view(&self.records, order),
        }
    }

    /// Indented JSON in the default sort order
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        to_indented_json(&self.sorted(&SortOrder::default()))
    }
}

impl IntoIterator for Collection {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl From<Vec<Record>> for Collection {
    /// Keeps the first record for each unique value
    fn from(records: Vec<Record>) -> Self {
        let mut collection = Collection::new();
        collection.merge_add(records);
        collection
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.to_pretty_json().map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

/// Serializes with four-space indentation
pub fn to_indented_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut buffer = Vec::with_capacity(256);
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make(name: &str, hostname: &str) -> Record {
        Record::from_json(json!({
            "name": name,
            "hostname": hostname,
            "port": 22,
            "username": "root"
        }))
        .unwrap()
    }

    fn names(collection: &Collection) -> Vec<&str> {
        collection.iter().map(Record::unique_value).collect()
    }

    #[test]
    fn test_add_appends() {
        let mut c = Collection::new();
        c.add(make("b", "h")).unwrap();
        c.add(make("a", "h")).unwrap();
        assert_eq!(names(&c), ["b", "a"]);
    }

    #[test]
    fn test_add_rejects_duplicate_unique_value() {
        let mut c = Collection::new();
        c.add(make("a", "h1")).unwrap();

        let result = c.add(make("a", "h2"));
        assert_eq!(result, Err(CollectionError::Duplicate("a".into())));
        assert_eq!(c.len(), 1);
        assert_eq!(c.records()[0].get("hostname"), make("a", "h1").get("hostname"));
    }

    #[test]
    fn test_find_reports_index() {
        let mut c = Collection::new();
        c.add(make("a", "h")).unwrap();
        c.add(make("b", "h")).unwrap();

        let (record, index) = c.find("b").unwrap();
        assert_eq!(record.unique_value(), "b");
        assert_eq!(index, 1);
        assert!(c.find("z").is_none());
    }

    #[test]
    fn test_delete_preserves_order() {
        let mut c = Collection::from(vec![make("a", "h"), make("b", "h"), make("c", "h")]);

        let removed = c.delete("b").unwrap();
        assert_eq!(removed.unique_value(), "b");
        assert_eq!(names(&c), ["a", "c"]);
        assert!(c.find("b").is_none());
    }

    #[test]
    fn test_delete_missing() {
        let mut c = Collection::new();
        assert_eq!(c.delete("x"), Err(CollectionError::NotFound("x".into())));
    }

    #[test]
    fn test_merge_add_is_partial() {
        let mut c = Collection::from(vec![make("b", "h")]);

        let failed = c.merge_add(vec![make("a", "h"), make("b", "other"), make("c", "h")]);
        assert_eq!(names(&failed), ["b"]);
        assert_eq!(names(&c), ["b", "a", "c"]);

        // the rejected input comes back as sent; the stored one is untouched
        assert_eq!(failed.records()[0], make("b", "other"));
        assert_eq!(c.find("b").unwrap().0, &make("b", "h"));
    }

    #[test]
    fn test_merge_delete_returns_unmatched() {
        let mut c = Collection::from(vec![make("a", "h"), make("b", "h")]);

        let failed = c.merge_delete(vec![make("b", "ignored"), make("z", "h")]);
        assert_eq!(names(&failed), ["z"]);
        assert_eq!(names(&c), ["a"]);
    }

    #[test]
    fn test_sorted_leaves_store_order() {
        let c = Collection::from(vec![make("a", "y"), make("b", "x")]);

        let view = c.sorted(&SortOrder::by(["hostname"]));
        assert_eq!(names(&view), ["b", "a"]);
        assert_eq!(names(&c), ["a", "b"]);
    }

    #[test]
    fn test_pretty_json_sorted_and_indented() {
        let c = Collection::from(vec![make("b", "h"), make("a", "h")]);
        let rendered = c.to_pretty_json().unwrap();

        assert!(rendered.starts_with("[\n    {\n        \"hostname\""));
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed[0]["name"], "a");
        assert_eq!(parsed[1]["name"], "b");
        assert_eq!(c.to_string(), rendered);
    }
}
