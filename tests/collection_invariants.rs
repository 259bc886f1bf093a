//! Collection Invariant Tests
//!
//! - Unique values are never duplicated
//! - Delete then find always misses
//! - Batch merges are partial and report failures as data
//! - Sorting is stable and total over the default key order

use configstore::collection::{Collection, RecordSorter, SortOrder};
use configstore::record::Record;
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn record(name: &str, hostname: &str, port: Value, username: &str) -> Record {
    Record::from_json(json!({
        "name": name,
        "hostname": hostname,
        "port": port,
        "username": username
    }))
    .unwrap()
}

fn simple(name: &str) -> Record {
    record(name, "host", json!(22), "root")
}

fn names(records: &[Record]) -> Vec<&str> {
    records.iter().map(Record::unique_value).collect()
}

// =============================================================================
// Uniqueness
// =============================================================================

/// Two different records sharing a unique value: the second is rejected.
#[test]
fn test_add_rejects_second_record_with_same_unique_value() {
    let mut c = Collection::new();
    c.add(record("db", "h1", json!(1), "a")).unwrap();

    assert!(c.add(record("db", "h2", json!(2), "b")).is_err());
    assert_eq!(c.len(), 1);
}

/// Uniqueness holds across a batch that itself contains repeats.
#[test]
fn test_batch_with_internal_duplicates() {
    let mut c = Collection::new();
    let failed = c.merge_add(vec![simple("a"), simple("b"), simple("a")]);

    assert_eq!(names(c.records()), ["a", "b"]);
    assert_eq!(names(failed.records()), ["a"]);
}

// =============================================================================
// Delete
// =============================================================================

#[test]
fn test_delete_then_find_misses() {
    let mut c = Collection::from(vec![simple("a"), simple("b"), simple("c")]);

    for name in ["b", "a", "c"] {
        c.delete(name).unwrap();
        assert!(c.find(name).is_none());
    }
    assert!(c.is_empty());
}

#[test]
fn test_merge_delete_only_reads_unique_field() {
    let mut c = Collection::from(vec![record("a", "h", json!(1), "u")]);

    // every other field differs from the stored record
    let failed = c.merge_delete(vec![record("a", "other", json!(99), "x")]);
    assert!(failed.is_empty());
    assert!(c.is_empty());
}

// =============================================================================
// Merge
// =============================================================================

#[test]
fn test_merge_add_into_empty_keeps_input_order() {
    let input = vec![simple("m"), simple("c"), simple("x"), simple("a")];
    let mut c = Collection::new();

    let failed = c.merge_add(input.clone());
    assert!(failed.is_empty());
    assert_eq!(c.records(), input.as_slice());
}

#[test]
fn test_merge_add_twice_fails_everything_second_time() {
    let input = vec![simple("a"), simple("b"), simple("c")];
    let mut c = Collection::new();

    c.merge_add(input.clone());
    let failed = c.merge_add(input.clone());

    assert_eq!(failed.records(), input.as_slice());
    assert_eq!(c.len(), 3);
}

#[test]
fn test_merge_delete_reports_not_found_in_order() {
    let mut c = Collection::from(vec![simple("a")]);
    let failed = c.merge_delete(vec![simple("z"), simple("a"), simple("y")]);

    assert_eq!(names(failed.records()), ["z", "y"]);
    assert!(c.is_empty());
}

// =============================================================================
// Sorting
// =============================================================================

/// Records equal under the active order keep their relative order.
#[test]
fn test_sort_is_stable() {
    // identical on every active key, told apart only by "tag"
    let twin = |tag: i64| {
        Record::from_json(json!({"name": "t", "hostname": "h", "port": 1, "username": "u", "tag": tag}))
            .unwrap()
    };
    let records = vec![twin(3), simple("a"), twin(1), twin(2)];

    let view = RecordSorter::sorted_view(&records, &SortOrder::default());
    let tags: Vec<_> = view.iter().filter_map(|r| r.get("tag")).map(|v| v.to_string()).collect();
    assert_eq!(names(&view), ["a", "t", "t", "t"]);
    assert_eq!(tags, ["3", "1", "2"]);
}

/// Every permutation of the same records sorts to the same sequence.
#[test]
fn test_default_order_is_total() {
    let records = vec![
        record("a", "h2", json!(2), "u"),
        record("b", "h1", json!(1), "u"),
        record("c", "h1", json!(1.5), "v"),
        record("d", "h3", json!(true), "w"),
    ];
    let expected = RecordSorter::sorted_view(&records, &SortOrder::by(["hostname", "port"]));

    let permutations = [[0, 1, 2, 3], [3, 2, 1, 0], [1, 3, 0, 2], [2, 0, 3, 1]];
    for perm in permutations {
        let shuffled: Vec<Record> = perm.iter().map(|&i| records[i].clone()).collect();
        let sorted = RecordSorter::sorted_view(&shuffled, &SortOrder::by(["hostname", "port"]));
        assert_eq!(sorted, expected);
    }

    assert_eq!(names(&expected), ["b", "c", "a", "d"]);
}

#[test]
fn test_bools_sort_false_first() {
    let records = vec![
        Record::from_json(json!({"name": "on", "hostname": "h", "port": 1, "username": "u", "tls": true}))
            .unwrap(),
        Record::from_json(json!({"name": "off", "hostname": "h", "port": 1, "username": "u", "tls": false}))
            .unwrap(),
    ];
    let view = RecordSorter::sorted_view(&records, &SortOrder::by(["tls"]));
    assert_eq!(names(&view), ["off", "on"]);
}

#[test]
fn test_pretty_json_uses_default_order() {
    let c = Collection::from(vec![simple("b"), simple("a")]);
    let parsed: Value = serde_json::from_str(&c.to_pretty_json().unwrap()).unwrap();

    assert_eq!(parsed[0]["name"], "a");
    // stored order untouched by rendering
    assert_eq!(names(c.records()), ["b", "a"]);
}
