//! Unit tests for the History Manager.
//!
//! Tests loading from absent or malformed storage, appending, eviction,
//! lookup by id and clearing.

use pantrychef::database::{Database, KeyValueStore, MemoryStore};
use pantrychef::managers::history_manager::{
    HistoryManager, HistoryManagerTrait, HISTORY_KEY, MAX_HISTORY,
};
use pantrychef::types::errors::{HistoryError, StorageError};
use pantrychef::types::recipe::RecipeRecord;
use rstest::rstest;

fn soup() -> Vec<RecipeRecord> {
    vec![RecipeRecord::new("Soup", "Simmer everything")]
}

// ─── Loading ───

#[test]
fn test_load_absent_history_is_empty() {
    let store = MemoryStore::new();
    let manager = HistoryManager::new(&store);
    assert!(manager.load().is_empty());
}

#[rstest]
#[case::not_json("{{{ nope")]
#[case::object_not_list(r#"{"id": 1}"#)]
#[case::list_of_strings(r#"["a", "b"]"#)]
#[case::missing_query(r#"[{"id": 1}]"#)]
#[case::empty_string("")]
fn test_load_malformed_history_is_empty(#[case] raw: &str) {
    let store = MemoryStore::new();
    store.set(HISTORY_KEY, raw).unwrap();
    let manager = HistoryManager::new(&store);
    assert!(manager.load().is_empty());
}

#[test]
fn test_load_tolerates_missing_optional_fields() {
    let store = MemoryStore::new();
    store
        .set(HISTORY_KEY, r#"[{"id": 5, "query": "eggs"}]"#)
        .unwrap();
    let entries = HistoryManager::new(&store).load();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].query, "eggs");
    assert_eq!(entries[0].diet, None);
    assert!(entries[0].results.is_empty());
}

#[test]
fn test_load_truncates_oversized_lists() {
    let store = MemoryStore::new();
    let raw: Vec<String> = (0..20)
        .map(|i| format!(r#"{{"id": {}, "query": "q{}"}}"#, 100 - i, i))
        .collect();
    store.set(HISTORY_KEY, &format!("[{}]", raw.join(","))).unwrap();

    let entries = HistoryManager::new(&store).load();
    assert_eq!(entries.len(), MAX_HISTORY);
    assert_eq!(entries[0].query, "q0");
}

struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::ReadFailed("unavailable".into()))
    }
    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::WriteFailed("unavailable".into()))
    }
    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::WriteFailed("unavailable".into()))
    }
}

#[test]
fn test_unreadable_storage_loads_empty_and_append_reports_error() {
    let store = BrokenStore;
    let mut manager = HistoryManager::new(&store);
    assert!(manager.load().is_empty());
    let err = manager.append("rice", None, soup()).unwrap_err();
    assert!(matches!(err, HistoryError::StorageError(_)));
}

// ─── Appending ───

#[test]
fn test_append_prepends_newest_first() {
    let store = MemoryStore::new();
    let mut manager = HistoryManager::new(&store);
    manager.append("first", None, soup()).unwrap();
    manager.append("second", Some("vegan"), soup()).unwrap();

    let entries = manager.load();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].query, "second");
    assert_eq!(entries[0].diet.as_deref(), Some("vegan"));
    assert_eq!(entries[1].query, "first");
}

#[test]
fn test_append_ids_are_unique_and_increasing() {
    let store = MemoryStore::new();
    let mut manager = HistoryManager::new(&store);
    let a = manager.append("a", None, soup()).unwrap();
    let b = manager.append("b", None, soup()).unwrap();
    let c = manager.append("c", None, soup()).unwrap();
    assert!(a.id < b.id);
    assert!(b.id < c.id);
}

#[test]
fn test_append_evicts_oldest_beyond_limit() {
    let store = MemoryStore::new();
    let mut manager = HistoryManager::new(&store);
    for i in 0..(MAX_HISTORY + 3) {
        manager.append(&format!("q{}", i), None, soup()).unwrap();
    }
    let entries = manager.load();
    assert_eq!(entries.len(), MAX_HISTORY);
    assert_eq!(entries[0].query, format!("q{}", MAX_HISTORY + 2));
    assert_eq!(entries[MAX_HISTORY - 1].query, "q3");
}

#[test]
fn test_append_stores_full_results() {
    let store = MemoryStore::new();
    let mut manager = HistoryManager::new(&store);
    let records: Vec<RecipeRecord> = (0..10)
        .map(|i| RecipeRecord::new(&format!("R{}", i), "x"))
        .collect();
    manager.append("lots", None, records.clone()).unwrap();
    assert_eq!(manager.load()[0].results, records);
}

#[test]
fn test_append_over_malformed_history_starts_fresh() {
    let store = MemoryStore::new();
    store.set(HISTORY_KEY, "garbage").unwrap();
    let mut manager = HistoryManager::new(&store);
    manager.append("rice", None, soup()).unwrap();
    assert_eq!(manager.load().len(), 1);
}

#[test]
fn test_stored_document_is_a_json_list() {
    let store = MemoryStore::new();
    let mut manager = HistoryManager::new(&store);
    manager.append("rice", Some("keto"), soup()).unwrap();

    let raw = store.get(HISTORY_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let list = value.as_array().unwrap();
    assert_eq!(list[0]["query"], "rice");
    assert_eq!(list[0]["diet"], "keto");
    assert_eq!(list[0]["results"][0]["title"], "Soup");
}

// ─── Find / Clear ───

#[test]
fn test_find_by_id() {
    let store = MemoryStore::new();
    let mut manager = HistoryManager::new(&store);
    let entry = manager.append("eggs", None, soup()).unwrap();
    manager.append("ham", None, soup()).unwrap();

    let found = manager.find(entry.id).unwrap();
    assert_eq!(found.query, "eggs");
}

#[test]
fn test_find_unknown_id() {
    let store = MemoryStore::new();
    let manager = HistoryManager::new(&store);
    assert!(matches!(manager.find(42), Err(HistoryError::NotFound(42))));
}

#[test]
fn test_clear_removes_everything() {
    let db = Database::open_in_memory().unwrap();
    let mut manager = HistoryManager::new(&db);
    manager.append("eggs", None, soup()).unwrap();
    manager.clear().unwrap();
    assert!(manager.load().is_empty());
    assert_eq!(db.get(HISTORY_KEY).unwrap(), None);
}

#[test]
fn test_history_survives_in_sqlite() {
    let db = Database::open_in_memory().unwrap();
    {
        let mut manager = HistoryManager::new(&db);
        manager.append("eggs", None, soup()).unwrap();
    }
    let manager = HistoryManager::new(&db);
    assert_eq!(manager.load()[0].query, "eggs");
}
