//! Unit tests for the key-value local storage backends.
//!
//! Every case runs against both the SQLite store and the in-memory store.

use pantrychef::database::{Database, KeyValueStore, MemoryStore};
use rstest::rstest;
use tempfile::TempDir;

fn sqlite() -> Box<dyn KeyValueStore> {
    Box::new(Database::open_in_memory().expect("open_in_memory failed"))
}

fn memory() -> Box<dyn KeyValueStore> {
    Box::new(MemoryStore::new())
}

#[rstest]
#[case::sqlite(sqlite())]
#[case::memory(memory())]
fn test_missing_key_reads_none(#[case] store: Box<dyn KeyValueStore>) {
    assert_eq!(store.get("absent").unwrap(), None);
}

#[rstest]
#[case::sqlite(sqlite())]
#[case::memory(memory())]
fn test_set_then_get(#[case] store: Box<dyn KeyValueStore>) {
    store.set("k", "[1,2,3]").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("[1,2,3]"));
}

#[rstest]
#[case::sqlite(sqlite())]
#[case::memory(memory())]
fn test_set_overwrites(#[case] store: Box<dyn KeyValueStore>) {
    store.set("k", "first").unwrap();
    store.set("k", "second").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
}

#[rstest]
#[case::sqlite(sqlite())]
#[case::memory(memory())]
fn test_remove(#[case] store: Box<dyn KeyValueStore>) {
    store.set("k", "v").unwrap();
    store.set("other", "kept").unwrap();
    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
    assert_eq!(store.get("other").unwrap().as_deref(), Some("kept"));
}

#[rstest]
#[case::sqlite(sqlite())]
#[case::memory(memory())]
fn test_remove_missing_key_is_ok(#[case] store: Box<dyn KeyValueStore>) {
    assert!(store.remove("never-set").is_ok());
}

#[rstest]
#[case::sqlite(sqlite())]
#[case::memory(memory())]
fn test_empty_and_unicode_values(#[case] store: Box<dyn KeyValueStore>) {
    store.set("empty", "").unwrap();
    store.set("uni", "crème brûlée • 🍳").unwrap();
    assert_eq!(store.get("empty").unwrap().as_deref(), Some(""));
    assert_eq!(store.get("uni").unwrap().as_deref(), Some("crème brûlée • 🍳"));
}

#[test]
fn test_sqlite_values_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chef.db");

    {
        let db = Database::open(&path).unwrap();
        db.set("sr_recipe_history_v1", "[]").unwrap();
    }

    let db = Database::open(&path).unwrap();
    assert_eq!(db.get("sr_recipe_history_v1").unwrap().as_deref(), Some("[]"));
}
