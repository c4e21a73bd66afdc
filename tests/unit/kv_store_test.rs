//! Unit tests for the key-value storage media and the lenient list helpers.
//!
//! The same contract is exercised against the SQLite file store (in a temp
//! directory) and the in-memory store.

use std::sync::Arc;

use link_saver::database::collections::{
    load_list, load_list_for_update, preserve_corrupt, save_list, CORRUPT_SUFFIX,
};
use link_saver::database::{KeyValueStore, MemoryStore, SqliteStore};
use link_saver::types::errors::StorageError;
use tempfile::TempDir;

fn sqlite_store(dir: &TempDir) -> SqliteStore {
    SqliteStore::new(dir.path().join("kv.db"))
}

async fn exercise_contract(store: &dyn KeyValueStore) {
    assert_eq!(store.get("missing").await.unwrap(), None);

    store.set("k", "v1").await.unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v1"));

    // Overwrite is read back immediately by the same caller.
    store.set("k", "v2").await.unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));

    store.delete("k").await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), None);

    // Deleting an absent key is fine.
    store.delete("k").await.unwrap();
}

#[tokio::test]
async fn test_sqlite_store_contract() {
    let dir = TempDir::new().unwrap();
    exercise_contract(&sqlite_store(&dir)).await;
}

#[tokio::test]
async fn test_memory_store_contract() {
    exercise_contract(&MemoryStore::new()).await;
}

/// Values survive a new store instance pointed at the same file.
#[tokio::test]
async fn test_sqlite_store_persists_across_instances() {
    let dir = TempDir::new().unwrap();
    sqlite_store(&dir).set("greeting", "hello").await.unwrap();

    let reopened = sqlite_store(&dir);
    assert_eq!(reopened.get("greeting").await.unwrap().as_deref(), Some("hello"));
}

#[tokio::test]
async fn test_sqlite_store_unopenable_path_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let store = SqliteStore::new(dir.path().join("no").join("such").join("dir").join("kv.db"));

    assert!(matches!(store.get("k").await, Err(StorageError::Unavailable(_))));
    assert!(matches!(store.set("k", "v").await, Err(StorageError::Unavailable(_))));
    assert!(matches!(store.delete("k").await, Err(StorageError::Unavailable(_))));
}

#[tokio::test]
async fn test_memory_store_unavailable_fails_every_call() {
    let store = MemoryStore::unavailable();
    assert!(store.get("k").await.unwrap_err().is_unavailable());
    assert!(store.set("k", "v").await.unwrap_err().is_unavailable());
    assert!(store.delete("k").await.unwrap_err().is_unavailable());
}

#[tokio::test]
async fn test_concurrent_writers_to_distinct_keys() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(sqlite_store(&dir));
    store.set("init", "0").await.unwrap();

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.set(&format!("key{}", i), &i.to_string()).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    for i in 0..8 {
        assert_eq!(store.get(&format!("key{}", i)).await.unwrap(), Some(i.to_string()));
    }
}

// ─── Lenient list helpers ───

#[tokio::test]
async fn test_load_list_absent_key_is_empty() {
    let store = MemoryStore::new();
    let read = load_list::<String>(&store, "list").await;
    assert!(read.items.is_empty());
    assert!(read.corrupt.is_none());
}

#[tokio::test]
async fn test_load_list_corrupt_payload_is_empty_and_reported() {
    let store = MemoryStore::new();
    store.set("list", "{not json").await.unwrap();

    let read = load_list::<String>(&store, "list").await;
    assert!(read.items.is_empty());
    assert_eq!(read.corrupt.as_deref(), Some("{not json"));
}

#[tokio::test]
async fn test_load_list_unavailable_store_is_empty() {
    let store = MemoryStore::unavailable();
    let read = load_list::<String>(&store, "list").await;
    assert!(read.items.is_empty());
    assert!(read.corrupt.is_none());
}

#[tokio::test]
async fn test_save_then_load_list() {
    let store = MemoryStore::new();
    let items = vec!["a".to_string(), "b".to_string()];
    save_list(&store, "list", &items).await.unwrap();
    assert_eq!(load_list::<String>(&store, "list").await.items, items);
}

#[tokio::test]
async fn test_save_list_on_unavailable_store_fails() {
    let store = MemoryStore::unavailable();
    let result = save_list(&store, "list", &["a".to_string()]).await;
    assert!(matches!(result, Err(StorageError::Unavailable(_))));
}

#[tokio::test]
async fn test_preserve_corrupt_writes_backup_key() {
    let store = MemoryStore::new();
    preserve_corrupt(&store, "list", "garbage").await.unwrap();
    let backup = store.get(&format!("list{}", CORRUPT_SUFFIX)).await.unwrap();
    assert_eq!(backup.as_deref(), Some("garbage"));
}

#[tokio::test]
async fn test_load_list_for_update_propagates_read_errors() {
    let store = MemoryStore::new();
    save_list(&store, "list", &["a".to_string()]).await.unwrap();

    store.set_fail_reads(true);
    let result = load_list_for_update::<String>(&store, "list").await;
    assert!(matches!(result, Err(StorageError::Operation(_))));

    let unavailable = MemoryStore::unavailable();
    let result = load_list_for_update::<String>(&unavailable, "list").await;
    assert!(matches!(result, Err(StorageError::Unavailable(_))));
}

#[tokio::test]
async fn test_load_list_for_update_treats_only_corruption_as_empty() {
    let store = MemoryStore::new();
    let absent = load_list_for_update::<String>(&store, "list").await.unwrap();
    assert!(absent.items.is_empty());
    assert!(absent.corrupt.is_none());

    store.set("list", "[1, 2").await.unwrap();
    let corrupt = load_list_for_update::<String>(&store, "list").await.unwrap();
    assert!(corrupt.items.is_empty());
    assert_eq!(corrupt.corrupt.as_deref(), Some("[1, 2"));
}

#[tokio::test]
async fn test_memory_store_failing_reads_still_accepts_writes() {
    let store = MemoryStore::new();
    store.set_fail_reads(true);
    assert!(matches!(store.get("k").await, Err(StorageError::Operation(_))));
    store.set("k", "v").await.unwrap();

    store.set_fail_reads(false);
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
}
