//! JSON list values stored under a single key.
//!
//! Plain reads are lenient: an absent key, an unopenable medium or a payload
//! that fails to parse all read as an empty list. Read-modify-write paths use
//! [`load_list_for_update`] instead, where only a corrupt payload reads as
//! empty and storage errors propagate. Writes are strict.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::KeyValueStore;
use crate::types::errors::StorageError;

/// Suffix of the key that preserves a corrupt payload before it is overwritten.
pub const CORRUPT_SUFFIX: &str = ".corrupt";

/// Result of a lenient list read.
#[derive(Debug, Clone)]
pub struct ListRead<T> {
    pub items: Vec<T>,
    /// The raw payload, when it was present but failed to parse.
    pub corrupt: Option<String>,
}

/// Reads the JSON array under `key`, degrading to an empty list.
pub async fn load_list<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> ListRead<T> {
    let raw = match store.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return ListRead { items: Vec::new(), corrupt: None },
        Err(e) => {
            tracing::warn!(key, error = %e, "List read failed, treating as empty");
            return ListRead { items: Vec::new(), corrupt: None };
        }
    };

    parse_list(key, raw)
}

/// Reads the JSON array under `key` ahead of rewriting it.
///
/// A failed `get` is returned as an error, since writing back a list built
/// from nothing would drop every stored record. A corrupt payload still reads
/// as empty and is reported in [`ListRead::corrupt`] for backup.
pub async fn load_list_for_update<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<ListRead<T>, StorageError> {
    match store.get(key).await? {
        Some(raw) => Ok(parse_list(key, raw)),
        None => Ok(ListRead { items: Vec::new(), corrupt: None }),
    }
}

fn parse_list<T: DeserializeOwned>(key: &str, raw: String) -> ListRead<T> {
    match serde_json::from_str(&raw) {
        Ok(items) => ListRead { items, corrupt: None },
        Err(e) => {
            tracing::warn!(key, error = %e, "Stored list is corrupt, treating as empty");
            ListRead { items: Vec::new(), corrupt: Some(raw) }
        }
    }
}

/// Serializes `items` and writes them under `key`.
pub async fn save_list<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<(), StorageError> {
    let json = serde_json::to_string(items)
        .map_err(|e| StorageError::Operation(format!("failed to encode {}: {}", key, e)))?;
    store.set(key, &json).await
}

/// Copies a corrupt payload to `<key>.corrupt` so the next write does not destroy it.
pub async fn preserve_corrupt(
    store: &dyn KeyValueStore,
    key: &str,
    raw: &str,
) -> Result<(), StorageError> {
    let backup_key = format!("{}{}", key, CORRUPT_SUFFIX);
    tracing::warn!(key, backup_key = %backup_key, "Preserving corrupt payload before overwrite");
    store.set(&backup_key, raw).await
}
