//! SQLite-backed [`KeyValueStore`].
//!
//! The database file is opened afresh for every call, so nothing is cached
//! between operations and an unopenable file surfaces on each call as
//! [`StorageError::Unavailable`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use super::migrations;
use super::KeyValueStore;
use crate::types::errors::StorageError;

/// How long a call waits on a lock held by another connection.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Key-value store persisted in a single SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Creates a store for the file at `path`. Nothing is opened until the first call.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(path: &Path) -> Result<Connection, StorageError> {
        let conn = Connection::open(path)
            .map_err(|e| StorageError::Unavailable(format!("{}: {}", path.display(), e)))?;
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        migrations::run_all(&conn).map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(conn)
    }

    /// Opens the file on the blocking pool and runs `op` against it.
    async fn with_connection<T, F>(&self, op: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error> + Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = Self::open(&path)?;
            op(&conn).map_err(|e| StorageError::Operation(e.to_string()))
        })
        .await
        .map_err(|e| StorageError::Operation(format!("storage task failed: {}", e)))?
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let key = key.to_string();
        self.with_connection(move |conn| {
            conn.query_row(
                "SELECT value FROM keyval WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let (key, value) = (key.to_string(), value.to_string());
        self.with_connection(move |conn| {
            conn.execute(
                "INSERT INTO keyval (key, value) VALUES (?1, ?2) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map(|_| ())
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let key = key.to_string();
        self.with_connection(move |conn| {
            conn.execute("DELETE FROM keyval WHERE key = ?1", params![key])
                .map(|_| ())
        })
        .await
    }
}
