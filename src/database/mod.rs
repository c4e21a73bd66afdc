//! Link Saver storage layer.
//!
//! Everything persistent goes through the [`KeyValueStore`] trait: opaque
//! string keys mapped to string values, each call its own implicit
//! transaction. There is no multi-key atomicity; callers that need it
//! read-modify-write a whole list value under one key.
//!
//! # Usage
//!
//! ```no_run
//! use link_saver::database::{KeyValueStore, SqliteStore};
//!
//! # async fn demo() -> Result<(), link_saver::types::errors::StorageError> {
//! let store = SqliteStore::new("link_saver.db");
//! store.set("greeting", "hello").await?;
//! assert_eq!(store.get("greeting").await?.as_deref(), Some("hello"));
//! store.delete("greeting").await?;
//! # Ok(())
//! # }
//! ```

pub mod collections;
pub mod connection;
pub mod memory;
pub mod migrations;

use async_trait::async_trait;

use crate::types::errors::StorageError;

pub use connection::SqliteStore;
pub use memory::MemoryStore;

/// Key holding the JSON array of registered users.
pub const USERS_KEY: &str = "link_saver_users";
/// Key holding the flat JSON array of every user's bookmarks.
pub const BOOKMARKS_KEY: &str = "link_saver_bookmarks";
/// Key holding the session token cookie.
pub const AUTH_TOKEN_KEY: &str = "link_saver_token";
/// Key holding the cached user of the current session.
pub const SESSION_USER_KEY: &str = "link_saver_user";

/// Durable asynchronous string key-value medium.
///
/// Implementations keep no cache: a `get` issued after an awaited `set`
/// from the same caller observes that write. Independent callers are not
/// ordered relative to each other.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value under `key`, or `None` if nothing is stored.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
