//! Bookmark Manager for Link Saver.
//!
//! Implements `BookmarkStore` over one flat JSON array holding every user's
//! bookmarks. Position in that array is the only ordering signal; each
//! operation is scoped to the acting user's records.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::database::collections::{load_list, load_list_for_update, preserve_corrupt, save_list, ListRead};
use crate::database::{KeyValueStore, BOOKMARKS_KEY};
use crate::services::clock::{unique_time_id, Clock};
use crate::services::reorder_merge::{merge_user_order, MergeOutcome};
use crate::types::bookmark::{Bookmark, BookmarkDraft};
use crate::types::errors::BookmarkError;

/// Trait defining bookmark persistence operations.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    async fn list_all(&self) -> Vec<Bookmark>;
    async fn list_for_user(&self, user_id: &str) -> Vec<Bookmark>;
    async fn search(&self, user_id: &str, query: &str) -> Vec<Bookmark>;
    async fn add(&self, draft: BookmarkDraft, user_id: &str) -> Result<Bookmark, BookmarkError>;
    async fn delete(&self, id: &str, user_id: &str) -> Result<(), BookmarkError>;
    async fn persist_reorder(&self, user_id: &str, new_order: &[Bookmark]) -> Result<MergeOutcome, BookmarkError>;
}

/// Bookmark store backed by a [`KeyValueStore`].
pub struct BookmarkManager {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    /// Serializes read-modify-write of the flat list within this process.
    write_lock: Mutex<()>,
}

impl BookmarkManager {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    async fn read(&self) -> ListRead<Bookmark> {
        load_list(self.store.as_ref(), BOOKMARKS_KEY).await
    }

    /// Strict read for read-modify-write; storage errors propagate.
    async fn read_for_update(&self) -> Result<ListRead<Bookmark>, BookmarkError> {
        Ok(load_list_for_update(self.store.as_ref(), BOOKMARKS_KEY).await?)
    }

    async fn write(&self, bookmarks: &[Bookmark]) -> Result<(), BookmarkError> {
        save_list(self.store.as_ref(), BOOKMARKS_KEY, bookmarks).await?;
        Ok(())
    }
}

#[async_trait]
impl BookmarkStore for BookmarkManager {
    /// The whole flat list.
    ///
    /// Lenient: a missing, unreadable or unparsable payload reads as empty so
    /// a damaged store never takes the session down with it.
    async fn list_all(&self) -> Vec<Bookmark> {
        self.read().await.items
    }

    /// The user's bookmarks in flat-list order.
    async fn list_for_user(&self, user_id: &str) -> Vec<Bookmark> {
        self.list_all()
            .await
            .into_iter()
            .filter(|b| b.user_id == user_id)
            .collect()
    }

    /// The user's bookmarks whose title or url contains `query`, ignoring case.
    async fn search(&self, user_id: &str, query: &str) -> Vec<Bookmark> {
        let query = query.trim();
        self.list_for_user(user_id)
            .await
            .into_iter()
            .filter(|b| query.is_empty() || b.matches(query))
            .collect()
    }

    /// Appends a new bookmark with a fresh id and creation time.
    async fn add(&self, draft: BookmarkDraft, user_id: &str) -> Result<Bookmark, BookmarkError> {
        let _guard = self.write_lock.lock().await;
        let ListRead { items: mut bookmarks, corrupt } = self.read_for_update().await?;

        let id = unique_time_id(self.clock.now_millis(), |id| bookmarks.iter().any(|b| b.id == id));
        let bookmark = Bookmark {
            id,
            user_id: user_id.to_string(),
            url: draft.url,
            title: draft.title,
            favicon: draft.favicon,
            summary: draft.summary,
            og_tags: draft.og_tags,
            created_at: self.clock.now_utc(),
        };

        if let Some(raw) = corrupt {
            preserve_corrupt(self.store.as_ref(), BOOKMARKS_KEY, &raw).await?;
        }
        bookmarks.push(bookmark.clone());
        self.write(&bookmarks).await?;

        tracing::info!(bookmark_id = %bookmark.id, user_id, "Added bookmark");
        Ok(bookmark)
    }

    /// Removes the bookmark matching both `id` and `user_id`.
    ///
    /// Nothing matching is not an error: the bookmark is already gone.
    /// A list that cannot be read is.
    async fn delete(&self, id: &str, user_id: &str) -> Result<(), BookmarkError> {
        let _guard = self.write_lock.lock().await;
        let mut bookmarks = self.read_for_update().await?.items;

        let Some(index) = bookmarks.iter().position(|b| b.id == id && b.user_id == user_id) else {
            tracing::debug!(bookmark_id = id, user_id, "Delete matched nothing");
            return Ok(());
        };
        bookmarks.remove(index);
        self.write(&bookmarks).await?;

        tracing::info!(bookmark_id = id, user_id, "Deleted bookmark");
        Ok(())
    }

    /// Writes the user's new order back into the flat list.
    ///
    /// Reads and rewrites the entire list in one step; other users' records
    /// keep their positions. Skips the write when nothing changes.
    async fn persist_reorder(&self, user_id: &str, new_order: &[Bookmark]) -> Result<MergeOutcome, BookmarkError> {
        let _guard = self.write_lock.lock().await;
        let current = self.read_for_update().await?.items;

        let outcome = merge_user_order(current.clone(), user_id, new_order);
        if !outcome.is_exact() {
            tracing::warn!(
                user_id,
                ignored = outcome.ignored,
                refilled = outcome.refilled,
                "Reorder did not match the stored bookmarks exactly"
            );
        }

        if outcome.bookmarks != current {
            self.write(&outcome.bookmarks).await?;
            tracing::debug!(user_id, "Persisted bookmark order");
        }
        Ok(outcome)
    }
}
