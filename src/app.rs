//! App Core for Link Saver.
//!
//! The explicit context holding the store, the managers and the external
//! collaborators. Created once at startup and handed to whoever needs it;
//! bookmark operations are scoped to the user of the current session.

use std::sync::Arc;

use crate::database::{KeyValueStore, SqliteStore};
use crate::managers::bookmark_manager::{BookmarkManager, BookmarkStore};
use crate::managers::credential_manager::CredentialManager;
use crate::managers::session_manager::SessionManager;
use crate::services::clock::{Clock, SystemClock};
use crate::services::metadata_extractor::{normalize_url, HttpMetadataExtractor, MetadataSource};
use crate::services::reorder_merge::MergeOutcome;
use crate::services::summary_fetcher::{HttpSummaryFetcher, SummarySource};
use crate::types::bookmark::{Bookmark, BookmarkDraft};
use crate::types::errors::BookmarkError;
use crate::types::session::SessionState;
use crate::types::settings::AppConfig;
use crate::types::user::User;

/// Central application struct holding all managers and services.
pub struct App {
    pub config: AppConfig,
    pub store: Arc<dyn KeyValueStore>,
    pub credentials: Arc<CredentialManager>,
    pub session: SessionManager,
    pub bookmarks: BookmarkManager,
    metadata: Arc<dyn MetadataSource>,
    summaries: Arc<dyn SummarySource>,
}

impl App {
    /// Creates an App persisting to SQLite at `config.database_path()` and
    /// talking to the configured HTTP collaborators.
    pub fn new(config: AppConfig) -> Self {
        let db_path = config.database_path();
        if let Some(dir) = db_path.parent() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                tracing::warn!(dir = %dir.display(), error = %e, "Could not create data directory");
            }
        }
        tracing::info!(path = %db_path.display(), "Using database");

        let metadata = Arc::new(HttpMetadataExtractor::new(&config));
        let summaries = Arc::new(HttpSummaryFetcher::new(&config));
        Self::with_parts(
            config,
            Arc::new(SqliteStore::new(db_path)),
            Arc::new(SystemClock),
            metadata,
            summaries,
        )
    }

    /// Creates an App from explicit parts. The session starts in `Loading`.
    pub fn with_parts(
        config: AppConfig,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        metadata: Arc<dyn MetadataSource>,
        summaries: Arc<dyn SummarySource>,
    ) -> Self {
        let credentials = Arc::new(CredentialManager::new(
            Arc::clone(&store),
            Arc::clone(&clock),
            config.password_iterations,
        ));
        let session = SessionManager::new(
            Arc::clone(&store),
            credentials.clone(),
            Arc::clone(&clock),
            &config,
        );
        let bookmarks = BookmarkManager::new(Arc::clone(&store), clock);

        Self {
            config,
            store,
            credentials,
            session,
            bookmarks,
            metadata,
            summaries,
        }
    }

    /// Startup sequence: restore the persisted session.
    pub async fn startup(&self) -> SessionState {
        self.session.load().await
    }

    async fn require_user(&self) -> Result<User, BookmarkError> {
        self.session
            .current_user()
            .await
            .ok_or(BookmarkError::Unauthenticated)
    }

    /// Saves `url` for the current user, enriched with page metadata and a summary.
    ///
    /// Collaborator failures only degrade the metadata; they never fail the add.
    pub async fn add_bookmark(&self, url: &str) -> Result<Bookmark, BookmarkError> {
        let user = self.require_user().await?;
        let url = url.trim();
        if url.is_empty() {
            return Err(BookmarkError::EmptyUrl);
        }

        let normalized = normalize_url(url);
        let (metadata, summary) = tokio::join!(
            self.metadata.extract(url),
            self.summaries.summarize(&normalized)
        );

        let draft = BookmarkDraft {
            url: url.to_string(),
            title: metadata.title,
            favicon: metadata.favicon,
            summary,
            og_tags: metadata.og_tags,
        };
        self.bookmarks.add(draft, &user.id).await
    }

    /// The current user's bookmarks in their saved order.
    pub async fn my_bookmarks(&self) -> Result<Vec<Bookmark>, BookmarkError> {
        let user = self.require_user().await?;
        Ok(self.bookmarks.list_for_user(&user.id).await)
    }

    pub async fn search_bookmarks(&self, query: &str) -> Result<Vec<Bookmark>, BookmarkError> {
        let user = self.require_user().await?;
        Ok(self.bookmarks.search(&user.id, query).await)
    }

    pub async fn delete_bookmark(&self, id: &str) -> Result<(), BookmarkError> {
        let user = self.require_user().await?;
        self.bookmarks.delete(id, &user.id).await
    }

    /// Persists a locally reordered list of the current user's bookmarks.
    pub async fn reorder_bookmarks(&self, new_order: &[Bookmark]) -> Result<MergeOutcome, BookmarkError> {
        let user = self.require_user().await?;
        self.bookmarks.persist_reorder(&user.id, new_order).await
    }

    /// Same as [`App::reorder_bookmarks`], with the new order given as ids.
    ///
    /// Ids that are not among the user's bookmarks are ignored.
    pub async fn reorder_by_ids(&self, ids: &[String]) -> Result<MergeOutcome, BookmarkError> {
        let user = self.require_user().await?;
        let mine = self.bookmarks.list_for_user(&user.id).await;
        let new_order: Vec<Bookmark> = ids
            .iter()
            .filter_map(|id| mine.iter().find(|b| &b.id == id).cloned())
            .collect();
        self.bookmarks.persist_reorder(&user.id, &new_order).await
    }
}
