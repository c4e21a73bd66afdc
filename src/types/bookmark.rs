use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved link owned by one user.
///
/// All users' bookmarks live in one flat list; position in that list is the
/// only ordering signal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub user_id: String,
    pub url: String,
    pub title: String,
    pub favicon: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub og_tags: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the caller when adding a bookmark.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkDraft {
    pub url: String,
    pub title: String,
    pub favicon: String,
    pub summary: String,
    pub og_tags: BTreeMap<String, String>,
}

impl Bookmark {
    /// Case-insensitive substring match on title or url.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle) || self.url.to_lowercase().contains(&needle)
    }
}
