use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// OpenGraph properties scraped from a page.
pub const OG_TAG_NAMES: [&str; 6] = [
    "og:title",
    "og:description",
    "og:image",
    "og:type",
    "og:site_name",
    "og:url",
];

/// Placeholder stored when no summary could be fetched.
pub const SUMMARY_UNAVAILABLE: &str = "Summary temporarily unavailable.";

/// What the metadata extractor learns about a URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,
    pub favicon: String,
    pub og_tags: BTreeMap<String, String>,
}
