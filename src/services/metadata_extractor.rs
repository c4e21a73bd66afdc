//! Page metadata for new bookmarks.
//!
//! Fetches the page through a CORS-style relay and pulls the `<title>` and a
//! fixed set of OpenGraph tags out with regular expressions. Every failure
//! degrades to placeholder metadata; nothing here returns an error.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, Url};

use crate::types::metadata::{PageMetadata, OG_TAG_NAMES};
use crate::types::settings::AppConfig;

/// Domain used for the favicon of a URL that cannot be parsed.
const DEFAULT_FAVICON_DOMAIN: &str = "default";

/// Source of page metadata for a URL.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn extract(&self, url: &str) -> PageMetadata;
}

/// Prefixes `https://` unless the URL already carries an http(s) scheme.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Builds the favicon service URL for `domain`.
pub fn favicon_url(service: &str, domain: &str) -> String {
    format!("{}?domain={}&sz=64", service, domain)
}

/// Extracts the page title and OpenGraph tags from raw HTML.
///
/// Returns `None` for the title when the page has no non-empty `<title>`.
pub fn parse_metadata(html: &str) -> (Option<String>, BTreeMap<String, String>) {
    let title = Regex::new(r"(?i)<title[^>]*>([^<]+)</title>")
        .ok()
        .and_then(|re| re.captures(html))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty());

    let mut og_tags = BTreeMap::new();
    for tag in OG_TAG_NAMES {
        let pattern = format!(
            r#"(?i)<meta[^>]+property=["']{}["'][^>]+content=["']([^"']+)["'][^>]*>"#,
            regex::escape(tag)
        );
        let value = Regex::new(&pattern)
            .ok()
            .and_then(|re| re.captures(html))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());
        if let Some(value) = value {
            og_tags.insert(tag.to_string(), value);
        }
    }

    (title, og_tags)
}

/// [`MetadataSource`] that fetches pages over HTTP.
pub struct HttpMetadataExtractor {
    client: Client,
    proxy: String,
    favicon_service: String,
}

impl HttpMetadataExtractor {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            proxy: config.metadata_proxy.clone(),
            favicon_service: config.favicon_service.clone(),
        }
    }

    async fn fetch_html(&self, url: &str) -> Result<String, String> {
        let relay = Url::parse_with_params(&self.proxy, &[("url", url)]).map_err(|e| e.to_string())?;
        let response = self
            .client
            .get(relay)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        response.text().await.map_err(|e| e.to_string())
    }
}

#[async_trait]
impl MetadataSource for HttpMetadataExtractor {
    async fn extract(&self, url: &str) -> PageMetadata {
        let normalized = normalize_url(url);
        let domain = match Url::parse(&normalized).ok().and_then(|u| u.host_str().map(str::to_string)) {
            Some(domain) => domain,
            None => {
                tracing::warn!(url, "Could not parse bookmark URL");
                return PageMetadata {
                    title: url.to_string(),
                    favicon: favicon_url(&self.favicon_service, DEFAULT_FAVICON_DOMAIN),
                    og_tags: BTreeMap::new(),
                };
            }
        };

        let (title, og_tags) = match self.fetch_html(&normalized).await {
            Ok(html) => parse_metadata(&html),
            Err(e) => {
                tracing::warn!(url = %normalized, error = %e, "Could not fetch page metadata");
                (None, BTreeMap::new())
            }
        };

        PageMetadata {
            title: title.unwrap_or_else(|| domain.clone()),
            favicon: favicon_url(&self.favicon_service, &domain),
            og_tags,
        }
    }
}
