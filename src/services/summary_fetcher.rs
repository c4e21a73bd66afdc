//! Best-effort plain-text page summaries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::types::metadata::SUMMARY_UNAVAILABLE;
use crate::types::settings::AppConfig;

/// Source of a short text summary for a normalized URL.
///
/// Implementations never fail; they return [`SUMMARY_UNAVAILABLE`] instead.
#[async_trait]
pub trait SummarySource: Send + Sync {
    async fn summarize(&self, normalized_url: &str) -> String;
}

/// [`SummarySource`] backed by a text-extraction relay.
pub struct HttpSummaryFetcher {
    client: Client,
    endpoint: String,
}

impl HttpSummaryFetcher {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: config.summary_endpoint.clone(),
        }
    }

    /// Relay URL for `normalized_url`: the endpoint followed by the URL without its scheme.
    pub fn relay_url(&self, normalized_url: &str) -> String {
        let bare = normalized_url
            .strip_prefix("https://")
            .or_else(|| normalized_url.strip_prefix("http://"))
            .unwrap_or(normalized_url);
        format!("{}{}", self.endpoint, bare)
    }

    async fn fetch(&self, normalized_url: &str) -> Result<String, reqwest::Error> {
        self.client
            .get(self.relay_url(normalized_url))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[async_trait]
impl SummarySource for HttpSummaryFetcher {
    async fn summarize(&self, normalized_url: &str) -> String {
        match self.fetch(normalized_url).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(url = normalized_url, error = %e, "Summary fetch failed");
                SUMMARY_UNAVAILABLE.to_string()
            }
        }
    }
}
