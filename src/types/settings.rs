use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::platform;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "LINK_SAVER_DATA_DIR";

/// Runtime configuration. Every field has a default so partial files load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the database file. `None` means the platform data dir.
    pub data_dir: Option<PathBuf>,
    pub database_file: String,
    /// Lifetime encoded inside session tokens.
    pub token_ttl_secs: u64,
    /// Lifetime of the cookie that carries the token.
    pub cookie_ttl_days: u64,
    /// PBKDF2 iteration count used for new password hashes.
    pub password_iterations: u32,
    /// Simulated network latency awaited before login and registration.
    pub auth_delay_ms: u64,
    pub metadata_proxy: String,
    pub favicon_service: String,
    pub summary_endpoint: String,
    pub http_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            database_file: "link_saver.db".to_string(),
            token_ttl_secs: 24 * 60 * 60,
            cookie_ttl_days: 7,
            password_iterations: 100_000,
            auth_delay_ms: 500,
            metadata_proxy: "https://api.allorigins.win/raw".to_string(),
            favicon_service: "https://www.google.com/s2/favicons".to_string(),
            summary_endpoint: "https://r.jina.ai/http://".to_string(),
            http_timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Resolves the database path: env override, then `data_dir`, then the platform dir.
    pub fn database_path(&self) -> PathBuf {
        let dir = std::env::var(DATA_DIR_ENV)
            .ok()
            .filter(|d| !d.is_empty())
            .map(PathBuf::from)
            .or_else(|| self.data_dir.clone())
            .unwrap_or_else(platform::get_data_dir);
        dir.join(&self.database_file)
    }
}
