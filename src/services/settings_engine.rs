// Link Saver Settings Engine
// Loads and saves `AppConfig` as a JSON file at the platform config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::AppConfig;

/// File name of the config inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<AppConfig, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_config(&self) -> &AppConfig;
    fn replace(&mut self, config: AppConfig) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &Path;
}

/// Settings engine that persists `AppConfig` as pretty-printed JSON.
pub struct SettingsEngine {
    config_path: PathBuf,
    config: AppConfig,
}

impl SettingsEngine {
    /// Creates a SettingsEngine.
    ///
    /// Uses `path_override` when given, otherwise `<config dir>/config.json`.
    pub fn new(path_override: Option<PathBuf>) -> Self {
        let config_path =
            path_override.unwrap_or_else(|| platform::get_config_dir().join(CONFIG_FILE_NAME));
        Self {
            config_path,
            config: AppConfig::default(),
        }
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads the config file.
    ///
    /// A missing file yields defaults. A malformed file is an error rather
    /// than a silent reset, so a typo never discards the user's choices.
    fn load(&mut self) -> Result<AppConfig, SettingsError> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "No config file, using defaults");
            self.config = AppConfig::default();
            return Ok(self.config.clone());
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        self.config = serde_json::from_str(&content).map_err(|e| {
            SettingsError::Serialization(format!("Failed to parse config file: {}", e))
        })?;
        tracing::info!(path = %self.config_path.display(), "Loaded config");
        Ok(self.config.clone())
    }

    /// Writes the current config, creating parent directories as needed.
    fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.config).map_err(|e| {
            SettingsError::Serialization(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&self.config_path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))
    }

    fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// Replaces the in-memory config and saves it.
    fn replace(&mut self, config: AppConfig) -> Result<(), SettingsError> {
        self.config = config;
        self.save()
    }

    fn get_config_path(&self) -> &Path {
        &self.config_path
    }
}
