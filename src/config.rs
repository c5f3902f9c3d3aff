//! Application configuration.

use std::path::Path;
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use url::Url;

/// `db_path` value that selects the in-memory store.
pub const MEMORY_DB: &str = ":memory:";

/// Settings read from `tictactoe_share.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Page that share links point at.
    #[serde(default = "default_base_url")]
    base_url: String,

    /// SQLite file holding sessions, or `":memory:"`.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// How long the "copied" confirmation stays up, in milliseconds.
    #[serde(default = "default_copied_notice_ms")]
    copied_notice_ms: u64,

    /// Log file for the interactive UI.
    #[serde(default = "default_log_file")]
    log_file: String,
}

#[instrument]
fn default_base_url() -> String {
    "http://localhost:3000/".to_string()
}

#[instrument]
fn default_db_path() -> String {
    "tictactoe_share.db".to_string()
}

#[instrument]
fn default_copied_notice_ms() -> u64 {
    2000
}

#[instrument]
fn default_log_file() -> String {
    "tictactoe_share.log".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            db_path: default_db_path(),
            copied_notice_ms: default_copied_notice_ms(),
            log_file: default_log_file(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, does not parse,
    /// or names an invalid base URL.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on malformed TOML or an invalid base URL.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.share_base()?;
        info!(base_url = %config.base_url, db_path = %config.db_path, "Config loaded");
        Ok(config)
    }

    /// Loads `path` if it exists, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but is invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parsed base URL for share links.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `base_url` is not an absolute URL.
    pub fn share_base(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url)
            .map_err(|e| ConfigError::new(format!("Invalid base_url '{}': {}", self.base_url, e)))
    }

    /// Lifetime of the "copied" confirmation.
    pub fn copied_notice(&self) -> Duration {
        Duration::from_millis(self.copied_notice_ms)
    }

    /// True when sessions should live in memory only.
    pub fn uses_memory_store(&self) -> bool {
        self.db_path == MEMORY_DB
    }

    /// Replaces the database path (command-line override).
    pub fn with_db_path(mut self, db_path: String) -> Self {
        self.db_path = db_path;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.copied_notice(), Duration::from_secs(2));
    }

    #[test]
    fn test_partial_override() {
        let config = AppConfig::from_toml(
            r#"
            base_url = "https://games.example.org/ttt/"
            copied_notice_ms = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url(), "https://games.example.org/ttt/");
        assert_eq!(config.copied_notice(), Duration::from_millis(500));
        assert_eq!(config.db_path(), "tictactoe_share.db");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(AppConfig::from_toml(r#"base_url = "not a url""#).is_err());
    }

    #[test]
    fn test_memory_store_selection() {
        let config = AppConfig::default().with_db_path(MEMORY_DB.to_string());
        assert!(config.uses_memory_store());
    }
}
