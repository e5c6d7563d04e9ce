//! Application configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use hooks_tictactoe::RestartPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Settings shared by every exercise.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// JSON file holding persisted state.
    #[serde(default = "default_storage_path")]
    storage_path: PathBuf,

    /// What restarting a game does with its history.
    #[serde(default)]
    restart_policy: RestartPolicy,

    /// Base URL the fetch panel appends names to.
    #[serde(default = "default_fetch_base_url")]
    fetch_base_url: String,

    /// Greeting name used until one is saved.
    #[serde(default)]
    initial_name: String,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("hooks_state.json")
}

fn default_fetch_base_url() -> String {
    "https://pokeapi.co/api/v2/pokemon".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            restart_policy: RestartPolicy::default(),
            fetch_base_url: default_fetch_base_url(),
            initial_name: String::new(),
        }
    }
}

impl AppConfig {
    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file, or defaults if it is absent.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        debug!("Loading config from file");
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;

        info!(storage = %config.storage_path.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Points persisted state at another file.
    pub fn with_storage_path(mut self, storage_path: PathBuf) -> Self {
        self.storage_path = storage_path;
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
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_overrides_parse() {
        let config = AppConfig::from_toml(
            r#"
            storage_path = "/tmp/state.json"
            restart_policy = "keep-history"
            initial_name = "Ada"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage_path(), &PathBuf::from("/tmp/state.json"));
        assert_eq!(*config.restart_policy(), RestartPolicy::KeepHistory);
        assert_eq!(config.initial_name(), "Ada");
        assert_eq!(config.fetch_base_url(), &default_fetch_base_url());
    }

    #[test]
    fn test_unknown_policy_is_error() {
        let result = AppConfig::from_toml(r#"restart_policy = "sometimes""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(dir.path().join("hooks.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
