use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/retail-directory/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("retail-directory").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise parses and validates it.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads configuration from an explicit path. A missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Page size and pre-render depth are at least 1
    /// - The UI tick rate and idle poll are non-zero
    /// - The source location is not blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.directory.page_size == 0 {
            return Err(ConfigError::ValidationError {
                message: "directory.page_size must be at least 1".to_string(),
            });
        }

        if self.directory.prefetch_depth == 0 {
            return Err(ConfigError::ValidationError {
                message: "directory.prefetch_depth must be at least 1".to_string(),
            });
        }

        if self.ui.tick_rate_ms == 0 || self.ui.idle_poll_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "ui.tick_rate_ms and ui.idle_poll_ms must be non-zero".to_string(),
            });
        }

        if self.source.location.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "source.location must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
