//! # Cart Configuration
//!
//! Settings for the cart provider, resolved in layers:
//!
//! 1. [`CartConfig::default`]
//! 2. A TOML file ([`CartConfig::load`]) or string ([`CartConfig::from_toml_str`])
//! 3. Environment overrides ([`CartConfig::apply_env`])
//!
//! ```toml
//! storage_key = "@GoMarketplace:products"
//! channel_capacity = 32
//! storage_path = "/var/lib/app/storage.json"
//! ```

use crate::cart_actor::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Overrides `storage_key`.
pub const ENV_STORAGE_KEY: &str = "CART_STORAGE_KEY";
/// Overrides `storage_path`.
pub const ENV_STORAGE_PATH: &str = "CART_STORAGE_PATH";
/// Overrides `channel_capacity`.
pub const ENV_CHANNEL_CAPACITY: &str = "CART_CHANNEL_CAPACITY";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Storage key holding the JSON array of cart lines.
    pub storage_key: String,
    /// Capacity of the request channel in front of the cart actor.
    pub channel_capacity: usize,
    /// JSON document used by [`FileStorage`](crate::storage::FileStorage).
    /// `None` keeps the cart in memory only.
    pub storage_path: Option<PathBuf>,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            channel_capacity: 32,
            storage_path: None,
        }
    }
}

impl CartConfig {
    /// Parses and validates a TOML document. Missing fields keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CartConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// - If the file doesn't exist, returns `CartConfig::default()`.
    /// - Otherwise parses and validates it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_env_from(|name| std::env::var(name).ok())
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_env_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(key) = lookup(ENV_STORAGE_KEY) {
            self.storage_key = key;
        }
        if let Some(path) = lookup(ENV_STORAGE_PATH) {
            self.storage_path = (!path.is_empty()).then(|| PathBuf::from(path));
        }
        if let Some(capacity) = lookup(ENV_CHANNEL_CAPACITY) {
            self.channel_capacity = capacity.trim().parse().map_err(|_| {
                ConfigError::ValidationError {
                    message: format!("{ENV_CHANNEL_CAPACITY} must be a number, got '{capacity}'"),
                }
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The storage key is not empty
    /// - The channel capacity is at least one
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "storage_key must not be empty".to_string(),
            });
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::ValidationError {
                message: "channel_capacity must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
