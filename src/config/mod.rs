//! Configuration module for desk
//!
//! Manages the default vault location and engine tuning knobs.
//! Configuration is stored in the user's config directory.

use crate::search::SortOption;
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DeskConfig {
    /// Vault root used when none is given on the command line
    pub vault: Option<PathBuf>,

    /// Results revealed per batch
    pub batch_size: usize,

    /// Time allowed between completed document fetches, in milliseconds
    pub fetch_timeout_ms: u64,

    /// Cap on narrowed suggestions
    pub max_suggestions: usize,

    /// Number of document bodies kept in memory by the filesystem vault
    pub body_cache_capacity: u64,

    /// Suppress informational output by default
    pub quiet: bool,

    /// Sort applied when none is requested
    pub default_sort: Option<SortOption>,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            vault: None,
            batch_size: crate::session::BATCH_SIZE,
            fetch_timeout_ms: 5000,
            max_suggestions: crate::suggest::MAX_SUGGESTIONS,
            body_cache_capacity: crate::vault::fs::DEFAULT_CACHE_CAPACITY,
            quiet: false,
            default_sort: None,
        }
    }
}

impl DeskConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("desk").join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the user's config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config path cannot be determined or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Vault to open: the explicit one if given, else the configured one
    #[must_use]
    pub fn vault_root(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.vault.clone())
    }
}
