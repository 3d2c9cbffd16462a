//! Bookshelf configuration
//!
//! Settings live in a TOML file in the platform config directory. Each
//! section implements [`ConfigSection`], so validation collects every
//! problem across the whole file instead of stopping at the first.
//!
//! # Example
//!
//! ```rust,no_run
//! use bookshelf_config::{Config, ConfigManager};
//!
//! let manager = ConfigManager::new().expect("Failed to initialize config");
//! let config = manager.load().unwrap_or_else(|e| {
//!     eprintln!("Config error: {}, using defaults", e);
//!     Config::default()
//! });
//!
//! println!("Storage: {}", config.storage.path.display());
//! ```

mod error;
mod manager;
mod persistence;
mod validation;

pub mod app_config;
pub mod storage_config;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::{ConfigManager, ENV_LOG_LEVEL, ENV_STORAGE_PATH};
pub use validation::{ConfigSection, Validator};

pub use app_config::{AppConfig, LogLevel};
pub use storage_config::StorageConfig;

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    pub version: u32,

    /// Application-level settings
    pub app: AppConfig,

    /// Where the book collection is stored
    pub storage: StorageConfig,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the entire configuration
    ///
    /// Returns all validation errors found across all sections.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(mut e) = self.app.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.storage.validate() {
            errors.append(&mut e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}
