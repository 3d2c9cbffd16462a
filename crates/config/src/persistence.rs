//! File system persistence for configuration
//!
//! Writes go to a temporary file in the same directory and are renamed over
//! the config file, so a crash never leaves a half-written config behind.

use crate::{Config, ConfigError, ConfigResult, CONFIG_VERSION};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Handles configuration file persistence
pub struct ConfigPersistence {
    config_path: PathBuf,
}

impl ConfigPersistence {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Loads configuration from file
    ///
    /// A missing file yields the default config. An empty or unparsable file
    /// is an error. Values that fail validation are only logged so the user
    /// can still fix them by hand.
    pub fn load(&self) -> ConfigResult<Config> {
        if !self.config_path.exists() {
            log::info!(
                "Config file not found at {}, using defaults",
                self.config_path.display()
            );
            return Ok(Config::default());
        }

        let contents =
            fs::read_to_string(&self.config_path).map_err(|e| ConfigError::ReadError {
                path: self.config_path.clone(),
                source: e,
            })?;

        if contents.trim().is_empty() {
            return Err(ConfigError::ReadError {
                path: self.config_path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "Config file is empty or contains only whitespace",
                ),
            });
        }

        let config: Config = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: self.config_path.clone(),
            source: e,
        })?;

        if config.version > CONFIG_VERSION {
            log::warn!(
                "Config version {} is newer than supported version {}",
                config.version,
                CONFIG_VERSION
            );
        }

        if let Err(errors) = config.validate() {
            log::warn!(
                "Config validation warnings: {}",
                ConfigError::from_validation(&errors)
            );
        }

        Ok(config)
    }

    /// Validates and saves configuration atomically
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        if let Err(errors) = config.validate() {
            return Err(ConfigError::from_validation(&errors));
        }

        if let Some(parent) = self.config_path.parent() {
            self.ensure_directory_exists(parent)?;
        }

        let toml_string = toml::to_string_pretty(config)?;

        let temp_file = self.create_temp_file()?;
        self.write_atomic(temp_file, &toml_string)?;

        log::info!("Config saved to {}", self.config_path.display());
        Ok(())
    }

    fn ensure_directory_exists(&self, path: &Path) -> ConfigResult<()> {
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path).map_err(|e| ConfigError::DirectoryCreationError {
                path: path.to_path_buf(),
                source: e,
            })?;
            log::info!("Created config directory: {}", path.display());
        }
        Ok(())
    }

    /// Creates a temporary file in the same directory as the config file
    fn create_temp_file(&self) -> ConfigResult<NamedTempFile> {
        let dir = match self.config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        NamedTempFile::new_in(dir).map_err(ConfigError::IoError)
    }

    fn write_atomic(&self, mut temp_file: NamedTempFile, content: &str) -> ConfigResult<()> {
        temp_file
            .write_all(content.as_bytes())
            .map_err(ConfigError::IoError)?;
        temp_file.flush().map_err(ConfigError::IoError)?;

        temp_file
            .persist(&self.config_path)
            .map_err(|e| ConfigError::WriteError {
                path: self.config_path.clone(),
                source: e.error,
            })?;

        Ok(())
    }

    /// Writes a config file containing only default values
    pub fn write_default(&self) -> ConfigResult<()> {
        self.save(&Config::default())?;
        log::info!("Generated default config at {}", self.config_path.display());
        Ok(())
    }
}
