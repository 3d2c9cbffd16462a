//! Configuration manager - main API for config operations

use crate::persistence::ConfigPersistence;
use crate::{Config, ConfigError, ConfigResult, LogLevel};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Overrides `[storage] path`
pub const ENV_STORAGE_PATH: &str = "BOOKSHELF_STORAGE_PATH";

/// Overrides `[app] log_level`
pub const ENV_LOG_LEVEL: &str = "BOOKSHELF_LOG_LEVEL";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Main configuration manager
///
/// Handles file paths, defaults, validation and environment overrides.
pub struct ConfigManager {
    persistence: ConfigPersistence,
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager using the default config directory
    ///
    /// - Linux: `~/.config/bookshelf/`
    /// - macOS: `~/Library/Application Support/bookshelf/`
    /// - Windows: `%APPDATA%\bookshelf\`
    pub fn new() -> ConfigResult<Self> {
        let config_dir = Self::default_config_dir()?;
        Self::with_directory(config_dir)
    }

    /// Creates a config manager with a custom config directory
    pub fn with_directory(config_dir: PathBuf) -> ConfigResult<Self> {
        let persistence = ConfigPersistence::new(config_dir.join(CONFIG_FILE_NAME));

        Ok(Self {
            persistence,
            config_dir,
        })
    }

    fn default_config_dir() -> ConfigResult<PathBuf> {
        ProjectDirs::from("", "", "bookshelf")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| ConfigError::PathResolutionError {
                reason: "Could not determine user config directory".to_string(),
            })
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    /// Returns the full config file path
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Loads the configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file is empty or corrupted, returns an error.
    pub fn load(&self) -> ConfigResult<Config> {
        self.persistence.load()
    }

    /// Loads the configuration, falling back to defaults on any error
    pub fn load_or_default(&self) -> Config {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config: {}, using defaults", e);
                Config::default()
            }
        }
    }

    /// Validates and atomically saves the configuration
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.persistence.save(config)
    }

    /// Writes a default config file if one doesn't exist
    ///
    /// Returns Ok(true) if a new file was created, Ok(false) if one already exists.
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path().exists() {
            log::info!(
                "Config file already exists at {}",
                self.config_path().display()
            );
            return Ok(false);
        }

        self.persistence.write_default()?;
        Ok(true)
    }

    /// Overwrites the config file with default values
    pub fn reset(&self) -> ConfigResult<()> {
        self.save(&Config::default())
    }

    /// Validates the current configuration file
    ///
    /// Returns all validation messages; an empty list means the file is valid.
    pub fn validate(&self) -> ConfigResult<Vec<String>> {
        let config = self.load()?;

        match config.validate() {
            Ok(()) => Ok(Vec::new()),
            Err(errors) => Ok(errors.iter().map(|e| e.to_string()).collect()),
        }
    }

    /// Loads the config file and applies `BOOKSHELF_*` environment overrides
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let mut config = self.load()?;
        Self::apply_overrides(&mut config, |name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Applies overrides looked up through `lookup`
    ///
    /// An unparsable log level is an error; other values are checked by the
    /// usual validation, which only warns.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_STORAGE_PATH) {
            log::debug!("Storage path override: {}", path);
            config.storage.path = PathBuf::from(path);
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.app.log_level =
                level
                    .parse::<LogLevel>()
                    .map_err(|_| ConfigError::InvalidOverride {
                        name: ENV_LOG_LEVEL,
                        value: level.clone(),
                    })?;
            log::debug!("Log level override: {}", config.app.log_level);
        }

        if let Err(errors) = config.validate() {
            log::warn!(
                "Config validation warnings after env overrides: {}",
                ConfigError::from_validation(&errors)
            );
        }

        Ok(())
    }
}
