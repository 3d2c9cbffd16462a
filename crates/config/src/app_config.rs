//! Application-level configuration section

use crate::validation::{ConfigSection, ValidationError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Log level for application logging
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    /// Filter string understood by `env_logger`
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == wanted)
            .ok_or_else(|| {
                ValidationError::with_value(
                    "app.log_level",
                    "must be one of: error, warn, info, debug, trace",
                    s,
                )
            })
    }
}

/// Application-level settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Default log level; `RUST_LOG` still takes precedence
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
        }
    }
}

impl ConfigSection for AppConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        // every LogLevel is valid
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Error.to_string(), "error");
        assert_eq!(LogLevel::Info.to_string(), "info");
    }

    #[test]
    fn test_log_level_from_str() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!(" TRACE ".parse::<LogLevel>().unwrap(), LogLevel::Trace);

        let err = "loud".parse::<LogLevel>().unwrap_err();
        assert_eq!(err.field, "app.log_level");
        assert_eq!(err.value.as_deref(), Some("loud"));
    }
}
