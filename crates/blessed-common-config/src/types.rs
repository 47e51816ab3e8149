//! Configuration types.

use std::path::PathBuf;

use blessed_core::{ArgPosition, Interpolation};
use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlessedConfig {
    /// Message formatting.
    pub messages: MessageConfig,
    /// Delegate construction defaults.
    pub delegation: DelegationConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

/// Message formatting configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    /// Placeholder substitution mode for user templates.
    pub interpolation: Interpolation,
}

/// Delegate construction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelegationConfig {
    /// Receiver position for delegates: an index, or `last`.
    pub default_position: String,
}

impl Default for DelegationConfig {
    fn default() -> Self {
        Self {
            default_position: "0".to_string(),
        }
    }
}

impl DelegationConfig {
    /// Parsed receiver position.
    pub fn position(&self) -> Option<ArgPosition> {
        self.default_position.parse().ok()
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level: trace, debug, info, warn, error.
    pub level: String,
    /// Output format: pretty, compact, json.
    pub format: String,
    /// Optional log file, written in addition to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Accepted values for `logging.level`.
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "warning", "error"];

/// Accepted values for `logging.format`.
pub const LOG_FORMATS: [&str; 3] = ["pretty", "compact", "json"];
