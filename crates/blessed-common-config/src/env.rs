//! Environment variable handling.

use std::env;
use std::path::Path;

use blessed_core::{ArgPosition, Interpolation};
use thiserror::Error;

use crate::types::BlessedConfig;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("failed to load .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),
}

/// Environment variable names.
pub mod vars {
    pub const BLESSED_INTERPOLATION: &str = "BLESSED_INTERPOLATION";
    pub const BLESSED_DEFAULT_ARG: &str = "BLESSED_DEFAULT_ARG";
    pub const BLESSED_LOG_LEVEL: &str = "BLESSED_LOG_LEVEL";
    pub const BLESSED_LOG_FORMAT: &str = "BLESSED_LOG_FORMAT";
    pub const BLESSED_ENV: &str = "BLESSED_ENV";
}

/// Environment configuration.
pub struct Environment {
    _guard: (),
}

impl Environment {
    /// Initialize environment from .env files in the current directory.
    pub fn init() -> Result<Self, EnvError> {
        Self::init_in(&env::current_dir().unwrap_or_default())
    }

    /// Load `.env`, `.env.local` and `.env.$BLESSED_ENV` from `dir`.
    ///
    /// Missing files are skipped; a file that fails to parse is an error.
    /// Variables already set in the process are never overwritten.
    pub fn init_in(dir: &Path) -> Result<Self, EnvError> {
        load_optional(&dir.join(".env"))?;
        load_optional(&dir.join(".env.local"))?;

        if let Ok(name) = env::var(vars::BLESSED_ENV) {
            load_optional(&dir.join(format!(".env.{name}")))?;
        }

        Ok(Self { _guard: () })
    }

    /// Get an optional string variable.
    pub fn get(var: &str) -> Option<String> {
        env::var(var).ok()
    }

    /// Apply `BLESSED_*` overrides on top of a loaded config.
    pub fn apply_overrides(config: &mut BlessedConfig) -> Result<(), EnvError> {
        if let Some(mode) = Self::get(vars::BLESSED_INTERPOLATION) {
            config.messages.interpolation =
                Interpolation::parse(&mode).ok_or_else(|| EnvError::InvalidValue {
                    var: vars::BLESSED_INTERPOLATION.to_string(),
                    message: "expected 'first_occurrence' or 'global'".to_string(),
                })?;
        }

        if let Some(position) = Self::get(vars::BLESSED_DEFAULT_ARG) {
            position
                .parse::<ArgPosition>()
                .map_err(|e| EnvError::InvalidValue {
                    var: vars::BLESSED_DEFAULT_ARG.to_string(),
                    message: e.to_string(),
                })?;
            config.delegation.default_position = position;
        }

        if let Some(level) = Self::get(vars::BLESSED_LOG_LEVEL) {
            config.logging.level = level;
        }

        if let Some(format) = Self::get(vars::BLESSED_LOG_FORMAT) {
            config.logging.format = format;
        }

        Ok(())
    }
}

fn load_optional(path: &Path) -> Result<(), EnvError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.into()),
    }
}
