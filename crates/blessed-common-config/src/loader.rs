//! Configuration file loading and parsing.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::types::{BlessedConfig, LOG_FORMATS, LOG_LEVELS};

/// Directory holding the config file, relative to the project root.
pub const CONFIG_DIR: &str = ".blessed";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yaml";

static ENV_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").expect("env reference pattern"));

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

/// Configuration loader.
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given project directory.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            base_path: project_dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the project config file.
    pub fn config_path(&self) -> PathBuf {
        self.base_path.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load `.blessed/config.yaml`, or defaults when the file is absent.
    pub fn load(&self) -> Result<BlessedConfig, ConfigError> {
        let config_path = self.config_path();
        if !config_path.exists() {
            return Ok(BlessedConfig::default());
        }
        Self::load_file(&config_path)
    }

    /// Load an explicit config file. Unlike [`load`](Self::load) a missing
    /// file is an error.
    pub fn load_file(path: &Path) -> Result<BlessedConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let expanded = expand_env_vars(&contents)?;

        let config: BlessedConfig =
            serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        validate(&config)?;
        Ok(config)
    }

    /// Save configuration to the project config file.
    pub fn save(&self, config: &BlessedConfig) -> Result<(), ConfigError> {
        Self::save_file(&self.config_path(), config)
    }

    /// Save configuration to an explicit path, creating parent directories.
    pub fn save_file(path: &Path, config: &BlessedConfig) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }

        let yaml = serde_yaml::to_string(config).map_err(|e| ConfigError::ParseError {
            line: None,
            message: e.to_string(),
        })?;

        std::fs::write(path, yaml)?;
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}

/// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
pub fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
    let mut result = content.to_string();

    for cap in ENV_REFERENCE.captures_iter(content) {
        let full_match = &cap[0];
        let var_name = &cap[1];
        let default = cap.get(2).map(|m| m.as_str());

        let value = match std::env::var(var_name) {
            Ok(v) => v,
            Err(_) => match default {
                Some(d) => d.to_string(),
                None => {
                    return Err(ConfigError::EnvVarNotFound {
                        var: var_name.to_string(),
                    })
                }
            },
        };

        result = result.replace(full_match, &value);
    }

    Ok(result)
}

/// Validate configuration values.
pub fn validate(config: &BlessedConfig) -> Result<(), ConfigError> {
    if config.delegation.position().is_none() {
        return Err(ConfigError::ValidationError {
            message: format!(
                "delegation.default_position must be a non-negative index or 'last', got '{}'",
                config.delegation.default_position
            ),
        });
    }

    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(ConfigError::ValidationError {
            message: format!("logging.level must be one of {}", LOG_LEVELS.join(", ")),
        });
    }

    let format = config.logging.format.to_lowercase();
    if !LOG_FORMATS.contains(&format.as_str()) {
        return Err(ConfigError::ValidationError {
            message: format!("logging.format must be one of {}", LOG_FORMATS.join(", ")),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blessed_core::{ArgPosition, Interpolation};
    use std::fs;
    use tempfile::tempdir;

    fn write_config(dir: &Path, content: &str) {
        let config_dir = dir.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(CONFIG_FILE), content).unwrap();
    }

    #[test]
    fn test_load_defaults_when_no_file() {
        let dir = tempdir().unwrap();
        let config = ConfigLoader::new(dir.path()).load().unwrap();
        assert_eq!(config, BlessedConfig::default());
        assert_eq!(config.delegation.position(), Some(ArgPosition::Index(0)));
    }

    #[test]
    fn test_load_config_from_yaml_file() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
messages:
  interpolation: global
delegation:
  default_position: last
logging:
  level: debug
"#,
        );

        let config = ConfigLoader::new(dir.path()).load().unwrap();
        assert_eq!(config.messages.interpolation, Interpolation::Global);
        assert_eq!(config.delegation.position(), Some(ArgPosition::Last));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_file_missing_is_error() {
        let dir = tempdir().unwrap();
        let result = ConfigLoader::load_file(&dir.path().join("nope.yaml"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_env_var_default() {
        let result = expand_env_vars("key: ${BLESSED_TEST_NONEXISTENT:-default}").unwrap();
        assert_eq!(result, "key: default");
    }

    #[test]
    fn test_env_var_missing_error() {
        let result = expand_env_vars("key: ${BLESSED_TEST_MISSING_VAR}");
        match result.unwrap_err() {
            ConfigError::EnvVarNotFound { var } => assert_eq!(var, "BLESSED_TEST_MISSING_VAR"),
            other => panic!("Expected EnvVarNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_env_var_expansion_in_config() {
        std::env::set_var("BLESSED_TEST_POSITION", "2");

        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
delegation:
  default_position: "${BLESSED_TEST_POSITION}"
logging:
  level: ${BLESSED_TEST_LEVEL:-info}
"#,
        );

        let config = ConfigLoader::new(dir.path()).load().unwrap();
        assert_eq!(config.delegation.position(), Some(ArgPosition::Index(2)));
        assert_eq!(config.logging.level, "info");

        std::env::remove_var("BLESSED_TEST_POSITION");
    }

    #[test]
    fn test_validation_errors() {
        let mut config = BlessedConfig::default();
        config.delegation.default_position = "-1".to_string();
        match validate(&config).unwrap_err() {
            ConfigError::ValidationError { message } => {
                assert!(message.contains("default_position"));
            }
            other => panic!("Expected ValidationError, got {other:?}"),
        }

        let mut config = BlessedConfig::default();
        config.logging.level = "loud".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::ValidationError { .. })));

        let mut config = BlessedConfig::default();
        config.logging.format = "xml".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn test_parse_error_with_line_number() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
messages:
  interpolation: [unclosed
"#,
        );

        match ConfigLoader::new(dir.path()).load().unwrap_err() {
            ConfigError::ParseError { line, .. } => assert!(line.is_some()),
            other => panic!("Expected ParseError with line number, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_interpolation_mode_rejected() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "messages:\n  interpolation: sometimes\n");
        assert!(matches!(
            ConfigLoader::new(dir.path()).load(),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_save_file_to_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("blessed.yaml");

        let mut config = BlessedConfig::default();
        config.logging.level = "debug".to_string();
        ConfigLoader::save_file(&path, &config).unwrap();

        assert_eq!(ConfigLoader::load_file(&path).unwrap(), config);
    }

    #[test]
    fn test_save_config() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path());

        let mut config = BlessedConfig::default();
        config.messages.interpolation = Interpolation::Global;
        config.delegation.default_position = "last".to_string();
        loader.save(&config).unwrap();

        assert!(loader.config_path().exists());
        assert_eq!(loader.load().unwrap(), config);
    }
}
