//! Common test utilities for CLI testing.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use tempfile::{tempdir, TempDir};

/// Test context with a temporary project directory
pub struct TestContext {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join(".blessed").join("config.yaml");

        Self {
            temp_dir,
            config_path,
        }
    }

    /// Write `.blessed/config.yaml` in the project directory
    pub fn with_config(self, config: &str) -> Self {
        let dir = self.config_path.parent().expect("config dir");
        std::fs::create_dir_all(dir).expect("Failed to create config dir");
        std::fs::write(&self.config_path, config).expect("Failed to write config");
        self
    }

    /// Get path to temp directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a command running in the project directory with a clean
    /// `BLESSED_*` environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("blessed").expect("Binary not found");
        cmd.current_dir(self.path())
            .env_remove("BLESSED_CONFIG")
            .env_remove("BLESSED_INTERPOLATION")
            .env_remove("BLESSED_DEFAULT_ARG")
            .env_remove("BLESSED_LOG_LEVEL")
            .env_remove("BLESSED_LOG_FORMAT")
            .env_remove("BLESSED_ENV")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Assert helpers for CLI output
pub trait OutputAssertions {
    fn assert_success(&self);
    fn assert_exit_code(&self, code: i32);
    fn stdout_text(&self) -> String;
}

impl OutputAssertions for Output {
    fn assert_success(&self) {
        assert!(
            self.status.success(),
            "Command failed with status: {}\nstderr: {}",
            self.status,
            String::from_utf8_lossy(&self.stderr)
        );
    }

    fn assert_exit_code(&self, code: i32) {
        assert_eq!(
            self.status.code(),
            Some(code),
            "Expected exit code {}, got {:?}\nstderr: {}",
            code,
            self.status.code(),
            String::from_utf8_lossy(&self.stderr)
        );
    }

    fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

/// Parse JSON written to stdout
pub fn parse_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("Failed to parse JSON output")
}
