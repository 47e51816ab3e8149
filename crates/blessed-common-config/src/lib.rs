//! Configuration types for Blessed.
//!
//! This crate provides the configuration used by the `blessed` tool, read
//! from `.blessed/config.yaml` with `BLESSED_*` environment overrides.

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;
