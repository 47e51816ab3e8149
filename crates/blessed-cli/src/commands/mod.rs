//! Subcommand implementations.

mod config;
mod demo;
mod interpolate;
mod messages;

pub use config::ConfigCommand;
pub use demo::DemoCommand;
pub use interpolate::InterpolateCommand;
pub use messages::MessagesCommand;
