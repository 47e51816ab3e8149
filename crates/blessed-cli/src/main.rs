//! Blessed CLI
//!
//! Main entry point for the `blessed` binary.

use std::process::ExitCode;

use blessed_common_log::{LogConfig, LogLevel};
use clap::Parser;

mod cli;
mod commands;
mod error;
mod output;

use blessed_common_config::BlessedConfig;
use cli::Cli;
use error::CliError;

/// Application exit codes
#[repr(u8)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
    ConfigError = 2,
    IoError = 3,
    ValidationError = 5,
    CompositionError = 6,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code().into()
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.load_config()?;
    init_logging(&cli, &config);
    cli.execute(config)
}

fn init_logging(cli: &Cli, config: &BlessedConfig) {
    let mut log = LogConfig::from_settings(
        &config.logging.level,
        &config.logging.format,
        config.logging.file.clone(),
    );
    log.level = if cli.quiet {
        LogLevel::Error
    } else {
        log.level.raised_by(cli.verbose)
    };
    log.source_location = cli.verbose >= 3;

    if let Err(e) = blessed_common_log::init(log) {
        eprintln!("warning: {e}");
    }
}
