//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use blessed_common_config::{BlessedConfig, ConfigLoader, Environment};
use clap::{ArgAction, Parser, Subcommand, ValueHint};
use tracing::debug;

use crate::commands::{ConfigCommand, DemoCommand, InterpolateCommand, MessagesCommand};
use crate::error::CliError;

/// Blessed - mixin, delegation and prototype-linking helpers
#[derive(Debug, Parser)]
#[command(
    name = "blessed",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase verbosity level"
    )]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error log output"
    )]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "BLESSED_CONFIG",
        value_hint = ValueHint::FilePath,
        help = "Path to configuration file"
    )]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_enum,
        help = "Output format (text, json)"
    )]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the error message table
    Messages(MessagesCommand),

    /// Fill a template's {0}, {1}, ... placeholders
    Interpolate(InterpolateCommand),

    /// Walk through extend, mixin, bless and delegate construction
    Demo(DemoCommand),

    /// Inspect configuration
    Config(ConfigCommand),
}

impl Command {
    /// Whether this command writes the config file rather than reading it.
    fn creates_config(&self) -> bool {
        matches!(self, Command::Config(cmd) if cmd.creates_config())
    }
}

impl Cli {
    /// Load configuration from the given file, or `.blessed/config.yaml`
    /// under the current directory, then apply `BLESSED_*` overrides.
    /// `config init` starts from defaults without reading any file.
    pub fn load_config(&self) -> Result<BlessedConfig, CliError> {
        Environment::init()?;

        let mut config = match &self.config {
            _ if self.command.creates_config() => BlessedConfig::default(),
            Some(path) => {
                debug!(path = %path.display(), "loading explicit config");
                ConfigLoader::load_file(path)?
            }
            None => ConfigLoader::default().load()?,
        };

        Environment::apply_overrides(&mut config)?;
        Ok(config)
    }

    /// Execute the selected command
    pub fn execute(self, config: BlessedConfig) -> Result<(), CliError> {
        let ctx = CommandContext {
            config,
            config_path: self.config,
            format: self.format,
        };

        match self.command {
            Command::Messages(cmd) => cmd.execute(&ctx),
            Command::Interpolate(cmd) => cmd.execute(&ctx),
            Command::Demo(cmd) => cmd.execute(&ctx),
            Command::Config(cmd) => cmd.execute(&ctx),
        }
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: BlessedConfig,
    /// Explicit config file from `--config` or `BLESSED_CONFIG`.
    pub config_path: Option<PathBuf>,
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["blessed", "messages", "--format", "json", "-vv"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Messages(_)));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["blessed", "-q", "-v", "demo"]).is_err());
    }
}
