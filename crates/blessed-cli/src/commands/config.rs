//! Config command implementation.

use std::path::PathBuf;

use blessed_common_config::{BlessedConfig, ConfigLoader};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Inspect configuration
#[derive(Debug, Parser)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config actions
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration after file and environment overrides
    Show,

    /// Print the config file in use: `--config` if given, else the project file
    Path,

    /// Write a default config to `--config`, or `.blessed/config.yaml` here
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl FormattedOutput for BlessedConfig {
    fn format_text(&self) -> String {
        serde_yaml::to_string(self).unwrap_or_else(|e| format!("# failed to render config: {e}"))
    }
}

impl ConfigCommand {
    pub(crate) fn creates_config(&self) -> bool {
        matches!(self.action, ConfigAction::Init { .. })
    }

    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        match self.action {
            ConfigAction::Show => print_output(ctx, &ctx.config),
            ConfigAction::Path => {
                println!("{}", config_file(ctx).display());
                Ok(())
            }
            ConfigAction::Init { force } => {
                let path = config_file(ctx);
                if path.exists() && !force {
                    return Err(CliError::validation(
                        "config",
                        format!("{} already exists (use --force to overwrite)", path.display()),
                    ));
                }
                ConfigLoader::save_file(&path, &BlessedConfig::default())?;
                info!(path = %path.display(), "wrote default config");
                println!("{}", path.display());
                Ok(())
            }
        }
    }
}

fn config_file(ctx: &CommandContext) -> PathBuf {
    ctx.config_path
        .clone()
        .unwrap_or_else(|| ConfigLoader::default().config_path())
}
