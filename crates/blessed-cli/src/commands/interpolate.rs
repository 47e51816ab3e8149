//! Interpolate command implementation.

use blessed_core::{Interpolation, Value};
use clap::Parser;
use serde::Serialize;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Fill a template's {0}, {1}, ... placeholders
#[derive(Debug, Parser)]
pub struct InterpolateCommand {
    /// Template text
    pub template: String,

    /// Values for {0}, {1}, ...
    pub args: Vec<String>,

    /// Replace every occurrence of a placeholder, not just the first
    #[arg(short, long)]
    pub global: bool,
}

#[derive(Debug, Serialize)]
struct InterpolateOutput {
    template: String,
    mode: Interpolation,
    result: String,
}

impl FormattedOutput for InterpolateOutput {
    fn format_text(&self) -> String {
        self.result.clone()
    }
}

impl InterpolateCommand {
    /// The `--global` flag wins over the configured mode.
    fn mode(&self, ctx: &CommandContext) -> Interpolation {
        if self.global {
            Interpolation::Global
        } else {
            ctx.config.messages.interpolation
        }
    }

    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let mode = self.mode(ctx);
        let args: Vec<Value> = self.args.iter().map(|a| Value::from(a.as_str())).collect();
        let result = mode
            .apply(Some(&self.template), &args)
            .unwrap_or_default();

        print_output(
            ctx,
            &InterpolateOutput {
                template: self.template.clone(),
                mode,
                result,
            },
        )
    }
}
