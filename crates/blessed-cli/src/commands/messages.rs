//! Messages command implementation.

use blessed_core::{MessageKey, Value, MESSAGES};
use clap::Parser;
use serde::Serialize;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// List the error message table, or render one entry
#[derive(Debug, Parser)]
pub struct MessagesCommand {
    /// Render only this key (e.g. ARGUMENT_NULL)
    pub key: Option<String>,

    /// Values substituted for {0}, {1}, ... when a key is given
    #[arg(short, long = "arg", requires = "key")]
    pub args: Vec<String>,
}

#[derive(Debug, Serialize)]
struct MessageEntry {
    key: MessageKey,
    template: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    rendered: Option<String>,
}

#[derive(Debug, Serialize)]
struct MessageTable {
    messages: Vec<MessageEntry>,
}

impl FormattedOutput for MessageTable {
    fn format_text(&self) -> String {
        let width = self
            .messages
            .iter()
            .map(|entry| entry.key.as_str().len())
            .max()
            .unwrap_or(0);

        self.messages
            .iter()
            .map(|entry| {
                let text = entry.rendered.as_deref().unwrap_or(entry.template);
                format!("{:<width$}  {text}", entry.key.as_str())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl MessagesCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let table = match &self.key {
            None => MessageTable {
                messages: MESSAGES
                    .iter()
                    .map(|&(key, template)| MessageEntry {
                        key,
                        template,
                        rendered: None,
                    })
                    .collect(),
            },
            Some(name) => {
                let key = MessageKey::parse(&name.to_uppercase()).ok_or_else(|| {
                    CliError::validation("key", format!("unknown message key '{name}'"))
                })?;
                let args: Vec<Value> = self.args.iter().map(|a| Value::from(a.as_str())).collect();
                MessageTable {
                    messages: vec![MessageEntry {
                        key,
                        template: key.template(),
                        rendered: Some(key.format(&args)),
                    }],
                }
            }
        };

        print_output(ctx, &table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_table_aligns_keys() {
        let table = MessageTable {
            messages: vec![
                MessageEntry {
                    key: MessageKey::ArgumentNull,
                    template: MessageKey::ArgumentNull.template(),
                    rendered: None,
                },
                MessageEntry {
                    key: MessageKey::WrongType,
                    template: MessageKey::WrongType.template(),
                    rendered: Some("custom".to_string()),
                },
            ],
        };

        let text = table.format_text();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ARGUMENT_NULL  Argument '{0}'"));
        assert_eq!(lines[1], "WRONG_TYPE     custom");
    }

    #[test]
    fn test_json_uses_key_names() {
        let table = MessageTable {
            messages: vec![MessageEntry {
                key: MessageKey::AlreadyExtended,
                template: MessageKey::AlreadyExtended.template(),
                rendered: None,
            }],
        };

        let json: serde_json::Value =
            serde_json::from_str(&table.format_json().unwrap()).unwrap();
        assert_eq!(json["messages"][0]["key"], "ALREADY_EXTENDED");
        assert!(json["messages"][0].get("rendered").is_none());
    }
}
