//! Error message table and positional template formatting.
//!
//! Every error raised by this crate is rendered from one of the templates
//! in [`MESSAGES`]. Consumers may rely on the [`MessageKey`] names, not on
//! the exact wording.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Symbolic name of an error message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageKey {
    /// A required argument was null or undefined.
    ArgumentNull,
    /// A function was expected.
    NotAFunction,
    /// A number was expected.
    NotANumber,
    /// A numeric argument was below zero.
    NegativeArgument,
    /// An argument had the wrong kind of value.
    WrongType,
    /// An interface member is missing.
    UnimplementedMember,
    /// A constructor prototype already carries its own members.
    ExtendedProperty,
    /// A constructor prototype was already relinked.
    AlreadyExtended,
    /// A prototype assignment would loop back on itself.
    CyclicPrototype,
    /// No super-constructor was recorded.
    NoSuperConstructor,
}

impl MessageKey {
    /// Every key, in table order.
    pub const ALL: [MessageKey; 10] = [
        MessageKey::ArgumentNull,
        MessageKey::NotAFunction,
        MessageKey::NotANumber,
        MessageKey::NegativeArgument,
        MessageKey::WrongType,
        MessageKey::UnimplementedMember,
        MessageKey::ExtendedProperty,
        MessageKey::AlreadyExtended,
        MessageKey::CyclicPrototype,
        MessageKey::NoSuperConstructor,
    ];

    /// Key name as it appears in serialized output.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ArgumentNull => "ARGUMENT_NULL",
            Self::NotAFunction => "NOT_A_FUNCTION",
            Self::NotANumber => "NOT_A_NUMBER",
            Self::NegativeArgument => "NEGATIVE_ARGUMENT",
            Self::WrongType => "WRONG_TYPE",
            Self::UnimplementedMember => "UNIMPLEMENTED_MEMBER",
            Self::ExtendedProperty => "EXTENDED_PROPERTY",
            Self::AlreadyExtended => "ALREADY_EXTENDED",
            Self::CyclicPrototype => "CYCLIC_PROTOTYPE",
            Self::NoSuperConstructor => "NO_SUPER_CONSTRUCTOR",
        }
    }

    /// Template text with `{0}`, `{1}`, ... placeholders.
    pub const fn template(&self) -> &'static str {
        match self {
            Self::ArgumentNull => "Argument '{0}' must not be null or undefined",
            Self::NotAFunction => "Argument '{0}' is not a function (got {1})",
            Self::NotANumber => "Argument '{0}' is not a number (got {1})",
            Self::NegativeArgument => "Argument '{0}' must not be negative (got {1})",
            Self::WrongType => "Argument '{0}' must be {1} (got {2})",
            Self::UnimplementedMember => "Interface member '{0}' is not implemented",
            Self::ExtendedProperty => {
                "Cannot extend: prototype already owns property '{0}' of type {1}"
            }
            Self::AlreadyExtended => "Cannot extend: constructor has already been extended",
            Self::CyclicPrototype => "Prototype assignment would create a cycle",
            Self::NoSuperConstructor => "Function '{0}' has no super constructor",
        }
    }

    /// Render this key's template with `args`.
    pub fn format(&self, args: &[Value]) -> String {
        interpolate(Some(self.template()), args).unwrap_or_default()
    }

    /// Look a key up by its serialized name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl std::fmt::Display for MessageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error message table.
pub const MESSAGES: [(MessageKey, &str); 10] = [
    (MessageKey::ArgumentNull, MessageKey::ArgumentNull.template()),
    (MessageKey::NotAFunction, MessageKey::NotAFunction.template()),
    (MessageKey::NotANumber, MessageKey::NotANumber.template()),
    (MessageKey::NegativeArgument, MessageKey::NegativeArgument.template()),
    (MessageKey::WrongType, MessageKey::WrongType.template()),
    (MessageKey::UnimplementedMember, MessageKey::UnimplementedMember.template()),
    (MessageKey::ExtendedProperty, MessageKey::ExtendedProperty.template()),
    (MessageKey::AlreadyExtended, MessageKey::AlreadyExtended.template()),
    (MessageKey::CyclicPrototype, MessageKey::CyclicPrototype.template()),
    (MessageKey::NoSuperConstructor, MessageKey::NoSuperConstructor.template()),
];

/// How placeholders are substituted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Replace only the first occurrence of each placeholder.
    #[default]
    FirstOccurrence,
    /// Replace every occurrence of each placeholder.
    Global,
}

impl Interpolation {
    /// Format `template` with `args` using this mode.
    pub fn apply(&self, template: Option<&str>, args: &[Value]) -> Option<String> {
        match self {
            Self::FirstOccurrence => interpolate(template, args),
            Self::Global => interpolate_all(template, args),
        }
    }

    /// Name as written in config files and environment variables.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FirstOccurrence => "first_occurrence",
            Self::Global => "global",
        }
    }

    /// Parse a name produced by [`as_str`](Self::as_str).
    pub fn parse(s: &str) -> Option<Self> {
        [Self::FirstOccurrence, Self::Global]
            .into_iter()
            .find(|mode| mode.as_str() == s)
    }
}

/// Substitute `{0}`, `{1}`, ... in `template` with the stringified `args`.
///
/// Absent arguments (null or undefined) render as the empty string. Only the
/// first occurrence of each placeholder is replaced, so `"{0} {0}"` with
/// `"z"` yields `"z {0}"`. Use [`interpolate_all`] to replace every
/// occurrence. Returns `None` when `template` is `None`.
pub fn interpolate(template: Option<&str>, args: &[Value]) -> Option<String> {
    let mut result = template?.to_string();
    for (index, arg) in args.iter().enumerate() {
        result = result.replacen(&placeholder(index), &render(arg), 1);
    }
    Some(result)
}

/// Like [`interpolate`], but replaces every occurrence of each placeholder.
pub fn interpolate_all(template: Option<&str>, args: &[Value]) -> Option<String> {
    let mut result = template?.to_string();
    for (index, arg) in args.iter().enumerate() {
        result = result.replace(&placeholder(index), &render(arg));
    }
    Some(result)
}

fn placeholder(index: usize) -> String {
    format!("{{{index}}}")
}

fn render(arg: &Value) -> String {
    if arg.is_nullish() {
        String::new()
    } else {
        arg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_positional() {
        let out = interpolate(Some("{0} and {1}"), &["x".into(), "y".into()]);
        assert_eq!(out.as_deref(), Some("x and y"));
    }

    #[test]
    fn test_interpolate_none_template() {
        assert_eq!(interpolate(None, &["x".into()]), None);
        assert_eq!(interpolate_all(None, &[]), None);
    }

    #[test]
    fn test_interpolate_first_occurrence_only() {
        let out = interpolate(Some("{0} {0}"), &["z".into()]);
        assert_eq!(out.as_deref(), Some("z {0}"));
    }

    #[test]
    fn test_interpolate_all_replaces_every_occurrence() {
        let out = interpolate_all(Some("{0} {0}"), &["z".into()]);
        assert_eq!(out.as_deref(), Some("z z"));
    }

    #[test]
    fn test_interpolate_absent_args_render_empty() {
        let out = interpolate(Some("[{0}|{1}]"), &[Value::Null, Value::Undefined]);
        assert_eq!(out.as_deref(), Some("[|]"));
    }

    #[test]
    fn test_interpolate_numbers_and_bools() {
        let out = interpolate(Some("{0} {1} {2}"), &[3.into(), 1.5.into(), true.into()]);
        assert_eq!(out.as_deref(), Some("3 1.5 true"));
    }

    #[test]
    fn test_interpolate_missing_args_leave_placeholders() {
        let out = interpolate(Some("{0}-{1}"), &["a".into()]);
        assert_eq!(out.as_deref(), Some("a-{1}"));
    }

    #[test]
    fn test_interpolation_mode_apply_and_parse() {
        let args = ["q".into()];
        assert_eq!(
            Interpolation::FirstOccurrence.apply(Some("{0}{0}"), &args).as_deref(),
            Some("q{0}")
        );
        assert_eq!(Interpolation::Global.apply(Some("{0}{0}"), &args).as_deref(), Some("qq"));
        assert_eq!(Interpolation::parse("first_occurrence"), Some(Interpolation::FirstOccurrence));
        for rejected in ["first", "all", "Global", "first-occurrence", "sometimes"] {
            assert_eq!(Interpolation::parse(rejected), None, "{rejected}");
        }
    }

    #[test]
    fn test_interpolation_names_match_serde() {
        for mode in [Interpolation::FirstOccurrence, Interpolation::Global] {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.as_str()));
            assert_eq!(Interpolation::parse(mode.as_str()), Some(mode));
        }
    }

    #[test]
    fn test_message_table_matches_keys() {
        for (key, template) in MESSAGES {
            assert_eq!(key.template(), template);
            assert_eq!(MessageKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(MESSAGES.len(), MessageKey::ALL.len());
    }

    #[test]
    fn test_message_key_serialization() {
        let json = serde_json::to_string(&MessageKey::UnimplementedMember).unwrap();
        assert_eq!(json, "\"UNIMPLEMENTED_MEMBER\"");

        let key: MessageKey = serde_json::from_str("\"ALREADY_EXTENDED\"").unwrap();
        assert_eq!(key, MessageKey::AlreadyExtended);
    }

    #[test]
    fn test_message_key_format() {
        let text = MessageKey::UnimplementedMember.format(&["foo".into()]);
        assert_eq!(text, "Interface member 'foo' is not implemented");
    }
}
