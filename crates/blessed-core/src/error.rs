//! Error types for composition operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::messages::MessageKey;
use crate::value::Value;

/// Errors raised by composition operations.
///
/// All of these are precondition violations detected at the call site.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BlessedError {
    /// A required argument was null or undefined, or a number was below its floor.
    #[error("{message}")]
    InvalidArgument {
        /// Name of the offending argument.
        argument: String,
        /// Rendered message.
        message: String,
    },

    /// An argument was present but of the wrong kind.
    #[error("{message}")]
    TypeMismatch {
        /// Name of the offending argument.
        argument: String,
        /// What was expected.
        expected: String,
        /// Rendered message.
        message: String,
    },

    /// An interface member is missing on the candidate.
    #[error("{message}")]
    UnimplementedMember {
        /// Missing member name.
        member: String,
        /// Rendered message.
        message: String,
    },

    /// A constructor was already extended or already has prototype members.
    #[error("{message}")]
    AlreadyExtended {
        /// Offending own property of the prototype, when one was found.
        property: Option<String>,
        /// Rendered message.
        message: String,
    },

    /// Error returned from a user-supplied function body.
    #[error("{0}")]
    Raised(String),
}

/// Discriminant of [`BlessedError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`BlessedError::InvalidArgument`].
    InvalidArgument,
    /// See [`BlessedError::TypeMismatch`].
    TypeMismatch,
    /// See [`BlessedError::UnimplementedMember`].
    UnimplementedMember,
    /// See [`BlessedError::AlreadyExtended`].
    AlreadyExtended,
    /// See [`BlessedError::Raised`].
    Raised,
}

impl BlessedError {
    /// Required argument was null or undefined.
    pub fn argument_null(argument: &str) -> Self {
        Self::InvalidArgument {
            argument: argument.to_string(),
            message: MessageKey::ArgumentNull.format(&[argument.into()]),
        }
    }

    /// Numeric argument below zero.
    pub fn negative_argument(argument: &str, value: f64) -> Self {
        Self::InvalidArgument {
            argument: argument.to_string(),
            message: MessageKey::NegativeArgument.format(&[argument.into(), value.into()]),
        }
    }

    /// Argument is not callable.
    pub fn not_a_function(argument: &str, actual: &Value) -> Self {
        Self::TypeMismatch {
            argument: argument.to_string(),
            expected: "function".to_string(),
            message: MessageKey::NotAFunction.format(&[argument.into(), actual.type_name().into()]),
        }
    }

    /// Argument is not coercible to a number.
    pub fn not_a_number(argument: &str, actual: &Value) -> Self {
        Self::TypeMismatch {
            argument: argument.to_string(),
            expected: "number".to_string(),
            message: MessageKey::NotANumber.format(&[argument.into(), actual.type_name().into()]),
        }
    }

    /// Argument has the wrong kind of value.
    pub fn wrong_type(argument: &str, expected: &str, actual: &Value) -> Self {
        Self::TypeMismatch {
            argument: argument.to_string(),
            expected: expected.to_string(),
            message: MessageKey::WrongType.format(&[
                argument.into(),
                expected.into(),
                actual.type_name().into(),
            ]),
        }
    }

    /// Prototype assignment would create a cycle.
    pub fn cyclic_prototype() -> Self {
        Self::TypeMismatch {
            argument: "proto".to_string(),
            expected: "acyclic prototype".to_string(),
            message: MessageKey::CyclicPrototype.format(&[]),
        }
    }

    /// `call_super` on a function that was never extended.
    pub fn no_super_constructor(function: &str) -> Self {
        Self::TypeMismatch {
            argument: "super_constructor".to_string(),
            expected: "function".to_string(),
            message: MessageKey::NoSuperConstructor.format(&[function.into()]),
        }
    }

    /// Interface member missing.
    pub fn unimplemented_member(member: &str) -> Self {
        Self::UnimplementedMember {
            member: member.to_string(),
            message: MessageKey::UnimplementedMember.format(&[member.into()]),
        }
    }

    /// Prototype already owns `property`.
    pub fn extended_property(property: &str, type_name: &str) -> Self {
        Self::AlreadyExtended {
            property: Some(property.to_string()),
            message: MessageKey::ExtendedProperty.format(&[property.into(), type_name.into()]),
        }
    }

    /// Prototype was already relinked.
    pub fn already_extended() -> Self {
        Self::AlreadyExtended {
            property: None,
            message: MessageKey::AlreadyExtended.format(&[]),
        }
    }

    /// Error raised from inside a function body.
    pub fn raised(message: impl Into<String>) -> Self {
        Self::Raised(message.into())
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::UnimplementedMember { .. } => ErrorKind::UnimplementedMember,
            Self::AlreadyExtended { .. } => ErrorKind::AlreadyExtended,
            Self::Raised(_) => ErrorKind::Raised,
        }
    }
}

/// Result type alias for composition operations.
pub type Result<T> = std::result::Result<T, BlessedError>;
