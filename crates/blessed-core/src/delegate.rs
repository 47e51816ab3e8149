//! Delegate construction.
//!
//! A delegate turns a function that takes its subject as an ordinary
//! argument into a method: the receiver of the delegate call is spliced
//! into the argument list at a fixed position.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{BlessedError, Result};
use crate::function::Function;
use crate::object::resolve_bag;
use crate::value::Value;

/// Where a delegate inserts its receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgPosition {
    /// A fixed zero-based index.
    Index(usize),
    /// The last declared parameter of the wrapped function.
    Last,
}

/// Insert the receiver at the wrapped function's last declared parameter.
pub const LAST_ARG: ArgPosition = ArgPosition::Last;

impl ArgPosition {
    /// Concrete index for `function`.
    ///
    /// `Last` resolves to `declared_arity - 1`, or 0 for a function that
    /// declares no parameters.
    pub fn resolve(&self, function: &Function) -> usize {
        match self {
            Self::Index(index) => *index,
            Self::Last => function.declared_arity().saturating_sub(1),
        }
    }
}

impl Default for ArgPosition {
    fn default() -> Self {
        Self::Index(0)
    }
}

impl From<usize> for ArgPosition {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl TryFrom<&Value> for ArgPosition {
    type Error = BlessedError;

    /// Coerce a dynamic position. `Undefined` means the default of 0.
    fn try_from(value: &Value) -> Result<Self> {
        if matches!(value, Value::Undefined) {
            return Ok(Self::default());
        }
        let n = value
            .to_number()
            .ok_or_else(|| BlessedError::not_a_number("this_arg_number", value))?;
        if n < 0.0 {
            return Err(BlessedError::negative_argument("this_arg_number", n));
        }
        Ok(Self::Index(n.trunc() as usize))
    }
}

impl FromStr for ArgPosition {
    type Err = BlessedError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "last" | "LAST_ARG" => Ok(Self::Last),
            other => Self::try_from(&Value::from(other)),
        }
    }
}

impl fmt::Display for ArgPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Last => f.write_str("last"),
        }
    }
}

/// Build a delegate for `func`, owned by `object`.
///
/// `func` is either a function or the name of a method found on `object`
/// (through its prototype when `object` is a constructor). Calling the
/// returned delegate with receiver `R` and arguments `A` calls `func` with
/// `object` as context and `R` inserted into `A` at `position`. A position
/// past the end of `A` appends `R`.
pub fn unbind_at(object: &Value, func: &Value, position: ArgPosition) -> Result<Function> {
    if object.is_nullish() {
        return Err(BlessedError::argument_null("object"));
    }
    if func.is_nullish() {
        return Err(BlessedError::argument_null("func"));
    }

    let resolved = match func {
        Value::String(name) => resolve_bag(object)
            .map(|bag| bag.get(name))
            .unwrap_or_default(),
        other => other.clone(),
    };
    let Value::Function(target) = resolved else {
        return Err(BlessedError::not_a_function("func", &resolved));
    };

    let index = position.resolve(&target);
    debug!(function = %target.name(), index, "building delegate");

    let context = object.clone();
    let name = target.name().to_string();
    let arity = target.arity().saturating_sub(1);
    Ok(Function::new(name, arity, move |receiver, args| {
        target.call(&context, &splice_receiver(receiver, args, index))
    }))
}

fn splice_receiver(receiver: &Value, args: &[Value], index: usize) -> Vec<Value> {
    let mut spliced = Vec::with_capacity(args.len() + 1);
    spliced.extend_from_slice(args);
    spliced.insert(index.min(args.len()), receiver.clone());
    spliced
}
