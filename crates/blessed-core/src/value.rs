//! Dynamic values.

use std::fmt;

use crate::function::Function;
use crate::object::Object;

/// A dynamically-typed value.
///
/// Objects and functions are shared handles; cloning a `Value` holding one
/// of them clones the handle, not the underlying data.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// No value.
    #[default]
    Undefined,
    /// Explicit empty value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Double-precision number.
    Number(f64),
    /// String.
    String(String),
    /// Property bag.
    Object(Object),
    /// Callable, possibly a constructor.
    Function(Function),
}

impl Value {
    /// Null or undefined.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Whether this value can be called.
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Function(_))
    }

    /// Borrow as a function.
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Borrow as an object.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Borrow as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The number, if this is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Type name used in messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Object(_) => "object",
            Self::Function(_) => "function",
        }
    }

    /// Numeric coercion. `None` when the value has no numeric reading.
    ///
    /// Booleans map to 0/1, null to 0, strings are parsed after trimming
    /// (the empty string is 0). NaN never comes back as `Some`.
    pub fn to_number(&self) -> Option<f64> {
        let n = match self {
            Self::Number(n) => *n,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Null => 0.0,
            Self::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    match trimmed {
                        "Infinity" | "+Infinity" => f64::INFINITY,
                        "-Infinity" => f64::NEG_INFINITY,
                        _ if is_decimal_literal(trimmed) => trimmed.parse::<f64>().ok()?,
                        _ => return None,
                    }
                }
            }
            Self::Undefined | Self::Object(_) | Self::Function(_) => return None,
        };
        (!n.is_nan()).then_some(n)
    }

    /// Property lookup through the object-or-prototype rule.
    ///
    /// Objects are searched along their prototype chain; functions are
    /// searched through their `prototype` object. Everything else has no
    /// properties.
    pub fn get(&self, key: &str) -> Value {
        crate::object::resolve_bag(self)
            .map(|bag| bag.get(key))
            .unwrap_or_default()
    }
}

impl PartialEq for Value {
    /// Strict equality: primitives by value, objects and functions by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            (Self::Function(a), Self::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::String(s) => f.write_str(s),
            Self::Object(_) => f.write_str("[object Object]"),
            Self::Function(func) => write!(f, "function {}()", func.name()),
        }
    }
}

/// Digits with optional sign, point and exponent; `inf` and `nan` do not qualify.
fn is_decimal_literal(s: &str) -> bool {
    s.bytes().any(|b| b.is_ascii_digit())
        && s
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-' | b'e' | b'E'))
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Self::Object(o)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Self::Function(f)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Undefined, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nullish() {
        assert!(Value::Undefined.is_nullish());
        assert!(Value::Null.is_nullish());
        assert!(!Value::from(0).is_nullish());
        assert!(!Value::from("").is_nullish());
        assert!(!Value::from(false).is_nullish());
    }

    #[test]
    fn test_number_display() {
        assert_eq!(Value::from(1).to_string(), "1");
        assert_eq!(Value::from(-0.0).to_string(), "0");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::from(f64::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn test_to_number_coercion() {
        assert_eq!(Value::from("  7 ").to_number(), Some(7.0));
        assert_eq!(Value::from("").to_number(), Some(0.0));
        assert_eq!(Value::from(true).to_number(), Some(1.0));
        assert_eq!(Value::Null.to_number(), Some(0.0));
        assert_eq!(Value::from("seven").to_number(), None);
        assert_eq!(Value::from("-2.5e1").to_number(), Some(-25.0));
        assert_eq!(Value::from("Infinity").to_number(), Some(f64::INFINITY));
        for spelling in ["inf", "infinity", "-inf", "NaN", "nan", "1_000", "e"] {
            assert_eq!(Value::from(spelling).to_number(), None, "{spelling}");
        }
        assert_eq!(Value::Undefined.to_number(), None);
        assert_eq!(Value::from(f64::NAN).to_number(), None);
        assert_eq!(Value::Object(Object::new()).to_number(), None);
    }

    #[test]
    fn test_strict_equality() {
        let a = Object::new();
        let b = Object::new();
        assert_eq!(Value::from(a.clone()), Value::from(a));
        assert_ne!(Value::from(Object::new()), Value::from(b));
        assert_eq!(Value::from("x"), Value::from("x".to_string()));
        assert_ne!(Value::from(1), Value::from("1"));
        assert_ne!(Value::Null, Value::Undefined);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i32>), Value::Undefined);
        assert_eq!(Value::from(Some("a")), Value::from("a"));
    }
}
