//! Blessed - object composition helpers.
//!
//! Mixins, method delegation, and single-parent prototype linking over a
//! small dynamic object model:
//!
//! - [`unbind_at`] - wrap a function so its receiver is passed as an argument
//! - [`bless`] - install delegates for every member a target lacks
//! - [`extend`] - chain one constructor's prototype to another's
//! - [`mixin()`] - copy members from several sources, first source wins
//! - [`assert_implements`] - check an object against an interface template
//! - [`interpolate`] - positional message templates
//!
//! Constructors stand for their `prototype` object wherever a property bag
//! is expected (see [`resolve_bag`]).
//!
//! ```
//! use blessed_core::{bless, ArgPosition, Function, Object, Value};
//!
//! let greeter = Object::from_entries([(
//!     "greet",
//!     Function::new("greet", 1, |_, args| {
//!         let who = args.first().cloned().unwrap_or_default();
//!         Ok(Value::from(format!("hello {}", who.get("name"))))
//!     }),
//! )]);
//!
//! let person = Object::from_entries([("name", "ada")]);
//! bless(&person.clone().into(), &greeter.into(), ArgPosition::default()).unwrap();
//!
//! let greet = person.get("greet");
//! let out = greet.as_function().unwrap().call(&person.into(), &[]).unwrap();
//! assert_eq!(out, Value::from("hello ada"));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod function;
pub mod messages;
pub mod object;
pub mod value;

mod bless;
mod delegate;
mod extend;
mod interface;
mod mixin;

pub use bless::bless;
pub use delegate::{unbind_at, ArgPosition, LAST_ARG};
pub use error::{BlessedError, ErrorKind, Result};
pub use extend::extend;
pub use function::{Function, NativeFn};
pub use interface::assert_implements;
pub use messages::{interpolate, interpolate_all, Interpolation, MessageKey, MESSAGES};
pub use mixin::mixin;
pub use object::{resolve_bag, Object};
pub use value::Value;
