//! Mixin copying.

use tracing::{debug, trace};

use crate::error::Result;
use crate::object::require_bag;
use crate::value::Value;

/// Copy the members of each source onto `child`, first source first.
///
/// `child` and every source follow the object-or-prototype rule; absent
/// (null or undefined) sources are skipped. A property is copied only when
/// `child` does not already own it, so `child`'s own members always win and
/// among sources the earliest one wins. Inherited properties of a source are
/// copied too.
///
/// Returns `child` so calls can be chained.
pub fn mixin(child: &Value, sources: &[Value]) -> Result<Value> {
    let target = require_bag(child, "child")?;

    let mut copied = 0usize;
    for (index, source) in sources.iter().enumerate() {
        if source.is_nullish() {
            trace!(index, "skipping absent source");
            continue;
        }
        let source = require_bag(source, "source")?;
        for key in source.enumerable_keys() {
            if target.has_own(&key) {
                continue;
            }
            let value = source.get(&key);
            trace!(index, property = %key, "copying");
            target.set(key, value);
            copied += 1;
        }
    }

    debug!(sources = sources.len(), copied, "mixin complete");
    Ok(child.clone())
}

/// Variadic form of [`mixin()`](crate::mixin()).
///
/// ```
/// use blessed_core::{mixin, Object, Value};
///
/// let child = Value::from(Object::new());
/// let a = Object::from_entries([("a", 1)]);
/// let b = Object::from_entries([("a", 2), ("b", 2)]);
/// let out = mixin!(child, a, b).unwrap();
/// assert_eq!(out.get("a"), Value::from(1));
/// assert_eq!(out.get("b"), Value::from(2));
/// ```
#[macro_export]
macro_rules! mixin {
    ($child:expr $(, $source:expr)* $(,)?) => {
        $crate::mixin(&$crate::Value::from($child), &[$($crate::Value::from($source)),*])
    };
}
