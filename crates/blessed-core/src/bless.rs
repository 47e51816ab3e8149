//! Delegation installer.

use tracing::{debug, trace};

use crate::delegate::{unbind_at, ArgPosition};
use crate::error::Result;
use crate::object::require_bag;
use crate::value::Value;

/// Give `blessee` every member of `benediction` it lacks.
///
/// Both arguments follow the object-or-prototype rule. For each enumerable
/// property of `benediction` (own or inherited) that is absent on
/// `blessee` (null or undefined, looking through its prototype chain),
/// functions are installed as delegates built with `position` and other
/// values are copied as-is. Present members are never overwritten.
///
/// Returns the number of properties installed.
pub fn bless(blessee: &Value, benediction: &Value, position: ArgPosition) -> Result<usize> {
    let target = require_bag(blessee, "blessee")?;
    let source = require_bag(benediction, "benediction")?;
    let owner = Value::Object(source.clone());

    let mut installed = 0;
    for key in source.enumerable_keys() {
        if !target.get(&key).is_nullish() {
            continue;
        }
        let value = source.get(&key);
        let value = if value.is_callable() {
            Value::Function(unbind_at(&owner, &Value::from(key.as_str()), position)?)
        } else {
            value
        };
        trace!(property = %key, kind = value.type_name(), "installing");
        target.set(key, value);
        installed += 1;
    }

    debug!(installed, %position, "bless complete");
    Ok(installed)
}
