//! Duck-typed interface checks.

use tracing::debug;

use crate::error::{BlessedError, Result};
use crate::object::require_bag;
use crate::value::Value;

/// Check that `child` provides every member `interf` declares.
///
/// Each enumerable property of `interf` (object-or-prototype rule) must
/// resolve to a non-null value on `child` through an ordinary property
/// lookup. Primitives carry no properties, so they satisfy only an empty
/// interface. Fails with `UnimplementedMember` on the first gap.
pub fn assert_implements(child: &Value, interf: &Value) -> Result<()> {
    if child.is_nullish() {
        return Err(BlessedError::argument_null("child"));
    }
    let interface = require_bag(interf, "interf")?;

    let members = interface.enumerable_keys();
    if let Some(missing) = members.iter().find(|key| child.get(key).is_nullish()) {
        return Err(BlessedError::unimplemented_member(missing));
    }

    debug!(members = members.len(), "interface satisfied");
    Ok(())
}
