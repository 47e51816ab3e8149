//! Prototype linking.

use tracing::debug;

use crate::error::{BlessedError, Result};
use crate::function::Function;
use crate::object::Object;
use crate::value::Value;

/// Make `subclass` inherit from `superclass`.
///
/// `subclass` must still be unextended: its prototype owns no properties and
/// its constructor link points back at `subclass`. On success `superclass`
/// is recorded as the super-constructor and `subclass` gets a fresh prototype
/// chained to `superclass`'s prototype. Instances built before the call keep
/// the old prototype.
///
/// A second call on the same subclass fails with `AlreadyExtended`.
pub fn extend(subclass: &Value, superclass: &Value) -> Result<()> {
    let child = require_function(subclass, "subclass")?;
    let parent = require_function(superclass, "superclass")?;

    let prototype = child.prototype();
    if let Some((key, value)) = prototype.own_entries().into_iter().next() {
        return Err(BlessedError::extended_property(&key, value.type_name()));
    }
    match prototype.constructor() {
        Some(constructor) if constructor.ptr_eq(&child) => {}
        _ => return Err(BlessedError::already_extended()),
    }

    child.set_super_constructor(Some(parent.clone()));
    child.set_prototype(Object::with_proto(&parent.prototype()));
    debug!(subclass = %child.name(), superclass = %parent.name(), "extended");
    Ok(())
}

fn require_function(value: &Value, argument: &str) -> Result<Function> {
    match value {
        Value::Function(function) => Ok(function.clone()),
        v if v.is_nullish() => Err(BlessedError::argument_null(argument)),
        other => Err(BlessedError::not_a_function(argument, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn animal() -> Function {
        let ctor = Function::new("Animal", 1, |this, args| {
            if let Some(this) = this.as_object() {
                this.set("name", args.first().cloned().unwrap_or_default());
            }
            Ok(Value::Undefined)
        });
        ctor.prototype().set(
            "speak",
            Function::new("speak", 0, |this, _| {
                Ok(Value::from(format!("{} makes a sound", this.get("name"))))
            }),
        );
        ctor
    }

    fn dog() -> Function {
        Function::new("Dog", 1, |this, args| {
            if let Some(this) = this.as_object() {
                this.set("name", args.first().cloned().unwrap_or_default());
                this.set("legs", 4);
            }
            Ok(Value::Undefined)
        })
    }

    #[test]
    fn test_instances_inherit_super_methods() {
        let (base, derived) = (animal(), dog());
        extend(&derived.clone().into(), &base.clone().into()).unwrap();

        let rex = derived.construct(&["Rex".into()]).unwrap();
        let speak = rex.get("speak");
        let said = speak.as_function().unwrap().call(&rex.clone().into(), &[]).unwrap();
        assert_eq!(said, Value::from("Rex makes a sound"));
        assert!(base.is_instance(&rex));
        assert!(derived.is_instance(&rex));
    }

    #[test]
    fn test_super_constructor_recorded() {
        let (base, derived) = (animal(), dog());
        extend(&derived.clone().into(), &base.clone().into()).unwrap();
        assert!(derived.super_constructor().unwrap().ptr_eq(&base));

        let instance = Value::Object(Object::new());
        derived.call_super(&instance, &["Fido".into()]).unwrap();
        assert_eq!(instance.get("name"), Value::from("Fido"));
    }

    #[test]
    fn test_subclass_methods_added_after_extend() {
        let (base, derived) = (animal(), dog());
        extend(&derived.clone().into(), &base.into()).unwrap();
        derived.prototype().set(
            "speak",
            Function::new("speak", 0, |_, _| Ok(Value::from("woof"))),
        );

        let rex = derived.construct(&["Rex".into()]).unwrap();
        let said = rex.get("speak").as_function().unwrap().call(&rex.clone().into(), &[]).unwrap();
        assert_eq!(said, Value::from("woof"));
    }

    #[test]
    fn test_second_extend_fails() {
        let derived = dog();
        extend(&derived.clone().into(), &animal().into()).unwrap();
        let other = Function::new("Other", 0, |_, _| Ok(Value::Undefined));
        let err = extend(&derived.into(), &other.into()).unwrap_err();
        assert!(matches!(err, BlessedError::AlreadyExtended { property: None, .. }));
    }

    #[test]
    fn test_prototype_with_members_rejected() {
        let derived = dog();
        derived.prototype().set("bark", Function::new("bark", 0, |_, _| Ok(Value::Undefined)));
        let err = extend(&derived.into(), &animal().into()).unwrap_err();
        match err {
            BlessedError::AlreadyExtended { property, message } => {
                assert_eq!(property.as_deref(), Some("bark"));
                assert!(message.contains("function"));
            }
            other => panic!("Expected AlreadyExtended, got {other:?}"),
        }
    }

    #[test]
    fn test_replaced_prototype_rejected() {
        let derived = dog();
        derived.set_prototype(Object::new());
        let err = extend(&derived.into(), &animal().into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExtended);
    }

    #[test]
    fn test_existing_instances_keep_old_prototype() {
        let (base, derived) = (animal(), dog());
        let before = derived.construct(&["Old".into()]).unwrap();
        extend(&derived.clone().into(), &base.into()).unwrap();

        assert_eq!(before.get("speak"), Value::Undefined);
        assert!(!derived.is_instance(&before));
    }

    #[test]
    fn test_chained_extension() {
        let (base, derived) = (animal(), dog());
        let puppy = Function::new("Puppy", 1, |_, _| Ok(Value::Undefined));
        extend(&derived.clone().into(), &base.clone().into()).unwrap();
        extend(&puppy.clone().into(), &derived.into()).unwrap();

        let p = puppy.construct(&[]).unwrap();
        assert!(base.is_instance(&p));
        assert!(p.get("speak").is_callable());
    }

    #[test]
    fn test_argument_validation() {
        let err = extend(&Value::Null, &animal().into()).unwrap_err();
        assert!(matches!(err, BlessedError::InvalidArgument { ref argument, .. } if argument == "subclass"));

        let err = extend(&dog().into(), &Value::Undefined).unwrap_err();
        assert!(matches!(err, BlessedError::InvalidArgument { ref argument, .. } if argument == "superclass"));

        let err = extend(&Object::new().into(), &animal().into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }
}
