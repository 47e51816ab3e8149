//! Property bags with prototype chains.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Weak};

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::error::{BlessedError, Result};
use crate::function::{Function, FunctionInner};
use crate::value::Value;

/// A shared, mutable property bag.
///
/// Properties are kept in insertion order and are all enumerable. The
/// constructor back-link set up by [`Function::new`] lives outside the
/// property table and is never enumerated.
#[derive(Clone, Default)]
pub struct Object(Arc<RwLock<ObjectData>>);

#[derive(Default)]
struct ObjectData {
    properties: IndexMap<String, Value>,
    proto: Option<Object>,
    constructor: Option<Weak<FunctionInner>>,
}

impl Object {
    /// Empty object with no prototype.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty object whose prototype is `proto`.
    pub fn with_proto(proto: &Object) -> Self {
        let object = Self::new();
        object.0.write().proto = Some(proto.clone());
        object
    }

    /// Object holding `entries` as own properties.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let object = Self::new();
        {
            let mut data = object.0.write();
            for (key, value) in entries {
                data.properties.insert(key.into(), value.into());
            }
        }
        object
    }

    pub(crate) fn prototype_for(constructor: Weak<FunctionInner>) -> Self {
        let object = Self::new();
        object.0.write().constructor = Some(constructor);
        object
    }

    /// The prototype, if any.
    pub fn proto(&self) -> Option<Object> {
        self.0.read().proto.clone()
    }

    /// Replace the prototype. Fails if `proto`'s chain already contains `self`.
    pub fn set_proto(&self, proto: Option<Object>) -> Result<()> {
        if let Some(candidate) = &proto {
            if candidate.chain().any(|link| link.ptr_eq(self)) {
                return Err(BlessedError::cyclic_prototype());
            }
        }
        self.0.write().proto = proto;
        Ok(())
    }

    /// Own property, without consulting the prototype chain.
    pub fn get_own(&self, key: &str) -> Option<Value> {
        self.0.read().properties.get(key).cloned()
    }

    /// Whether `key` is an own property.
    pub fn has_own(&self, key: &str) -> bool {
        self.0.read().properties.contains_key(key)
    }

    /// Look `key` up along the prototype chain. `Undefined` when absent.
    pub fn get(&self, key: &str) -> Value {
        self.chain()
            .find_map(|link| link.get_own(key))
            .unwrap_or_default()
    }

    /// Set an own property.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.write().properties.insert(key.into(), value.into());
    }

    /// Remove an own property, keeping the order of the others.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.write().properties.shift_remove(key)
    }

    /// Own property names in insertion order.
    pub fn own_keys(&self) -> Vec<String> {
        self.0.read().properties.keys().cloned().collect()
    }

    /// Own properties in insertion order.
    pub fn own_entries(&self) -> Vec<(String, Value)> {
        self.0
            .read()
            .properties
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Number of own properties.
    pub fn len(&self) -> usize {
        self.0.read().properties.len()
    }

    /// Whether the object has no own properties.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every enumerable key, own first, then each prototype in chain order.
    ///
    /// A key shadowed lower in the chain is reported once.
    pub fn enumerable_keys(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut keys = Vec::new();
        for link in self.chain() {
            for key in link.own_keys() {
                if seen.insert(key.clone()) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    /// The constructor reachable from this object, searching the chain.
    pub fn constructor(&self) -> Option<Function> {
        let link = self.chain().find_map(|link| link.0.read().constructor.clone())?;
        link.upgrade().map(Function::from_inner)
    }

    /// Whether `proto` appears anywhere on this object's prototype chain.
    pub fn inherits_from(&self, proto: &Object) -> bool {
        self.chain().skip(1).any(|link| link.ptr_eq(proto))
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// This object followed by each prototype.
    fn chain(&self) -> impl Iterator<Item = Object> {
        std::iter::successors(Some(self.clone()), Object::proto)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.read();
        f.debug_struct("Object")
            .field("keys", &data.properties.keys().collect::<Vec<_>>())
            .field("has_proto", &data.proto.is_some())
            .finish()
    }
}

/// Object-or-prototype resolution.
///
/// An object is used as-is; a function stands for its `prototype` object.
/// Other values have no property bag.
pub fn resolve_bag(value: &Value) -> Option<Object> {
    match value {
        Value::Object(object) => Some(object.clone()),
        Value::Function(function) => Some(function.prototype()),
        _ => None,
    }
}

/// [`resolve_bag`] for a required argument.
pub(crate) fn require_bag(value: &Value, argument: &str) -> Result<Object> {
    if value.is_nullish() {
        return Err(BlessedError::argument_null(argument));
    }
    resolve_bag(value)
        .ok_or_else(|| BlessedError::wrong_type(argument, "an object or function", value))
}
