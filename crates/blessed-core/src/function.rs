//! Callable values.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::error::{BlessedError, Result};
use crate::object::Object;
use crate::value::Value;

/// Signature of a function body: `(this, args) -> result`.
pub type NativeFn = dyn Fn(&Value, &[Value]) -> Result<Value> + Send + Sync;

/// A shared callable with a declared arity and a `prototype` object.
///
/// Every function can act as a constructor: [`Function::new`] creates a
/// fresh prototype whose constructor link points back at the function.
#[derive(Clone)]
pub struct Function(Arc<FunctionInner>);

pub(crate) struct FunctionInner {
    name: String,
    arity: usize,
    arity_override: RwLock<Option<usize>>,
    body: Box<NativeFn>,
    prototype: RwLock<Object>,
    super_constructor: RwLock<Option<Function>>,
}

impl Function {
    /// Create a function with `arity` declared parameters.
    pub fn new<F>(name: impl Into<String>, arity: usize, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        Self(Arc::new_cyclic(|weak| FunctionInner {
            name,
            arity,
            arity_override: RwLock::new(None),
            body: Box::new(body),
            prototype: RwLock::new(Object::prototype_for(weak.clone())),
            super_constructor: RwLock::new(None),
        }))
    }

    pub(crate) fn from_inner(inner: Arc<FunctionInner>) -> Self {
        Self(inner)
    }

    /// Function name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Natural number of declared parameters.
    pub fn arity(&self) -> usize {
        self.0.arity
    }

    /// Arity override attribute, if set.
    pub fn arity_override(&self) -> Option<usize> {
        *self.0.arity_override.read()
    }

    /// Set or clear the arity override attribute.
    ///
    /// Variadic bodies use this to advertise the slot count that
    /// [`LAST_ARG`](crate::LAST_ARG) should resolve against.
    pub fn set_arity_override(&self, arity: Option<usize>) {
        *self.0.arity_override.write() = arity;
    }

    /// The override when present, otherwise the natural arity.
    pub fn declared_arity(&self) -> usize {
        self.arity_override().unwrap_or(self.0.arity)
    }

    /// Invoke with `this` as context.
    pub fn call(&self, this: &Value, args: &[Value]) -> Result<Value> {
        trace!(function = %self.0.name, argc = args.len(), "call");
        (self.0.body)(this, args)
    }

    /// Current `prototype` object.
    pub fn prototype(&self) -> Object {
        self.0.prototype.read().clone()
    }

    /// Replace the `prototype` object. Existing instances keep the old one.
    pub fn set_prototype(&self, prototype: Object) {
        *self.0.prototype.write() = prototype;
    }

    /// Super-constructor recorded by [`extend`](crate::extend).
    pub fn super_constructor(&self) -> Option<Function> {
        self.0.super_constructor.read().clone()
    }

    pub(crate) fn set_super_constructor(&self, parent: Option<Function>) {
        *self.0.super_constructor.write() = parent;
    }

    /// Invoke the super-constructor with `this` as context.
    pub fn call_super(&self, this: &Value, args: &[Value]) -> Result<Value> {
        let parent = self
            .super_constructor()
            .ok_or_else(|| BlessedError::no_super_constructor(&self.0.name))?;
        parent.call(this, args)
    }

    /// Create an instance: a fresh object inheriting from `prototype`, passed
    /// as `this` to the body.
    ///
    /// If the body returns an object, that object is the result instead.
    pub fn construct(&self, args: &[Value]) -> Result<Object> {
        let instance = Object::with_proto(&self.prototype());
        match self.call(&Value::Object(instance.clone()), args)? {
            Value::Object(replacement) => Ok(replacement),
            _ => Ok(instance),
        }
    }

    /// Whether `object` was built from this function's current prototype,
    /// directly or through an inheritance link.
    pub fn is_instance(&self, object: &Object) -> bool {
        object.inherits_from(&self.prototype())
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.0.name)
            .field("arity", &self.0.arity)
            .field("arity_override", &self.arity_override())
            .finish()
    }
}
