//! The dispatch protocol.
//!
//! Every runtime object implements [`BrsComponent`] and is shared through an
//! [`ObjectRef`]. Member access is a two-phase lookup: stored data fields
//! first, then registered operations, then nothing.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::errors::{invalid_field_assignment, invalid_index};
use crate::{Callable, EvalError, EvalResult, Interfaces, Value};

/// A built-in runtime object.
///
/// Only the name and dispatch table are mandatory; everything else defaults
/// to "not supported by this object".
pub trait BrsComponent: Any {
    fn component_name(&self) -> &str;

    fn interfaces(&self) -> &Interfaces;

    fn interfaces_mut(&mut self) -> &mut Interfaces;

    /// Stored data field, matched case-insensitively.
    fn get_field(&self, _name: &str) -> Option<Value> {
        None
    }

    fn set_field(&mut self, name: &str, _value: Value) -> Result<(), EvalError> {
        Err(invalid_field_assignment(self.component_name(), name))
    }

    /// Non-string index access (`arr[0]`).
    fn get_element(&self, index: &Value) -> EvalResult {
        Err(invalid_index(self.component_name(), index.kind()))
    }

    fn set_element(&mut self, index: &Value, _value: Value) -> Result<(), EvalError> {
        Err(invalid_index(self.component_name(), index.kind()))
    }

    /// Snapshot of the elements `for each` visits, or `None` if the object
    /// is not iterable.
    fn elements(&self) -> Option<Vec<Value>> {
        None
    }

    /// `=` against another value. Objects are unequal to everything unless
    /// they say otherwise.
    fn equal_to(&self, _other: &Value) -> bool {
        false
    }

    /// Rendering. `this` is the reference being rendered; `parent` is set
    /// when rendering nested inside another container.
    fn render(&self, _this: &ObjectRef, _parent: Option<&ObjectRef>) -> String {
        format!("<Component: {}>", self.component_name())
    }

    /// The wrapped scalar, for boxed scalars.
    fn unbox(&self) -> Option<Value> {
        None
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Result of resolving a name on an object.
#[derive(Clone, Debug)]
pub enum Member {
    Field(Value),
    /// An operation, already bound to the object.
    Operation(Rc<Callable>),
    Absent,
}

impl Member {
    /// The value an access expression produces: the field, the callable
    /// itself (not its result), or `invalid`.
    pub fn into_value(self) -> Value {
        match self {
            Member::Field(value) => value,
            Member::Operation(callable) => Value::Callable(callable),
            Member::Absent => Value::Invalid,
        }
    }
}

/// Shared, mutable handle to a runtime object.
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<dyn BrsComponent>>);

impl ObjectRef {
    pub fn new<T: BrsComponent>(component: T) -> Self {
        ObjectRef(Rc::new(RefCell::new(component)))
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }

    pub fn component_name(&self) -> String {
        self.0.borrow().component_name().to_string()
    }

    pub fn get_field(&self, name: &str) -> Option<Value> {
        self.0.borrow().get_field(name)
    }

    /// Registered operation, bound to this object.
    pub fn get_operation(&self, name: &str) -> Option<Rc<Callable>> {
        let callable = self.0.borrow().interfaces().get(name)?;
        Some(Rc::new(callable.bind(self.clone())))
    }

    /// Field, then operation, then absent.
    pub fn get_member(&self, name: &str) -> Member {
        if let Some(value) = self.get_field(name) {
            return Member::Field(value);
        }
        match self.get_operation(name) {
            Some(callable) => Member::Operation(callable),
            None => Member::Absent,
        }
    }

    pub fn set_field(&self, name: &str, value: Value) -> Result<(), EvalError> {
        self.0.borrow_mut().set_field(name, value)
    }

    /// `obj[index]`: string keys resolve like member access, anything else
    /// goes to the object's element access.
    pub fn index_get(&self, index: &Value) -> EvalResult {
        match index.unboxed() {
            Value::String(key) => Ok(self.get_member(&key).into_value()),
            other => self.0.borrow().get_element(&other),
        }
    }

    /// `obj[index] = value`.
    pub fn index_set(&self, index: &Value, value: Value) -> Result<(), EvalError> {
        match index.unboxed() {
            Value::String(key) => self.set_field(&key, value),
            other => self.0.borrow_mut().set_element(&other, value),
        }
    }

    pub fn elements(&self) -> Option<Vec<Value>> {
        self.0.borrow().elements()
    }

    pub fn render(&self, parent: Option<&ObjectRef>) -> String {
        self.0.borrow().render(self, parent)
    }

    pub fn equal_to(&self, other: &Value) -> bool {
        self.0.borrow().equal_to(other)
    }

    pub fn unbox(&self) -> Option<Value> {
        self.0.borrow().unbox()
    }

    pub fn has_interface(&self, interface: &str) -> bool {
        self.0.borrow().interfaces().has_interface(interface)
    }

    /// Add operations after construction.
    pub fn register(&self, interface: &str, methods: Vec<Callable>) {
        self.0.borrow_mut().interfaces_mut().register(interface, methods);
    }

    /// Remove a single operation from the dispatch table.
    pub fn unregister(&self, name: &str) -> bool {
        self.0.borrow_mut().interfaces_mut().remove(name)
    }

    pub fn is<T: BrsComponent>(&self) -> bool {
        self.0.borrow().as_any().is::<T>()
    }

    /// Run `f` against the concrete component, if it is a `T`.
    pub fn with<T: BrsComponent, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let component = self.0.borrow();
        component.as_any().downcast_ref::<T>().map(f)
    }

    /// Run `f` against the concrete component mutably, if it is a `T`.
    pub fn with_mut<T: BrsComponent, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut component = self.0.borrow_mut();
        component.as_any_mut().downcast_mut::<T>().map(f)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectRef({})", self.component_name())
    }
}
