//! Layered variable store.
//!
//! Lookup checks the Function, Module, Global and Mock layers in that order.
//! A sub-environment gets a fresh Function layer and shares everything else
//! with its creator: the Module, Global and Mock layers are the same stores,
//! and `m`, root `m` and the host node refer to the same objects.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use brs_ir::ast::Identifier;
use brs_values::components::RoAssociativeArray;
use brs_values::errors::unresolved_reference;
use brs_values::{EvalResult, ObjectRef, Value};
use rustc_hash::FxHashMap;

/// Pseudo-identifier that evaluates to the referencing line.
pub const LINE_NUM: &str = "line_num";

/// A variable layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Locals of the current call frame.
    Function,
    /// Functions declared in the program being run.
    Module,
    /// Built-in global functions.
    Global,
    /// Test doubles installed by a host.
    Mock,
}

/// A single-threaded, shared, mutable layer.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// Whether both handles refer to the same store.
    pub fn ptr_eq(&self, other: &LocalScope<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Bindings keyed by lower-cased name.
#[derive(Clone, Debug, Default)]
pub struct Layer {
    bindings: FxHashMap<String, Value>,
}

impl Layer {
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(&name.to_ascii_lowercase())
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(&name.to_ascii_lowercase())
    }

    pub fn insert(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_ascii_lowercase(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.bindings.remove(&name.to_ascii_lowercase())
    }

    /// Lower-cased names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

pub struct Environment {
    function: Layer,
    module: LocalScope<Layer>,
    global: LocalScope<Layer>,
    mock: LocalScope<Layer>,
    m: Value,
    root_m: Value,
    host_node: Option<ObjectRef>,
}

impl Environment {
    /// An empty environment whose `m` and root `m` are the same fresh
    /// associative array.
    pub fn new() -> Self {
        let m = Value::Object(RoAssociativeArray::object());
        Environment::with_root_m(m)
    }

    pub fn with_root_m(root_m: Value) -> Self {
        Environment {
            function: Layer::default(),
            module: LocalScope::default(),
            global: LocalScope::default(),
            mock: LocalScope::default(),
            m: root_m.clone(),
            root_m,
            host_node: None,
        }
    }

    pub fn define(&mut self, scope: Scope, name: &str, value: Value) {
        match scope {
            Scope::Function => self.function.insert(name, value),
            Scope::Module => self.module.borrow_mut().insert(name, value),
            Scope::Global => self.global.borrow_mut().insert(name, value),
            Scope::Mock => self.mock.borrow_mut().insert(name, value),
        }
    }

    /// Resolve an identifier through `m`, the line pseudo-identifier and the
    /// four layers.
    pub fn get(&self, identifier: &Identifier) -> EvalResult {
        self.lookup(identifier).ok_or_else(|| {
            unresolved_reference(&identifier.name).with_location(identifier.location.clone())
        })
    }

    pub fn has(&self, identifier: &Identifier) -> bool {
        self.lookup(identifier).is_some()
    }

    fn lookup(&self, identifier: &Identifier) -> Option<Value> {
        let name = identifier.name.as_str();
        if name.eq_ignore_ascii_case("m") {
            return Some(self.m.clone());
        }
        if name.eq_ignore_ascii_case(LINE_NUM) {
            let line = i32::try_from(identifier.location.line()).unwrap_or(i32::MAX);
            return Some(Value::Int32(line));
        }
        self.get_by_name(name)
    }

    /// Plain layered lookup by name.
    pub fn get_by_name(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.function.get(name) {
            return Some(value.clone());
        }
        [&self.module, &self.global, &self.mock]
            .into_iter()
            .find_map(|layer| layer.borrow().get(name).cloned())
    }

    /// Remove a Function-layer binding. Names in shared layers are left
    /// alone.
    pub fn remove(&mut self, name: &str) {
        self.function.remove(name);
    }

    /// Names bound in `scope`.
    pub fn names(&self, scope: Scope) -> Vec<String> {
        match scope {
            Scope::Function => self.function.names(),
            Scope::Module => self.module.borrow().names(),
            Scope::Global => self.global.borrow().names(),
            Scope::Mock => self.mock.borrow().names(),
        }
    }

    pub fn get_m(&self) -> Value {
        self.m.clone()
    }

    pub fn set_m(&mut self, m: Value) {
        self.m = m;
    }

    pub fn get_root_m(&self) -> Value {
        self.root_m.clone()
    }

    pub fn set_root_m(&mut self, root_m: Value) {
        self.root_m = root_m;
    }

    pub fn host_node(&self) -> Option<ObjectRef> {
        self.host_node.clone()
    }

    pub fn set_host_node(&mut self, node: Option<ObjectRef>) {
        self.host_node = node;
    }

    /// Environment for a new call frame.
    pub fn create_sub_environment(&self) -> Environment {
        Environment {
            function: Layer::default(),
            module: self.module.clone(),
            global: self.global.clone(),
            mock: self.mock.clone(),
            m: self.m.clone(),
            root_m: self.root_m.clone(),
            host_node: self.host_node.clone(),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("function", &self.function.names())
            .field("module", &self.module.borrow().len())
            .field("global", &self.global.borrow().len())
            .field("mock", &self.mock.borrow().len())
            .field("m", &self.m)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
