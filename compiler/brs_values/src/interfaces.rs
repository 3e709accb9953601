//! Per-object dispatch tables.
//!
//! Operations are registered in named capability groups ("interfaces") for
//! introspection, but invocation only ever consults the flat lower-cased
//! name map. Tables grow at any time; individual entries can be removed.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::Callable;

#[derive(Clone, Debug, Default)]
pub struct Interfaces {
    /// Interface name and the lower-cased operation names it contributed.
    groups: Vec<(String, Vec<String>)>,
    methods: FxHashMap<String, Rc<Callable>>,
}

impl Interfaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `methods` under `interface`. Later registrations of the same
    /// operation name replace earlier ones in the flat map.
    pub fn register(&mut self, interface: &str, methods: Vec<Callable>) {
        let names: Vec<String> = methods
            .into_iter()
            .map(|method| {
                let key = method.name().to_ascii_lowercase();
                self.methods.insert(key.clone(), Rc::new(method));
                key
            })
            .collect();

        match self
            .groups
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case(interface))
        {
            Some((_, existing)) => existing.extend(names),
            None => self.groups.push((interface.to_string(), names)),
        }
    }

    /// Case-insensitive operation lookup.
    pub fn get(&self, name: &str) -> Option<Rc<Callable>> {
        self.methods.get(&name.to_ascii_lowercase()).cloned()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(&name.to_ascii_lowercase())
    }

    /// Remove one operation. The interface group itself stays.
    pub fn remove(&mut self, name: &str) -> bool {
        let key = name.to_ascii_lowercase();
        for (_, names) in &mut self.groups {
            names.retain(|n| *n != key);
        }
        self.methods.remove(&key).is_some()
    }

    pub fn has_interface(&self, interface: &str) -> bool {
        self.groups
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(interface))
    }

    pub fn interface_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_str())
    }

    /// Operation names registered under `interface`, lower-cased.
    pub fn operations_of(&self, interface: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(interface))
            .map(|(_, names)| names.as_slice())
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
