//! `roAssociativeArray`: case-insensitive string-keyed map.
//!
//! Keys keep the spelling of their first insertion and enumerate in
//! insertion order. `keys()` and `items()` return them sorted.

use std::any::Any;

use brs_ir::ValueKind;
use rustc_hash::FxHashMap;

use super::{receiver, receiver_mut, RoArray};
use crate::{
    Argument, BrsComponent, Callable, EvalError, EvalResult, Executor, Interfaces, ObjectRef,
    Signature, Value,
};

pub struct RoAssociativeArray {
    entries: Vec<(String, Value)>,
    /// Lower-cased key to position in `entries`.
    index: FxHashMap<String, usize>,
    interfaces: Interfaces,
}

impl Default for RoAssociativeArray {
    fn default() -> Self {
        Self::new()
    }
}

impl RoAssociativeArray {
    pub fn new() -> Self {
        let key = || Argument::required("key", ValueKind::String);
        let mut interfaces = Interfaces::new();
        interfaces.register(
            "ifAssociativeArray",
            vec![
                Callable::method(
                    "addReplace",
                    Signature::new(
                        vec![key(), Argument::required("value", ValueKind::Dynamic)],
                        ValueKind::Void,
                    ),
                    add_replace,
                ),
                Callable::method(
                    "lookup",
                    Signature::new(vec![key()], ValueKind::Dynamic),
                    lookup,
                ),
                Callable::method(
                    "doesExist",
                    Signature::new(vec![key()], ValueKind::Boolean),
                    does_exist,
                ),
                Callable::method(
                    "delete",
                    Signature::new(vec![key()], ValueKind::Boolean),
                    delete,
                ),
                Callable::method("clear", Signature::new(vec![], ValueKind::Void), clear),
                Callable::method("count", Signature::new(vec![], ValueKind::Int32), count),
                Callable::method("keys", Signature::new(vec![], ValueKind::Object), keys),
                Callable::method("items", Signature::new(vec![], ValueKind::Object), items),
                Callable::method(
                    "append",
                    Signature::new(
                        vec![Argument::required("aa", ValueKind::Object)],
                        ValueKind::Void,
                    ),
                    append,
                ),
            ],
        );
        interfaces.register(
            "ifEnum",
            vec![Callable::method(
                "isEmpty",
                Signature::new(vec![], ValueKind::Boolean),
                is_empty,
            )],
        );

        RoAssociativeArray {
            entries: Vec::new(),
            index: FxHashMap::default(),
            interfaces,
        }
    }

    pub fn object() -> ObjectRef {
        ObjectRef::new(RoAssociativeArray::new())
    }

    /// Build from `(key, value)` pairs, later duplicates replacing earlier.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Value)>) -> Self {
        let mut aa = RoAssociativeArray::new();
        for (key, value) in entries {
            aa.insert(&key, value);
        }
        aa
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        let i = *self.index.get(&key.to_ascii_lowercase())?;
        self.entries.get(i).map(|(_, value)| value)
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        let lower = key.to_ascii_lowercase();
        match self.index.get(&lower) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(lower, self.entries.len());
                self.entries.push((key.to_string(), value));
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        let Some(i) = self.index.remove(&key.to_ascii_lowercase()) else {
            return false;
        };
        self.entries.remove(i);
        for position in self.index.values_mut() {
            if *position > i {
                *position -= 1;
            }
        }
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(&key.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    fn sorted_entries(&self) -> Vec<(String, Value)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(|(key, _)| key.to_ascii_lowercase());
        sorted
    }
}

impl BrsComponent for RoAssociativeArray {
    fn component_name(&self) -> &str {
        "roAssociativeArray"
    }

    fn interfaces(&self) -> &Interfaces {
        &self.interfaces
    }

    fn interfaces_mut(&mut self) -> &mut Interfaces {
        &mut self.interfaces
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }

    fn set_field(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        self.insert(name, value);
        Ok(())
    }

    fn elements(&self) -> Option<Vec<Value>> {
        Some(
            self.entries
                .iter()
                .map(|(key, _)| Value::string(key.as_str()))
                .collect(),
        )
    }

    fn render(&self, this: &ObjectRef, parent: Option<&ObjectRef>) -> String {
        if parent.is_some() {
            return "<Component: roAssociativeArray>".to_string();
        }
        let mut out = String::from("<Component: roAssociativeArray> =\n{\n");
        for (key, value) in &self.entries {
            out.push_str(&format!("    {key}: {}\n", value.render(Some(this))));
        }
        out.push('}');
        out
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn key_arg(args: &[Value]) -> String {
    args.first()
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn add_replace(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let key = key_arg(args);
    let value = args.get(1).cloned().unwrap_or(Value::Invalid);
    receiver_mut(this, |aa: &mut RoAssociativeArray| aa.insert(&key, value))?;
    Ok(Value::Invalid)
}

fn lookup(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let key = key_arg(args);
    receiver(this, |aa: &RoAssociativeArray| {
        aa.get(&key).cloned().unwrap_or(Value::Invalid)
    })
}

fn does_exist(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let key = key_arg(args);
    receiver(this, |aa: &RoAssociativeArray| Value::Boolean(aa.contains(&key)))
}

fn delete(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let key = key_arg(args);
    receiver_mut(this, |aa: &mut RoAssociativeArray| Value::Boolean(aa.remove(&key)))
}

fn clear(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    receiver_mut(this, RoAssociativeArray::clear)?;
    Ok(Value::Invalid)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "script maps never approach i32::MAX entries"
)]
fn count(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    receiver(this, |aa: &RoAssociativeArray| Value::Int32(aa.len() as i32))
}

fn keys(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    let sorted = receiver(this, RoAssociativeArray::sorted_entries)?;
    let keys = sorted.into_iter().map(|(key, _)| Value::from(key)).collect();
    Ok(Value::Object(RoArray::object(keys)))
}

fn items(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    let sorted = receiver(this, RoAssociativeArray::sorted_entries)?;
    let items = sorted
        .into_iter()
        .map(|(key, value)| {
            let item = RoAssociativeArray::from_entries([
                ("key".to_string(), Value::from(key)),
                ("value".to_string(), value),
            ]);
            Value::Object(ObjectRef::new(item))
        })
        .collect();
    Ok(Value::Object(RoArray::object(items)))
}

fn append(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let Some(other) = args.first().and_then(Value::as_object) else {
        return Ok(Value::Invalid);
    };
    let Some(extra) = other.with(|aa: &RoAssociativeArray| aa.entries.clone()) else {
        return Ok(Value::Invalid);
    };
    receiver_mut(this, |aa: &mut RoAssociativeArray| {
        for (key, value) in extra {
            aa.insert(&key, value);
        }
    })?;
    Ok(Value::Invalid)
}

fn is_empty(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    receiver(this, |aa: &RoAssociativeArray| Value::Boolean(aa.is_empty()))
}
