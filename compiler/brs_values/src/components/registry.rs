//! `roRegistrySection`: a named section of the persistent key/value store.

use std::any::Any;
use std::rc::Rc;

use brs_ir::ValueKind;

use super::{receiver, RoArray};
use crate::{
    Argument, BrsComponent, Callable, EvalResult, Executor, Interfaces, ObjectRef, RuntimeContext,
    Signature, Value,
};

pub struct RoRegistrySection {
    section: String,
    context: Rc<RuntimeContext>,
    interfaces: Interfaces,
}

impl RoRegistrySection {
    pub fn new(section: &str, context: Rc<RuntimeContext>) -> Self {
        let key = || Argument::required("key", ValueKind::String);
        let mut interfaces = Interfaces::new();
        interfaces.register(
            "ifRegistrySection",
            vec![
                Callable::method("read", Signature::new(vec![key()], ValueKind::String), read),
                Callable::method(
                    "write",
                    Signature::new(
                        vec![key(), Argument::required("value", ValueKind::String)],
                        ValueKind::Boolean,
                    ),
                    write,
                ),
                Callable::method("delete", Signature::new(vec![key()], ValueKind::Boolean), delete),
                Callable::method("exists", Signature::new(vec![key()], ValueKind::Boolean), exists),
                Callable::method("flush", Signature::new(vec![], ValueKind::Boolean), flush),
                Callable::method(
                    "getKeyList",
                    Signature::new(vec![], ValueKind::Object),
                    get_key_list,
                ),
            ],
        );
        RoRegistrySection {
            section: section.to_string(),
            context,
            interfaces,
        }
    }

    pub fn section(&self) -> &str {
        &self.section
    }
}

impl BrsComponent for RoRegistrySection {
    fn component_name(&self) -> &str {
        "roRegistrySection"
    }

    fn interfaces(&self) -> &Interfaces {
        &self.interfaces
    }

    fn interfaces_mut(&mut self) -> &mut Interfaces {
        &mut self.interfaces
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn key_arg(args: &[Value]) -> &str {
    args.first().and_then(Value::as_str).unwrap_or("")
}

/// Missing keys read as the empty string.
fn read(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let key = key_arg(args);
    receiver(this, |r: &RoRegistrySection| {
        Value::string(r.context.registry_read(&r.section, key).unwrap_or_default())
    })
}

fn write(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let key = key_arg(args);
    let value = args.get(1).and_then(Value::as_str).unwrap_or("");
    receiver(this, |r: &RoRegistrySection| {
        r.context.registry_write(&r.section, key, value);
        Value::Boolean(true)
    })
}

fn delete(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let key = key_arg(args);
    receiver(this, |r: &RoRegistrySection| {
        Value::Boolean(r.context.registry_delete(&r.section, key))
    })
}

fn exists(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let key = key_arg(args);
    receiver(this, |r: &RoRegistrySection| {
        Value::Boolean(r.context.registry_read(&r.section, key).is_some())
    })
}

/// Writes are applied to the store immediately; persisting it is the host's
/// job.
fn flush(_: &mut dyn Executor, _: &ObjectRef, _: &[Value]) -> EvalResult {
    Ok(Value::Boolean(true))
}

fn get_key_list(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    let keys = receiver(this, |r: &RoRegistrySection| r.context.registry_keys(&r.section))?;
    let keys = keys.into_iter().map(Value::from).collect();
    Ok(Value::Object(RoArray::object(keys)))
}

#[cfg(test)]
mod tests;
