//! `roArray`: an ordered, growable list.

use std::any::Any;

use brs_ir::ValueKind;

use super::{receiver, receiver_mut};
use crate::errors::{index_out_of_range, invalid_index};
use crate::{
    Argument, BrsComponent, Callable, EvalError, EvalResult, Executor, Interfaces, ObjectRef,
    Signature, Value,
};

/// Largest length an array may grow to through an indexed write.
pub const MAX_ARRAY_LENGTH: usize = 1 << 20;

pub struct RoArray {
    elements: Vec<Value>,
    interfaces: Interfaces,
}

impl RoArray {
    pub fn new(elements: Vec<Value>) -> Self {
        let mut interfaces = Interfaces::new();
        interfaces.register(
            "ifArray",
            vec![
                Callable::method("peek", sig(vec![], ValueKind::Dynamic), peek),
                Callable::method("pop", sig(vec![], ValueKind::Dynamic), pop),
                Callable::method("push", sig(vec![dynamic("value")], ValueKind::Void), push),
                Callable::method("shift", sig(vec![], ValueKind::Dynamic), shift),
                Callable::method("unshift", sig(vec![dynamic("value")], ValueKind::Void), unshift),
                Callable::method(
                    "delete",
                    sig(vec![Argument::required("index", ValueKind::Int32)], ValueKind::Boolean),
                    delete,
                ),
                Callable::method("count", sig(vec![], ValueKind::Int32), count),
                Callable::method("clear", sig(vec![], ValueKind::Void), clear),
                Callable::method(
                    "append",
                    sig(vec![Argument::required("array", ValueKind::Object)], ValueKind::Void),
                    append,
                ),
            ],
        );
        interfaces.register(
            "ifArrayGet",
            vec![Callable::method(
                "getEntry",
                sig(vec![dynamic("index")], ValueKind::Dynamic),
                get_entry,
            )],
        );
        interfaces.register(
            "ifArraySet",
            vec![Callable::method(
                "setEntry",
                sig(vec![dynamic("index"), dynamic("value")], ValueKind::Void),
                set_entry,
            )],
        );
        interfaces.register(
            "ifEnum",
            vec![Callable::method("isEmpty", sig(vec![], ValueKind::Boolean), is_empty)],
        );
        interfaces.register(
            "ifArrayJoin",
            vec![Callable::method(
                "join",
                sig(vec![Argument::required("separator", ValueKind::String)], ValueKind::Dynamic),
                join,
            )],
        );

        RoArray {
            elements,
            interfaces,
        }
    }

    pub fn object(elements: Vec<Value>) -> ObjectRef {
        ObjectRef::new(RoArray::new(elements))
    }

    pub fn values(&self) -> &[Value] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn push(&mut self, value: Value) {
        self.elements.push(value);
    }

    /// Element at a script index; out of range reads are `invalid`.
    pub fn get(&self, index: i64) -> Value {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.elements.get(i))
            .cloned()
            .unwrap_or(Value::Invalid)
    }

    /// Store at a script index, growing with `invalid` as needed up to
    /// [`MAX_ARRAY_LENGTH`].
    pub fn set(&mut self, index: i64, value: Value) -> Result<(), EvalError> {
        let i = usize::try_from(index)
            .ok()
            .filter(|&i| i < MAX_ARRAY_LENGTH)
            .ok_or_else(|| index_out_of_range(index, MAX_ARRAY_LENGTH))?;
        if i >= self.elements.len() {
            self.elements.resize(i + 1, Value::Invalid);
        }
        self.elements[i] = value;
        Ok(())
    }
}

fn sig(args: Vec<Argument>, returns: ValueKind) -> Signature {
    Signature::new(args, returns)
}

fn dynamic(name: &str) -> Argument {
    Argument::required(name, ValueKind::Dynamic)
}

fn index_of(index: &Value) -> Result<i64, EvalError> {
    match index.as_numeric() {
        Some(n) => Ok(n.as_i64()),
        None => Err(invalid_index("roArray", index.kind())),
    }
}

impl BrsComponent for RoArray {
    fn component_name(&self) -> &str {
        "roArray"
    }

    fn interfaces(&self) -> &Interfaces {
        &self.interfaces
    }

    fn interfaces_mut(&mut self) -> &mut Interfaces {
        &mut self.interfaces
    }

    fn get_element(&self, index: &Value) -> EvalResult {
        Ok(self.get(index_of(index)?))
    }

    fn set_element(&mut self, index: &Value, value: Value) -> Result<(), EvalError> {
        self.set(index_of(index)?, value)
    }

    fn elements(&self) -> Option<Vec<Value>> {
        Some(self.elements.clone())
    }

    fn render(&self, this: &ObjectRef, parent: Option<&ObjectRef>) -> String {
        if parent.is_some() {
            return "<Component: roArray>".to_string();
        }
        let mut out = String::from("<Component: roArray> =\n[\n");
        for element in &self.elements {
            out.push_str("    ");
            out.push_str(&element.render(Some(this)));
            out.push('\n');
        }
        out.push(']');
        out
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ifArray

fn peek(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    receiver(this, |a: &RoArray| a.elements.last().cloned().unwrap_or(Value::Invalid))
}

fn pop(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    receiver_mut(this, |a: &mut RoArray| a.elements.pop().unwrap_or(Value::Invalid))
}

fn push(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let value = args.first().cloned().unwrap_or(Value::Invalid);
    receiver_mut(this, |a: &mut RoArray| a.elements.push(value))?;
    Ok(Value::Invalid)
}

fn shift(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    receiver_mut(this, |a: &mut RoArray| {
        if a.elements.is_empty() {
            Value::Invalid
        } else {
            a.elements.remove(0)
        }
    })
}

fn unshift(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let value = args.first().cloned().unwrap_or(Value::Invalid);
    receiver_mut(this, |a: &mut RoArray| a.elements.insert(0, value))?;
    Ok(Value::Invalid)
}

fn delete(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let index = args.first().map_or(Ok(-1), index_of)?;
    receiver_mut(this, |a: &mut RoArray| match usize::try_from(index) {
        Ok(i) if i < a.elements.len() => {
            a.elements.remove(i);
            Value::Boolean(true)
        }
        _ => Value::Boolean(false),
    })
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "script arrays never approach i32::MAX elements"
)]
fn count(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    receiver(this, |a: &RoArray| Value::Int32(a.elements.len() as i32))
}

fn clear(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    receiver_mut(this, |a: &mut RoArray| a.elements.clear())?;
    Ok(Value::Invalid)
}

fn append(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let Some(other) = args.first().and_then(Value::as_object) else {
        return Ok(Value::Invalid);
    };
    // Copy first: `other` may be `this`.
    let Some(extra) = other.with(|a: &RoArray| a.elements.clone()) else {
        return Ok(Value::Invalid);
    };
    receiver_mut(this, |a: &mut RoArray| a.elements.extend(extra))?;
    Ok(Value::Invalid)
}

// ifArrayGet / ifArraySet

fn get_entry(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let index = args.first().map_or(Ok(-1), index_of)?;
    receiver(this, |a: &RoArray| a.get(index))
}

fn set_entry(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let index = args.first().map_or(Ok(-1), index_of)?;
    let value = args.get(1).cloned().unwrap_or(Value::Invalid);
    receiver_mut(this, |a: &mut RoArray| a.set(index, value))??;
    Ok(Value::Invalid)
}

// ifEnum

fn is_empty(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    receiver(this, |a: &RoArray| Value::Boolean(a.elements.is_empty()))
}

// ifArrayJoin

/// Join string elements; any non-string element makes the result `invalid`.
fn join(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let separator = args.first().and_then(Value::as_str).unwrap_or("").to_string();
    receiver(this, |a: &RoArray| {
        let parts: Option<Vec<&str>> = a.elements.iter().map(Value::as_str).collect();
        match parts {
            Some(parts) => Value::string(parts.join(&separator)),
            None => Value::Invalid,
        }
    })
}
