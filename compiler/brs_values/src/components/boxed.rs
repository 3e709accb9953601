//! Boxed scalars: `roInt`, `roLongInteger`, `roFloat`, `roDouble`,
//! `roString`, `roBoolean`, `roInvalid`.
//!
//! A boxed scalar compares equal to its contents and is unboxed for
//! arithmetic. The operations available depend on the wrapped kind.

use std::any::Any;

use brs_ir::ValueKind;

use super::{receiver, receiver_mut};
use crate::{
    Argument, BrsComponent, Callable, EvalResult, Executor, Interfaces, ObjectRef, Signature,
    Value,
};

pub struct BoxedScalar {
    value: Value,
    name: &'static str,
    interfaces: Interfaces,
}

impl BoxedScalar {
    /// Box a scalar. Returns `None` for callables and objects.
    pub fn new(value: Value) -> Option<Self> {
        let name = component_name_for(value.kind())?;
        let mut interfaces = Interfaces::new();
        interfaces.register(
            "ifToStr",
            vec![Callable::method(
                "toStr",
                Signature::new(vec![], ValueKind::String),
                to_str,
            )],
        );
        register_accessors(&mut interfaces, value.kind());

        Some(BoxedScalar {
            value,
            name,
            interfaces,
        })
    }

    /// Box a scalar straight into an object reference. Non-scalars are
    /// boxed as `roInvalid`.
    pub fn object(value: Value) -> ObjectRef {
        match BoxedScalar::new(value) {
            Some(boxed) => ObjectRef::new(boxed),
            None => ObjectRef::new(BoxedScalar::invalid()),
        }
    }

    fn invalid() -> Self {
        let mut interfaces = Interfaces::new();
        interfaces.register(
            "ifToStr",
            vec![Callable::method(
                "toStr",
                Signature::new(vec![], ValueKind::String),
                to_str,
            )],
        );
        BoxedScalar {
            value: Value::Invalid,
            name: "roInvalid",
            interfaces,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Component name for a boxable kind.
pub(crate) fn component_name_for(kind: ValueKind) -> Option<&'static str> {
    match kind {
        ValueKind::Int32 => Some("roInt"),
        ValueKind::Int64 => Some("roLongInteger"),
        ValueKind::Float => Some("roFloat"),
        ValueKind::Double => Some("roDouble"),
        ValueKind::String => Some("roString"),
        ValueKind::Boolean => Some("roBoolean"),
        ValueKind::Invalid => Some("roInvalid"),
        _ => None,
    }
}

fn register_accessors(interfaces: &mut Interfaces, kind: ValueKind) {
    let (interface, getter, setter) = match kind {
        ValueKind::Int32 => ("ifInt", "getInt", "setInt"),
        ValueKind::Int64 => ("ifLongInt", "getLongInt", "setLongInt"),
        ValueKind::Float => ("ifFloat", "getFloat", "setFloat"),
        ValueKind::Double => ("ifDouble", "getDouble", "setDouble"),
        ValueKind::Boolean => ("ifBoolean", "getBoolean", "setBoolean"),
        ValueKind::String => ("ifString", "getString", "setString"),
        _ => return,
    };
    interfaces.register(
        interface,
        vec![
            Callable::method(getter, Signature::new(vec![], kind), get_value),
            Callable::method(
                setter,
                Signature::new(vec![Argument::required("value", kind)], ValueKind::Void),
                set_value,
            ),
        ],
    );

    if kind == ValueKind::String {
        register_string_ops(interfaces);
    }
}

fn register_string_ops(interfaces: &mut Interfaces) {
    let int = |name: &str| Argument::required(name, ValueKind::Int32);
    let string = |name: &str| Argument::required(name, ValueKind::String);
    interfaces.register(
        "ifStringOps",
        vec![
            Callable::method("len", Signature::new(vec![], ValueKind::Int32), len),
            Callable::method(
                "left",
                Signature::new(vec![int("length")], ValueKind::String),
                left,
            ),
            Callable::method(
                "right",
                Signature::new(vec![int("length")], ValueKind::String),
                right,
            ),
            Callable::overloaded_method(
                "mid",
                vec![
                    Signature::new(vec![int("start")], ValueKind::String),
                    Signature::new(vec![int("start"), int("length")], ValueKind::String),
                ],
                mid,
            ),
            Callable::overloaded_method(
                "instr",
                vec![
                    Signature::new(vec![string("substring")], ValueKind::Int32),
                    Signature::new(vec![int("start"), string("substring")], ValueKind::Int32),
                ],
                instr,
            ),
            Callable::method("lCase", Signature::new(vec![], ValueKind::String), lcase),
            Callable::method("uCase", Signature::new(vec![], ValueKind::String), ucase),
            Callable::method("trim", Signature::new(vec![], ValueKind::String), trim),
        ],
    );
}

impl BrsComponent for BoxedScalar {
    fn component_name(&self) -> &str {
        self.name
    }

    fn interfaces(&self) -> &Interfaces {
        &self.interfaces
    }

    fn interfaces_mut(&mut self) -> &mut Interfaces {
        &mut self.interfaces
    }

    fn equal_to(&self, other: &Value) -> bool {
        self.value.equal_to(other)
    }

    fn render(&self, _this: &ObjectRef, _parent: Option<&ObjectRef>) -> String {
        self.value.render(None)
    }

    fn unbox(&self) -> Option<Value> {
        Some(self.value.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn to_str(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    receiver(this, |b: &BoxedScalar| Value::string(b.value.render(None)))
}

fn get_value(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    receiver(this, |b: &BoxedScalar| b.value.clone())
}

fn set_value(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let value = args.first().map(Value::unboxed).unwrap_or(Value::Invalid);
    receiver_mut(this, |b: &mut BoxedScalar| {
        if value.kind() == b.value.kind() {
            b.value = value;
        }
    })?;
    Ok(Value::Invalid)
}

// ifStringOps

fn text_of(this: &ObjectRef) -> Result<String, crate::EvalError> {
    receiver(this, |b: &BoxedScalar| {
        b.value.as_str().unwrap_or_default().to_string()
    })
}

fn count_arg(args: &[Value], i: usize) -> usize {
    args.get(i)
        .and_then(Value::as_numeric)
        .map_or(0, |n| usize::try_from(n.as_i64()).unwrap_or(0))
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "string lengths are far below i32::MAX"
)]
fn len(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    Ok(Value::Int32(text_of(this)?.chars().count() as i32))
}

fn left(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let n = count_arg(args, 0);
    Ok(Value::string(text_of(this)?.chars().take(n).collect::<String>()))
}

fn right(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let text = text_of(this)?;
    let n = count_arg(args, 0);
    let skip = text.chars().count().saturating_sub(n);
    Ok(Value::string(text.chars().skip(skip).collect::<String>()))
}

/// `mid(start)` or `mid(start, length)`, zero-based.
fn mid(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let text = text_of(this)?;
    let start = count_arg(args, 0);
    let rest = text.chars().skip(start);
    let result: String = if args.len() > 1 {
        rest.take(count_arg(args, 1)).collect()
    } else {
        rest.collect()
    };
    Ok(Value::string(result))
}

/// `instr(substring)` or `instr(start, substring)`: zero-based character
/// index of the first match at or after `start`, or -1.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "string lengths are far below i32::MAX"
)]
fn instr(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let text = text_of(this)?;
    let (start, needle) = if args.len() > 1 {
        (count_arg(args, 0), args.get(1))
    } else {
        (0, args.first())
    };
    let needle = needle.and_then(Value::as_str).unwrap_or_default();

    let chars: Vec<char> = text.chars().collect();
    let needle: Vec<char> = needle.chars().collect();
    let found = (start..=chars.len().saturating_sub(needle.len()))
        .find(|&i| chars.get(i..i + needle.len()) == Some(needle.as_slice()));
    Ok(Value::Int32(found.map_or(-1, |i| i as i32)))
}

fn lcase(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    Ok(Value::string(text_of(this)?.to_lowercase()))
}

fn ucase(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    Ok(Value::string(text_of(this)?.to_uppercase()))
}

fn trim(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    Ok(Value::string(text_of(this)?.trim()))
}

#[cfg(test)]
mod tests;
