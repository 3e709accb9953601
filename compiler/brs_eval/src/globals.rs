//! Global functions, defined in the Global layer of every interpreter.

use std::rc::Rc;

use brs_ir::ValueKind;
use brs_values::components::{create_object, RoMessagePort};
use brs_values::{
    box_value, type_name, Argument, Callable, EvalResult, Executor, Signature, Value,
};

use crate::environment::{Environment, Scope};

pub fn register_globals(env: &mut Environment) {
    for callable in global_functions() {
        let name = callable.name().to_string();
        env.define(Scope::Global, &name, Value::Callable(Rc::new(callable)));
    }
}

fn global_functions() -> Vec<Callable> {
    let value = || Argument::required("value", ValueKind::Dynamic);
    let mut create_args = vec![Argument::required("name", ValueKind::String)];
    create_args.extend(
        (1..=5).map(|i| Argument::optional(format!("arg{i}"), ValueKind::Dynamic, Value::Invalid)),
    );

    vec![
        Callable::native(
            "CreateObject",
            Signature::new(create_args, ValueKind::Dynamic),
            create_object_fn,
        ),
        Callable::native(
            "Type",
            Signature::new(
                vec![
                    value(),
                    Argument::optional("version", ValueKind::Int32, Value::Int32(2)),
                ],
                ValueKind::String,
            ),
            type_fn,
        ),
        Callable::native("Box", Signature::new(vec![value()], ValueKind::Dynamic), box_fn),
        Callable::native(
            "Wait",
            Signature::new(
                vec![
                    Argument::required("timeout", ValueKind::Int32),
                    Argument::required("port", ValueKind::Object),
                ],
                ValueKind::Dynamic,
            ),
            wait_fn,
        ),
        Callable::native(
            "GetGlobalAA",
            Signature::new(vec![], ValueKind::Object),
            get_global_aa_fn,
        ),
    ]
}

/// Unknown component names are a soft failure: a warning and `invalid`.
fn create_object_fn(executor: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let name = args.first().and_then(Value::as_str).unwrap_or("");
    let rest = args.get(1..).unwrap_or(&[]);
    match create_object(name, rest, &executor.context()) {
        Some(object) => Ok(Value::Object(object)),
        None => {
            tracing::warn!(component = name, "CreateObject: unknown component or bad arguments");
            Ok(Value::Invalid)
        }
    }
}

fn type_fn(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let value = args.first().cloned().unwrap_or(Value::Invalid);
    let version = args.get(1).and_then(Value::as_numeric).map_or(2, |n| n.as_i32());
    Ok(Value::string(type_name(&value, version)))
}

fn box_fn(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    Ok(box_value(args.first().cloned().unwrap_or(Value::Invalid)))
}

/// Blocks on the port's input source. Objects other than ports yield
/// `invalid`.
fn wait_fn(_: &mut dyn Executor, args: &[Value]) -> EvalResult {
    let timeout = args.first().and_then(Value::as_numeric).map_or(0, |n| n.as_i64());
    let Some(port) = args.get(1).and_then(Value::as_object) else {
        return Ok(Value::Invalid);
    };
    Ok(RoMessagePort::wait_object(port, timeout).unwrap_or(Value::Invalid))
}

fn get_global_aa_fn(executor: &mut dyn Executor, _: &[Value]) -> EvalResult {
    Ok(Value::Object(executor.global_aa()))
}
