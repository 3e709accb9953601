//! Global functions.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use brs_values::components::RoMessagePort;
use brs_values::{
    ChannelInputSource, EvalErrorKind, InputEvent, InputSource, ObjectRef, RuntimeContext, Value,
};
use pretty_assertions::assert_eq;

use crate::interpreter::Interpreter;
use crate::test_helpers::{
    array, assign, call, dotted, dotted_set, int, invalid, method_call, show, string, var,
};

fn global(name: &str, args: Vec<brs_ir::ast::Expr>) -> brs_ir::ast::Expr {
    call(var(name), args)
}

#[test]
fn create_object_is_case_insensitive() {
    let value = Interpreter::new()
        .evaluate(&global("CreateObject", vec![string("ROARRAY")]))
        .unwrap();
    assert_eq!(value.describe(), "roArray");
}

#[test]
fn create_object_passes_constructor_arguments() {
    let value = Interpreter::new()
        .evaluate(&global("CreateObject", vec![string("roSGNode"), string("Label")]))
        .unwrap();
    assert_eq!(value.describe(), "roSGNode");
}

#[test]
fn unknown_component_is_invalid() {
    let value = Interpreter::new()
        .evaluate(&global("createobject", vec![string("roNothing")]))
        .unwrap();
    assert!(value.is_invalid());
}

#[test]
fn create_object_requires_a_name() {
    let error = Interpreter::new()
        .evaluate(&global("CreateObject", vec![]))
        .unwrap_err();
    assert!(matches!(error.kind, EvalErrorKind::ArityMismatch { .. }));
}

#[test]
fn type_names_by_version() {
    let mut interpreter = Interpreter::new();
    let legacy = interpreter.evaluate(&global("Type", vec![int(1)])).unwrap();
    let current = interpreter.evaluate(&global("Type", vec![int(1), int(3)])).unwrap();
    let nothing = interpreter.evaluate(&global("type", vec![invalid()])).unwrap();
    assert_eq!(legacy.as_str(), Some("Integer"));
    assert_eq!(current.as_str(), Some("roInt"));
    assert_eq!(nothing.as_str(), Some("Invalid"));
}

#[test]
fn box_wraps_scalars() {
    let mut interpreter = Interpreter::new();
    interpreter
        .exec_statement(&assign("boxed", global("Box", vec![string("hi")])))
        .unwrap();
    let kind = interpreter
        .evaluate(&global("Type", vec![var("boxed")]))
        .unwrap();
    let text = interpreter
        .evaluate(&method_call(var("boxed"), "toStr", vec![]))
        .unwrap();
    assert_eq!(kind.as_str(), Some("roString"));
    assert_eq!(text.as_str(), Some("hi"));
}

#[test]
fn global_aa_is_shared() {
    let mut interpreter = Interpreter::new();
    interpreter
        .exec_statement(&dotted_set(global("GetGlobalAA", vec![]), "theme", string("dark")))
        .unwrap();
    let theme = interpreter
        .evaluate(&dotted(global("GetGlobalAA", vec![]), "theme"))
        .unwrap();
    assert_eq!(theme.as_str(), Some("dark"));
}

#[test]
fn wait_returns_queued_event() {
    let (sender, source) = ChannelInputSource::channel();
    let context = Rc::new(
        RuntimeContext::builder()
            .input_source(Box::new(source))
            .build(),
    );
    sender.send(InputEvent::new(6)).unwrap();

    let mut interpreter = Interpreter::builder().context(context).build();
    interpreter
        .exec_statement(&assign("port", global("CreateObject", vec![string("roMessagePort")])))
        .unwrap();
    let event = interpreter
        .evaluate(&global("Wait", vec![int(0), var("port")]))
        .unwrap();
    assert_eq!(event.describe(), "roUniversalControlEvent");

    let key = match &event {
        Value::Object(object) => object
            .get_operation("getInt")
            .map(|op| interpreter.call_callable(&op, vec![], None).unwrap()),
        _ => None,
    };
    assert_eq!(key.as_ref().map(show), Some("Int32(6)".to_string()));
}

#[test]
fn wait_times_out_with_invalid() {
    let (_sender, source) = ChannelInputSource::channel();
    let context = Rc::new(
        RuntimeContext::builder()
            .input_source(Box::new(source))
            .build(),
    );
    let mut interpreter = Interpreter::builder().context(context).build();
    interpreter
        .exec_statement(&assign("port", global("CreateObject", vec![string("roMessagePort")])))
        .unwrap();
    let event = interpreter
        .evaluate(&global("Wait", vec![int(10), var("port")]))
        .unwrap();
    assert!(event.is_invalid());
}

/// Input source that mutably borrows the port from inside a blocking wait.
struct PortTouchingSource {
    port: Rc<RefCell<Option<ObjectRef>>>,
}

impl InputSource for PortTouchingSource {
    fn wait(&mut self, _: Option<Duration>) -> Option<InputEvent> {
        let port = self.port.borrow().clone()?;
        port.with_mut(|_: &mut RoMessagePort| ())?;
        Some(InputEvent::new(1))
    }

    fn try_next(&mut self) -> Option<InputEvent> {
        None
    }
}

#[test]
fn wait_does_not_hold_the_port_while_blocking() {
    let slot = Rc::new(RefCell::new(None));
    let source = PortTouchingSource {
        port: Rc::clone(&slot),
    };
    let context = Rc::new(
        RuntimeContext::builder()
            .input_source(Box::new(source))
            .build(),
    );
    let mut interpreter = Interpreter::builder().context(context).build();
    let port = interpreter
        .evaluate(&global("CreateObject", vec![string("roMessagePort")]))
        .unwrap();
    *slot.borrow_mut() = port.as_object().cloned();
    interpreter
        .env_mut()
        .define(crate::Scope::Function, "port", port);

    let event = interpreter
        .evaluate(&global("Wait", vec![int(0), var("port")]))
        .unwrap();
    assert_eq!(event.describe(), "roUniversalControlEvent");
}

#[test]
fn wait_on_a_non_port_is_invalid() {
    let value = Interpreter::new()
        .evaluate(&global("Wait", vec![int(1), array(vec![])]))
        .unwrap();
    assert!(value.is_invalid());
}
