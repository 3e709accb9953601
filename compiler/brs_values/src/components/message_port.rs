//! `roMessagePort` and the `roUniversalControlEvent` it delivers.

use std::any::Any;
use std::rc::Rc;
use std::time::Duration;

use brs_ir::ValueKind;

use super::receiver;
use crate::context::InputEvent;
use crate::{
    Argument, BrsComponent, Callable, EvalResult, Executor, Interfaces, ObjectRef, RuntimeContext,
    Signature, Value,
};

pub struct RoMessagePort {
    context: Rc<RuntimeContext>,
    interfaces: Interfaces,
}

impl RoMessagePort {
    pub fn new(context: Rc<RuntimeContext>) -> Self {
        let mut interfaces = Interfaces::new();
        interfaces.register(
            "ifMessagePort",
            vec![
                Callable::method(
                    "waitMessage",
                    Signature::new(
                        vec![Argument::required("timeout", ValueKind::Int32)],
                        ValueKind::Object,
                    ),
                    wait_message,
                ),
                Callable::method(
                    "getMessage",
                    Signature::new(vec![], ValueKind::Object),
                    get_message,
                ),
            ],
        );
        RoMessagePort {
            context,
            interfaces,
        }
    }

    /// Wait for the next event. A timeout of zero or less waits until
    /// input closes.
    pub fn wait(&self, timeout_ms: i64) -> Value {
        wait_on(&self.context, timeout_ms)
    }

    /// Wait on `port` if it is a message port, without keeping it borrowed
    /// while blocking. `None` for any other object.
    pub fn wait_object(port: &ObjectRef, timeout_ms: i64) -> Option<Value> {
        let context = port.with(|port: &RoMessagePort| Rc::clone(&port.context))?;
        Some(wait_on(&context, timeout_ms))
    }

    pub fn poll(&self) -> Value {
        event_value(self.context.poll_input())
    }
}

fn wait_on(context: &RuntimeContext, timeout_ms: i64) -> Value {
    let timeout = u64::try_from(timeout_ms)
        .ok()
        .filter(|&ms| ms > 0)
        .map(Duration::from_millis);
    event_value(context.wait_input(timeout))
}

fn event_value(event: Option<InputEvent>) -> Value {
    match event {
        Some(event) => Value::Object(ObjectRef::new(RoUniversalControlEvent::new(event))),
        None => Value::Invalid,
    }
}

impl BrsComponent for RoMessagePort {
    fn component_name(&self) -> &str {
        "roMessagePort"
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

fn wait_message(_: &mut dyn Executor, this: &ObjectRef, args: &[Value]) -> EvalResult {
    let timeout = args.first().and_then(Value::as_numeric).map_or(0, |n| n.as_i64());
    // The port is not borrowed while blocking.
    let context = receiver(this, |port: &RoMessagePort| Rc::clone(&port.context))?;
    Ok(wait_on(&context, timeout))
}

fn get_message(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    receiver(this, RoMessagePort::poll)
}

/// A remote-control key press or release.
pub struct RoUniversalControlEvent {
    event: InputEvent,
    interfaces: Interfaces,
}

impl RoUniversalControlEvent {
    pub fn new(event: InputEvent) -> Self {
        let mut interfaces = Interfaces::new();
        interfaces.register(
            "ifroUniversalControlEvent",
            vec![
                Callable::method("getInt", Signature::new(vec![], ValueKind::Int32), get_int),
                Callable::method("getId", Signature::new(vec![], ValueKind::Int32), get_id),
                Callable::method("isPress", Signature::new(vec![], ValueKind::Boolean), is_press),
            ],
        );
        RoUniversalControlEvent { event, interfaces }
    }

    pub fn event(&self) -> InputEvent {
        self.event
    }
}

impl BrsComponent for RoUniversalControlEvent {
    fn component_name(&self) -> &str {
        "roUniversalControlEvent"
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

fn get_int(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    receiver(this, |e: &RoUniversalControlEvent| Value::Int32(e.event.key))
}

/// Remote identifier. Only one remote is modelled.
fn get_id(_: &mut dyn Executor, _: &ObjectRef, _: &[Value]) -> EvalResult {
    Ok(Value::Int32(0))
}

fn is_press(_: &mut dyn Executor, this: &ObjectRef, _: &[Value]) -> EvalResult {
    receiver(this, |e: &RoUniversalControlEvent| {
        Value::Boolean(e.event.is_press())
    })
}
