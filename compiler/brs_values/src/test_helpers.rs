//! Minimal `Executor` for exercising built-in operations without the
//! evaluator.

use std::rc::Rc;

use crate::components::RoAssociativeArray;
use crate::{EvalError, EvalResult, Executor, Implementation, ObjectRef, RuntimeContext, Value};

pub(crate) struct TestExecutor {
    context: Rc<RuntimeContext>,
    m: Value,
    host_node: Option<ObjectRef>,
    global: ObjectRef,
}

impl TestExecutor {
    pub(crate) fn new() -> Self {
        Self::with_context(Rc::new(RuntimeContext::builder().build()))
    }

    pub(crate) fn with_context(context: Rc<RuntimeContext>) -> Self {
        TestExecutor {
            context,
            m: Value::Invalid,
            host_node: None,
            global: ObjectRef::new(RoAssociativeArray::new()),
        }
    }
}

impl Executor for TestExecutor {
    fn call(&mut self, callable: &Rc<crate::Callable>, args: Vec<Value>) -> EvalResult {
        match callable.implementation() {
            Implementation::Native(func) => func(self, &args),
            Implementation::Method(func) => {
                let receiver = callable
                    .receiver()
                    .cloned()
                    .ok_or_else(|| EvalError::new("unbound method"))?;
                func(self, &receiver, &args)
            }
            Implementation::User(_) => Err(EvalError::new("script functions need the evaluator")),
        }
    }

    fn m(&self) -> Value {
        self.m.clone()
    }

    fn set_m(&mut self, m: Value) {
        self.m = m;
    }

    fn host_node(&self) -> Option<ObjectRef> {
        self.host_node.clone()
    }

    fn set_host_node(&mut self, node: Option<ObjectRef>) {
        self.host_node = node;
    }

    fn context(&self) -> Rc<RuntimeContext> {
        Rc::clone(&self.context)
    }

    fn global_aa(&self) -> ObjectRef {
        self.global.clone()
    }
}

/// Look up `name` on `object` and invoke it with `args`.
pub(crate) fn call_method(object: &ObjectRef, name: &str, args: Vec<Value>) -> EvalResult {
    call_method_with(&mut TestExecutor::new(), object, name, args)
}

pub(crate) fn call_method_with(
    executor: &mut TestExecutor,
    object: &ObjectRef,
    name: &str,
    args: Vec<Value>,
) -> EvalResult {
    let callable = object
        .get_operation(name)
        .ok_or_else(|| EvalError::new(format!("no operation {name}")))?;
    executor.call(&callable, args)
}
