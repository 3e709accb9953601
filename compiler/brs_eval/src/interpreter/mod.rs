//! Tree-walking interpreter.
//!
//! Expressions evaluate to a [`Value`] or raise an [`EvalError`]. Statements
//! return an [`ExecResult`] whose error side carries structured control flow
//! (`exit for`, `exit while`, `return`) as well as runtime conditions, so
//! each loop or call frame only inspects the actions it owns and forwards the
//! rest.

mod builder;
mod call;
mod expr;
mod stmt;

use std::rc::Rc;

use brs_ir::ast::{FunctionLiteral, Identifier, Stmt, StmtKind};
use brs_values::components::RoAssociativeArray;
use brs_values::{
    Callable, ControlAction, EvalError, EvalResult, Executor, ObjectRef, RuntimeContext, Value,
};

use crate::environment::{Environment, Scope};
use crate::print_handler::SharedPrintHandler;

pub use builder::InterpreterBuilder;

/// Functions tried, in order, as the program entry point.
const ENTRY_POINTS: [&str; 2] = ["main", "runuserinterface"];

pub struct Interpreter {
    env: Environment,
    print_handler: SharedPrintHandler,
    context: Rc<RuntimeContext>,
    /// Returned by `GetGlobalAA()`.
    global_aa: ObjectRef,
    call_depth: usize,
    max_call_depth: Option<usize>,
    /// Output column after the last `print`, for `,` zones.
    output_column: usize,
}

impl Interpreter {
    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Interpreter printing to stdout with a default runtime context.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Run a whole program.
    ///
    /// Function declarations are hoisted into the Module layer first, the
    /// remaining top-level statements run in order, then `main` (or
    /// `runUserInterface`) is called if declared. Returns the entry point's
    /// result, or `invalid`.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = statements.len()))]
    pub fn exec_program(&mut self, statements: &[Stmt]) -> EvalResult {
        for statement in statements {
            if let StmtKind::Function { name, func } = &statement.kind {
                self.define_function(name, func);
            }
        }

        for statement in statements {
            if matches!(statement.kind, StmtKind::Function { .. }) {
                continue;
            }
            match self.exec_statement(statement) {
                Ok(()) | Err(ControlAction::ExitFor | ControlAction::ExitWhile) => {}
                Err(ControlAction::Return(value)) => return Ok(value.unwrap_or(Value::Invalid)),
                Err(ControlAction::Error(error)) => return Err(error),
            }
        }

        let entry = ENTRY_POINTS.iter().find_map(|name| match self.env.get_by_name(name) {
            Some(Value::Callable(callable)) => Some(callable),
            _ => None,
        });
        let Some(entry) = entry else {
            return Ok(Value::Invalid);
        };
        // `main(args)` receives an empty argument set.
        let args = if entry.select_signature(0).is_some() {
            Vec::new()
        } else {
            vec![Value::Object(RoAssociativeArray::object())]
        };
        self.call_callable(&entry, args, None)
    }

    /// Bind a named function declaration in the Module layer.
    pub(crate) fn define_function(&mut self, name: &Identifier, func: &Rc<FunctionLiteral>) {
        tracing::debug!(function = %name.name, "defining function");
        let callable = Callable::user(Rc::clone(func));
        self.env
            .define(Scope::Module, &name.name, Value::Callable(Rc::new(callable)));
    }

    /// Send `text` to the print handler, tracking the output column.
    pub(crate) fn write_output(&mut self, text: &str) {
        self.output_column = column_after(self.output_column, text);
        self.print_handler.print(text);
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Column reached after writing `text` starting at `column`.
pub(crate) fn column_after(column: usize, text: &str) -> usize {
    match text.rfind('\n') {
        Some(i) => text[i + 1..].chars().count(),
        None => column + text.chars().count(),
    }
}

impl Executor for Interpreter {
    fn call(&mut self, callable: &Rc<Callable>, args: Vec<Value>) -> EvalResult {
        self.call_callable(callable, args, None)
    }

    fn m(&self) -> Value {
        self.env.get_m()
    }

    fn set_m(&mut self, m: Value) {
        self.env.set_m(m);
    }

    fn host_node(&self) -> Option<ObjectRef> {
        self.env.host_node()
    }

    fn set_host_node(&mut self, node: Option<ObjectRef>) {
        self.env.set_host_node(node);
    }

    fn context(&self) -> Rc<RuntimeContext> {
        Rc::clone(&self.context)
    }

    fn global_aa(&self) -> ObjectRef {
        self.global_aa.clone()
    }
}

/// Attach a statement's location to a runtime condition leaving it.
fn locate(action: ControlAction, stmt: &Stmt) -> ControlAction {
    match action {
        ControlAction::Error(error) => {
            ControlAction::Error(error.with_location_if_missing(&stmt.location))
        }
        other => other,
    }
}

#[cold]
fn unbound_method(callable: &Callable) -> EvalError {
    EvalError::new(format!("method {} called without a receiver", callable.name()))
}
