//! `InterpreterBuilder` for configuring an [`Interpreter`].

use std::rc::Rc;

use brs_values::components::RoAssociativeArray;
use brs_values::RuntimeContext;

use super::Interpreter;
use crate::environment::Environment;
use crate::globals::register_globals;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::stack::DEFAULT_MAX_CALL_DEPTH;

pub struct InterpreterBuilder {
    env: Option<Environment>,
    print_handler: Option<SharedPrintHandler>,
    context: Option<Rc<RuntimeContext>>,
    max_call_depth: Option<usize>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            env: None,
            print_handler: None,
            context: None,
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
        }
    }

    /// Start from an existing environment instead of an empty one.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Where `print` output goes. Defaults to stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Host state shared with built-in objects. Defaults to a context with
    /// no input and an empty registry.
    #[must_use]
    pub fn context(mut self, context: Rc<RuntimeContext>) -> Self {
        self.context = Some(context);
        self
    }

    /// Limit on nested script calls; `None` removes the limit.
    #[must_use]
    pub fn max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn build(self) -> Interpreter {
        let mut env = self.env.unwrap_or_default();
        register_globals(&mut env);
        Interpreter {
            env,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            context: self
                .context
                .unwrap_or_else(|| Rc::new(RuntimeContext::builder().build())),
            global_aa: RoAssociativeArray::object(),
            call_depth: 0,
            max_call_depth: self.max_call_depth,
            output_column: 0,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
