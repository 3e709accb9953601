//! Tree-walking evaluator for the BrightScript core.
//!
//! - `Environment`: the Function/Module/Global/Mock layered variable store
//! - `Interpreter`: expression evaluation, statement execution, calls
//! - `operators`: binary and unary operator rules with numeric promotion
//! - `globals`: `CreateObject`, `Type`, `Box`, `Wait`, `GetGlobalAA`
//! - `print_handler`: where `print` output goes
//!
//! Runtime values, the dispatch protocol and built-in objects live in
//! `brs_values`; the interpreter is the `Executor` those objects call back
//! into.

mod environment;
mod globals;
mod interpreter;
pub mod operators;
mod print_handler;
mod stack;
mod tracing_setup;

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;

pub use environment::{Environment, Layer, LocalScope, Scope, LINE_NUM};
pub use globals::register_globals;
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler,
};
pub use stack::{ensure_sufficient_stack, DEFAULT_MAX_CALL_DEPTH};
pub use tracing_setup::init_tracing;
