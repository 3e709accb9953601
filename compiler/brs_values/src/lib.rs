//! Runtime values for the BrightScript core.
//!
//! - `Value`: the closed tagged union every expression evaluates to
//! - `numeric`: the int32 < int64 < float < double promotion ladder
//! - `callable`: callable descriptors, signatures and arity selection
//! - `BrsComponent` / `ObjectRef`: the dispatch protocol every runtime
//!   object rides on, with a two-phase `Field | Operation | Absent` lookup
//! - `Interfaces`: per-object dispatch tables grouped by capability
//! - `components`: the built-in objects the core needs (arrays,
//!   associative arrays, boxed scalars, scene-graph nodes, message ports,
//!   registry sections)
//! - `RuntimeContext`: host-provided state shared with objects
//! - `errors`: runtime conditions and the statement control-flow result
//!
//! The evaluator lives in `brs_eval` and reaches back into this crate only
//! through the `Executor` trait, which built-in operations use to call
//! script functions and to read or write `m`.

mod boxing;
mod callable;
mod component;
pub mod components;
mod context;
pub mod errors;
mod interfaces;
pub mod numeric;
mod value;

#[cfg(test)]
mod test_helpers;

pub use boxing::{box_value, type_name};
pub use callable::{
    Argument, ArgumentDefault, Callable, Executor, Implementation, MethodFn, NativeFn, Signature,
};
pub use component::{BrsComponent, Member, ObjectRef};
pub use context::{
    ChannelInputSource, InputEvent, InputSource, NoInput, RuntimeContext, RuntimeContextBuilder,
};
pub use errors::{ControlAction, EvalError, EvalErrorKind, EvalResult, ExecResult};
pub use interfaces::Interfaces;
pub use numeric::Numeric;
pub use value::{format_double, format_float, Value};
