//! Callable descriptors.
//!
//! A `Callable` is a name, one or more signatures and an implementation.
//! Overloads are resolved by argument count only: the first signature whose
//! arity accepts the call wins. Argument kind checks, defaults, boxing and
//! return enforcement are done by the `Executor` that performs the call.

use std::fmt;
use std::rc::Rc;

use brs_ir::ast::{Expr, FunctionLiteral};
use brs_ir::ValueKind;

use crate::{EvalResult, ObjectRef, RuntimeContext, Value};

/// The evaluator, as seen by built-in operations.
///
/// Built-ins use it to call back into script code and to read or write the
/// `m` pointer and host-node reference of the running environment.
pub trait Executor {
    /// Call `callable` with fully evaluated arguments. Performs signature
    /// selection and all argument/return checks.
    fn call(&mut self, callable: &Rc<Callable>, args: Vec<Value>) -> EvalResult;

    fn m(&self) -> Value;

    fn set_m(&mut self, m: Value);

    fn host_node(&self) -> Option<ObjectRef>;

    fn set_host_node(&mut self, node: Option<ObjectRef>);

    fn context(&self) -> Rc<RuntimeContext>;

    /// The process-wide associative array returned by `GetGlobalAA()`.
    fn global_aa(&self) -> ObjectRef;
}

/// Free-standing built-in: `CreateObject`, `Type`, ...
pub type NativeFn = fn(&mut dyn Executor, &[Value]) -> EvalResult;

/// Built-in operation on an object; receives the receiver explicitly.
pub type MethodFn = fn(&mut dyn Executor, &ObjectRef, &[Value]) -> EvalResult;

#[derive(Clone)]
pub enum Implementation {
    Native(NativeFn),
    Method(MethodFn),
    /// A script function or sub.
    User(Rc<FunctionLiteral>),
}

/// Default for an omitted trailing argument.
#[derive(Clone, Debug)]
pub enum ArgumentDefault {
    /// Fixed value, used by built-ins.
    Value(Value),
    /// Script expression, evaluated in the callee's environment after the
    /// earlier arguments are bound.
    Expr(Expr),
}

#[derive(Clone, Debug)]
pub struct Argument {
    pub name: String,
    pub kind: ValueKind,
    pub default: Option<ArgumentDefault>,
}

impl Argument {
    pub fn required(name: impl Into<String>, kind: ValueKind) -> Self {
        Argument {
            name: name.into(),
            kind,
            default: None,
        }
    }

    pub fn optional(name: impl Into<String>, kind: ValueKind, default: Value) -> Self {
        Argument {
            name: name.into(),
            kind,
            default: Some(ArgumentDefault::Value(default)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Signature {
    pub args: Vec<Argument>,
    pub returns: ValueKind,
}

impl Signature {
    pub fn new(args: Vec<Argument>, returns: ValueKind) -> Self {
        Signature { args, returns }
    }

    /// Signature of a script function literal.
    pub fn from_function(func: &FunctionLiteral) -> Self {
        let args = func
            .params
            .iter()
            .map(|param| Argument {
                name: param.name.name.clone(),
                kind: param.kind,
                default: param.default.clone().map(ArgumentDefault::Expr),
            })
            .collect();
        Signature {
            args,
            returns: func.return_kind,
        }
    }

    /// Arguments before the first defaulted one.
    pub fn required_count(&self) -> usize {
        self.args
            .iter()
            .position(|arg| arg.default.is_some())
            .unwrap_or(self.args.len())
    }

    #[inline]
    pub fn accepts(&self, count: usize) -> bool {
        (self.required_count()..=self.args.len()).contains(&count)
    }

    /// `"2"` or `"1-3"`, for arity messages.
    pub fn arity_description(&self) -> String {
        let required = self.required_count();
        if required == self.args.len() {
            required.to_string()
        } else {
            format!("{required}-{}", self.args.len())
        }
    }
}

pub struct Callable {
    name: String,
    signatures: Rc<[Signature]>,
    implementation: Implementation,
    /// Receiver for operations retrieved from an object.
    receiver: Option<ObjectRef>,
}

impl Callable {
    pub fn new(
        name: impl Into<String>,
        signatures: Vec<Signature>,
        implementation: Implementation,
    ) -> Self {
        Callable {
            name: name.into(),
            signatures: signatures.into(),
            implementation,
            receiver: None,
        }
    }

    pub fn native(name: impl Into<String>, signature: Signature, func: NativeFn) -> Self {
        Callable::new(name, vec![signature], Implementation::Native(func))
    }

    pub fn method(name: impl Into<String>, signature: Signature, func: MethodFn) -> Self {
        Callable::new(name, vec![signature], Implementation::Method(func))
    }

    /// Overloaded built-in method.
    pub fn overloaded_method(
        name: impl Into<String>,
        signatures: Vec<Signature>,
        func: MethodFn,
    ) -> Self {
        Callable::new(name, signatures, Implementation::Method(func))
    }

    /// Callable for a script function literal. Anonymous functions are
    /// named `""`.
    pub fn user(func: Rc<FunctionLiteral>) -> Self {
        let name = func.name.clone().unwrap_or_default();
        let signature = Signature::from_function(&func);
        Callable::new(name, vec![signature], Implementation::User(func))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    pub fn implementation(&self) -> &Implementation {
        &self.implementation
    }

    pub fn receiver(&self) -> Option<&ObjectRef> {
        self.receiver.as_ref()
    }

    /// A copy of this callable bound to `receiver`. Signatures are shared.
    pub fn bind(&self, receiver: ObjectRef) -> Callable {
        Callable {
            name: self.name.clone(),
            signatures: Rc::clone(&self.signatures),
            implementation: self.implementation.clone(),
            receiver: Some(receiver),
        }
    }

    /// First signature whose arity accepts `count` arguments.
    pub fn select_signature(&self, count: usize) -> Option<&Signature> {
        self.signatures.iter().find(|sig| sig.accepts(count))
    }

    /// All accepted arities, for error messages when none matches.
    pub fn arity_description(&self) -> String {
        self.signatures
            .iter()
            .map(Signature::arity_description)
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("signatures", &self.signatures.len())
            .field("bound", &self.receiver.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
