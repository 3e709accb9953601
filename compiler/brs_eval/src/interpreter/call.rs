//! Function calls: signature selection, argument checks, boxing, defaults
//! and return enforcement.

use std::rc::Rc;

use brs_ir::ast::{Expr, ExprKind, FunctionLiteral};
use brs_ir::ValueKind;
use brs_values::errors::{
    argument_type_mismatch, arity_mismatch, missing_return_value, not_callable, not_indexable,
    return_type_mismatch, stack_overflow, void_return_value,
};
use brs_values::{
    box_value, Argument, ArgumentDefault, Callable, ControlAction, EvalResult, ExecResult,
    Implementation, Signature, Value,
};

use super::expr::member_target;
use super::{unbound_method, Interpreter};
use crate::environment::Scope;
use crate::stack::ensure_sufficient_stack;

impl Interpreter {
    /// `callee(args)`.
    ///
    /// A dotted callee binds `m` to its receiver and resolves the name as an
    /// operation first, then as a field holding a function. An indexed
    /// callee binds `m` the same way and resolves through `index_get`.
    pub(crate) fn eval_call(&mut self, callee: &Expr, args: &[Expr]) -> EvalResult {
        let (target, receiver) = match &callee.kind {
            ExprKind::DottedGet { object, name } => {
                let receiver = self.evaluate(object)?;
                let receiver = member_target(receiver)
                    .map_err(|error| error.with_location_if_missing(&object.location))?;
                let target = match receiver.get_operation(&name.name) {
                    Some(operation) => Value::Callable(operation),
                    None => receiver.get_member(&name.name).into_value(),
                };
                (target, Some(Value::Object(receiver)))
            }
            ExprKind::IndexedGet { object, index } => {
                let receiver = self.evaluate(object)?;
                let index = self.evaluate(index)?;
                let receiver = match receiver {
                    Value::Object(receiver) => receiver,
                    other => {
                        let error = not_indexable(&other);
                        return Err(error.with_location_if_missing(&object.location));
                    }
                };
                let target = receiver.index_get(&index)?;
                (target, Some(Value::Object(receiver)))
            }
            _ => (self.evaluate(callee)?, None),
        };
        let Value::Callable(callable) = target else {
            return Err(not_callable(&target).with_location_if_missing(&callee.location));
        };

        let args = args
            .iter()
            .map(|arg| self.evaluate(arg))
            .collect::<Result<Vec<_>, _>>()?;
        self.call_callable(&callable, args, receiver)
    }

    /// Call `callable` with evaluated arguments. `m` replaces the callee's
    /// `m` pointer for script functions.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(function = %callable.name(), args = args.len())
    )]
    pub fn call_callable(
        &mut self,
        callable: &Rc<Callable>,
        mut args: Vec<Value>,
        m: Option<Value>,
    ) -> EvalResult {
        let name = callable.name();
        let Some(signature) = callable.select_signature(args.len()) else {
            return Err(arity_mismatch(name, callable.arity_description(), args.len()));
        };
        if let Some(max) = self.max_call_depth {
            if self.call_depth >= max {
                return Err(stack_overflow(self.call_depth));
            }
        }
        for (value, declared) in args.iter_mut().zip(&signature.args) {
            let provided = std::mem::replace(value, Value::Invalid);
            *value = coerce_argument(name, declared, provided)?;
        }

        self.call_depth += 1;
        let result = ensure_sufficient_stack(|| match callable.implementation() {
            Implementation::Native(func) => {
                fill_builtin_defaults(&mut args, signature);
                func(self, &args)
            }
            Implementation::Method(func) => {
                fill_builtin_defaults(&mut args, signature);
                let receiver = callable
                    .receiver()
                    .cloned()
                    .ok_or_else(|| unbound_method(callable))?;
                func(self, &receiver, &args)
            }
            Implementation::User(func) => self.call_user(name, func, signature, args, m),
        });
        self.call_depth -= 1;
        result.map_err(|error| error.with_frame(display_name(name)))
    }

    fn call_user(
        &mut self,
        name: &str,
        func: &Rc<FunctionLiteral>,
        signature: &Signature,
        args: Vec<Value>,
        m: Option<Value>,
    ) -> EvalResult {
        let mut env = self.env.create_sub_environment();
        if let Some(m) = m {
            env.set_m(m);
        }
        let caller = std::mem::replace(&mut self.env, env);
        let result = self.run_body(name, func, signature, args);
        self.env = caller;
        result
    }

    fn run_body(
        &mut self,
        name: &str,
        func: &FunctionLiteral,
        signature: &Signature,
        args: Vec<Value>,
    ) -> EvalResult {
        let provided = args.len();
        for (declared, value) in signature.args.iter().zip(args) {
            self.env.define(Scope::Function, &declared.name, value);
        }
        // Omitted trailing arguments: defaults see the earlier parameters.
        for declared in &signature.args[provided..] {
            let value = match &declared.default {
                Some(ArgumentDefault::Expr(expr)) => self.evaluate(expr)?,
                Some(ArgumentDefault::Value(value)) => value.clone(),
                None => Value::Invalid,
            };
            let value = coerce_argument(name, declared, value)?;
            self.env.define(Scope::Function, &declared.name, value);
        }

        let outcome = self.exec_block(&func.body);
        function_result(name, func.return_kind, outcome)
    }
}

fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "<anonymous>"
    } else {
        name
    }
}

/// Turn a body's outcome into the call's value, enforcing the declared
/// return kind.
fn function_result(name: &str, returns: ValueKind, outcome: ExecResult) -> EvalResult {
    let name = display_name(name);
    match outcome {
        Err(ControlAction::Error(error)) => Err(error),
        Err(ControlAction::Return(Some(value))) => {
            if returns == ValueKind::Void {
                return Err(void_return_value(name));
            }
            let got = value.kind();
            coerce_to_kind(returns, value).ok_or_else(|| return_type_mismatch(name, returns, got))
        }
        Ok(())
        | Err(ControlAction::Return(None) | ControlAction::ExitFor | ControlAction::ExitWhile) => {
            if returns == ValueKind::Void {
                Ok(Value::Invalid)
            } else {
                Err(missing_return_value(name, returns))
            }
        }
    }
}

fn coerce_argument(function: &str, declared: &Argument, value: Value) -> EvalResult {
    let got = value.kind();
    coerce_to_kind(declared.kind, value).ok_or_else(|| {
        argument_type_mismatch(display_name(function), &declared.name, declared.kind, got)
    })
}

/// `value` as a value of `kind`, or `None` if it does not fit.
///
/// Scalars passed where an object is expected are boxed; boxed scalars
/// passed where a scalar is expected are unboxed; numerics convert between
/// numeric kinds.
pub(crate) fn coerce_to_kind(kind: ValueKind, value: Value) -> Option<Value> {
    match kind {
        ValueKind::Dynamic => Some(value),
        ValueKind::Object => match value {
            Value::Object(_) => Some(value),
            scalar if scalar.kind().is_boxable() => Some(box_value(scalar)),
            _ => None,
        },
        ValueKind::Callable => matches!(value, Value::Callable(_)).then_some(value),
        numeric if numeric.is_numeric() => value
            .as_numeric()
            .map(|n| n.convert(numeric).into_value()),
        scalar => {
            let value = value.unboxed();
            (value.kind() == scalar).then_some(value)
        }
    }
}

/// Built-ins receive their fixed defaults for omitted arguments.
fn fill_builtin_defaults(args: &mut Vec<Value>, signature: &Signature) {
    for declared in &signature.args[args.len().min(signature.args.len())..] {
        let value = match &declared.default {
            Some(ArgumentDefault::Value(value)) => value.clone(),
            _ => Value::Invalid,
        };
        args.push(value);
    }
}
