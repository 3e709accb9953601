//! Expression evaluation.

use std::rc::Rc;

use brs_ir::ast::{BinaryOp, Expr, ExprKind};
use brs_values::components::{RoArray, RoAssociativeArray};
use brs_values::errors::not_indexable;
use brs_values::{box_value, Callable, EvalError, EvalResult, ObjectRef, Value};

use super::Interpreter;
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::stack::ensure_sufficient_stack;

impl Interpreter {
    /// Evaluate an expression. Conditions raised inside it get the
    /// innermost available location.
    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_kind(expr))
            .map_err(|error| error.with_location_if_missing(&expr.location))
    }

    fn eval_kind(&mut self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(Value::from(literal)),
            ExprKind::Variable(identifier) => self.env.get(identifier),
            ExprKind::Binary { left, op, right } => match op {
                BinaryOp::And | BinaryOp::Or => self.eval_logical(left, *op, right),
                _ => {
                    let left = self.evaluate(left)?;
                    let right = self.evaluate(right)?;
                    evaluate_binary(&left, *op, &right)
                }
            },
            ExprKind::Unary { op, operand } => {
                let operand = self.evaluate(operand)?;
                evaluate_unary(*op, &operand)
            }
            ExprKind::Grouping(inner) => self.evaluate(inner),
            ExprKind::IndexedGet { object, index } => {
                let target = self.evaluate(object)?;
                let index = self.evaluate(index)?;
                match target {
                    Value::Object(object) => object.index_get(&index),
                    other => Err(not_indexable(&other)),
                }
            }
            ExprKind::DottedGet { object, name } => {
                let target = self.evaluate(object)?;
                let target = member_target(target)?;
                Ok(target.get_member(&name.name).into_value())
            }
            ExprKind::Call { callee, args } => self.eval_call(callee, args),
            ExprKind::Function(func) => {
                Ok(Value::Callable(Rc::new(Callable::user(Rc::clone(func)))))
            }
            ExprKind::ArrayLiteral(elements) => {
                let values = elements
                    .iter()
                    .map(|element| self.evaluate(element))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Object(RoArray::object(values)))
            }
            ExprKind::AssociativeArrayLiteral(entries) => {
                let mut aa = RoAssociativeArray::new();
                for (key, value) in entries {
                    let value = self.evaluate(value)?;
                    aa.insert(key, value);
                }
                Ok(Value::Object(ObjectRef::new(aa)))
            }
        }
    }

    /// `and`/`or` skip the right operand once a boolean left operand decides
    /// the result. Anything else goes through the ordinary operator rules.
    fn eval_logical(&mut self, left: &Expr, op: BinaryOp, right: &Expr) -> EvalResult {
        let left = self.evaluate(left)?;
        match (op, left.as_bool()) {
            (BinaryOp::And, Some(false)) => return Ok(Value::Boolean(false)),
            (BinaryOp::Or, Some(true)) => return Ok(Value::Boolean(true)),
            _ => {}
        }
        let right = self.evaluate(right)?;
        evaluate_binary(&left, op, &right)
    }
}

/// The object a member access or method call applies to. Scalars are boxed
/// so their built-in operations are reachable; `invalid` has no members.
pub(crate) fn member_target(value: Value) -> Result<ObjectRef, EvalError> {
    match value {
        Value::Object(object) => Ok(object),
        Value::Invalid | Value::Callable(_) => Err(not_indexable(&value)),
        scalar => match box_value(scalar) {
            Value::Object(object) => Ok(object),
            other => Err(not_indexable(&other)),
        },
    }
}
