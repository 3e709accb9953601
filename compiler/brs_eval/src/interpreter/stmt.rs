//! Statement execution and structured control flow.

use std::cmp::Ordering;

use brs_ir::ast::{
    BinaryOp, ElseIf, Expr, ExprKind, Identifier, IncrementOp, PrintItem, Stmt, StmtKind,
};
use brs_ir::{is_reserved_word, ValueKind};
use brs_values::components::{RoArray, MAX_ARRAY_LENGTH};
use brs_values::errors::{
    assignment_type_mismatch, condition_not_boolean, index_out_of_range,
    invalid_field_assignment, non_numeric_loop_bound, not_indexable, not_iterable,
    reserved_word_assignment, unary_type_mismatch,
};
use brs_values::{ControlAction, EvalError, ExecResult, Numeric, Value};

use super::call::coerce_to_kind;
use super::expr::member_target;
use super::{column_after, locate, Interpreter};
use crate::environment::Scope;
use crate::operators::{evaluate_binary, step_by_one};

/// Width of a `print` zone advanced to by `,`.
const PRINT_ZONE: usize = 16;

impl Interpreter {
    pub fn exec_statement(&mut self, stmt: &Stmt) -> ExecResult {
        self.exec_kind(stmt).map_err(|action| locate(action, stmt))
    }

    pub fn exec_block(&mut self, block: &[Stmt]) -> ExecResult {
        for stmt in block {
            self.exec_statement(stmt)?;
        }
        Ok(())
    }

    fn exec_kind(&mut self, stmt: &Stmt) -> ExecResult {
        match &stmt.kind {
            StmtKind::Expression(expr) => {
                self.evaluate(expr)?;
            }
            StmtKind::Assignment { name, op, value } => {
                let value = self.evaluate(value)?;
                let value = match op.binary_op() {
                    Some(op) => {
                        let current = self.env.get(name)?;
                        evaluate_binary(&current, op, &value)?
                    }
                    None => value,
                };
                self.assign_variable(name, value)?;
            }
            StmtKind::DottedSet {
                object,
                name,
                value,
            } => {
                let target = self.evaluate(object)?;
                let value = self.evaluate(value)?;
                match target {
                    Value::Object(object) => object.set_field(&name.name, value)?,
                    other => {
                        return Err(invalid_field_assignment(&other.describe(), &name.name).into())
                    }
                }
            }
            StmtKind::IndexedSet {
                object,
                index,
                value,
            } => {
                let target = self.evaluate(object)?;
                let index = self.evaluate(index)?;
                let value = self.evaluate(value)?;
                match target {
                    Value::Object(object) => object.index_set(&index, value)?,
                    other => return Err(not_indexable(&other).into()),
                }
            }
            StmtKind::Increment { target, op } => self.exec_increment(target, *op)?,
            StmtKind::If {
                condition,
                then_branch,
                else_ifs,
                else_branch,
            } => return self.exec_if(condition, then_branch, else_ifs, else_branch.as_deref()),
            StmtKind::For {
                counter,
                start,
                end,
                step,
                body,
            } => return self.exec_for(counter, start, end, step.as_ref(), body),
            StmtKind::ForEach { item, target, body } => {
                return self.exec_for_each(item, target, body)
            }
            StmtKind::While { condition, body } => return self.exec_while(condition, body),
            StmtKind::Dim { name, dimensions } => {
                let sizes = dimensions
                    .iter()
                    .map(|dimension| self.dimension(dimension))
                    .collect::<Result<Vec<_>, _>>()?;
                check_dim_size(&sizes)?;
                self.assign_variable(name, dim_array(&sizes))?;
            }
            StmtKind::Print(items) => self.exec_print(items)?,
            StmtKind::Return(value) => {
                let value = value.as_ref().map(|expr| self.evaluate(expr)).transpose()?;
                return Err(ControlAction::Return(value));
            }
            StmtKind::ExitFor => return Err(ControlAction::ExitFor),
            StmtKind::ExitWhile => return Err(ControlAction::ExitWhile),
            StmtKind::Function { name, func } => self.define_function(name, func),
            StmtKind::Block(block) => return self.exec_block(block),
        }
        Ok(())
    }

    /// Bind a variable in the Function layer, enforcing its type designator.
    pub(crate) fn assign_variable(
        &mut self,
        name: &Identifier,
        value: Value,
    ) -> Result<(), EvalError> {
        if is_reserved_word(&name.name) {
            return Err(reserved_word_assignment(&name.name));
        }
        let value = match ValueKind::from_designator(&name.name) {
            Some(kind) => {
                let got = value.kind();
                coerce_to_kind(kind, value)
                    .ok_or_else(|| assignment_type_mismatch(&name.name, kind, got))?
            }
            None => value,
        };
        self.env.define(Scope::Function, &name.name, value);
        Ok(())
    }

    fn condition(&mut self, expr: &Expr, statement: &str) -> Result<bool, EvalError> {
        let value = self.evaluate(expr)?;
        value.as_bool().ok_or_else(|| {
            condition_not_boolean(statement, value.kind()).with_location(expr.location.clone())
        })
    }

    fn exec_if(
        &mut self,
        condition: &Expr,
        then_branch: &[Stmt],
        else_ifs: &[ElseIf],
        else_branch: Option<&[Stmt]>,
    ) -> ExecResult {
        if self.condition(condition, "if")? {
            return self.exec_block(then_branch);
        }
        for branch in else_ifs {
            if self.condition(&branch.condition, "else if")? {
                return self.exec_block(&branch.body);
            }
        }
        match else_branch {
            Some(block) => self.exec_block(block),
            None => Ok(()),
        }
    }

    fn loop_bound(&mut self, expr: &Expr, part: &str) -> Result<Numeric, EvalError> {
        let value = self.evaluate(expr)?;
        value.as_numeric().ok_or_else(|| {
            non_numeric_loop_bound("for", part, value.kind()).with_location(expr.location.clone())
        })
    }

    /// The final value and step are evaluated once, before the first
    /// iteration. The counter is re-read from the environment every
    /// iteration, so the body may change it.
    fn exec_for(
        &mut self,
        counter: &Identifier,
        start: &Expr,
        end: &Expr,
        step: Option<&Expr>,
        body: &[Stmt],
    ) -> ExecResult {
        let initial = self.evaluate(start)?;
        self.assign_variable(counter, initial)?;
        let end = self.loop_bound(end, "final value")?;
        let step = match step {
            Some(step) => self.loop_bound(step, "step")?,
            None => Numeric::Int32(1),
        };
        let descending = step.is_negative();

        loop {
            let current = self.env.get(counter)?;
            let Some(position) = current.as_numeric() else {
                return Err(non_numeric_loop_bound("for", "counter", current.kind()).into());
            };
            let finished = match position.compare(end) {
                Some(Ordering::Greater) => !descending,
                Some(Ordering::Less) => descending,
                Some(Ordering::Equal) => false,
                None => true,
            };
            if finished {
                break;
            }
            tracing::trace!(counter = %counter.name, value = %current, "for iteration");

            match self.exec_block(body) {
                Ok(()) => {}
                Err(ControlAction::ExitFor) => break,
                Err(other) => return Err(other),
            }

            let current = self.env.get(counter)?;
            let next = evaluate_binary(&current, BinaryOp::Add, &step.into_value())?;
            self.assign_variable(counter, next)?;
        }
        Ok(())
    }

    /// Iterates a snapshot of the target's elements.
    fn exec_for_each(&mut self, item: &Identifier, target: &Expr, body: &[Stmt]) -> ExecResult {
        let container = self.evaluate(target)?;
        let elements = match &container {
            Value::Object(object) => object.elements(),
            _ => None,
        };
        let Some(elements) = elements else {
            return Err(not_iterable(&container)
                .with_location(target.location.clone())
                .into());
        };

        for element in elements {
            self.assign_variable(item, element)?;
            match self.exec_block(body) {
                Ok(()) => {}
                Err(ControlAction::ExitFor) => break,
                Err(other) => return Err(other),
            }
        }
        Ok(())
    }

    fn exec_while(&mut self, condition: &Expr, body: &[Stmt]) -> ExecResult {
        while self.condition(condition, "while")? {
            tracing::trace!("while iteration");
            match self.exec_block(body) {
                Ok(()) => {}
                Err(ControlAction::ExitWhile) => break,
                Err(other) => return Err(other),
            }
        }
        Ok(())
    }

    fn exec_increment(&mut self, target: &Expr, op: IncrementOp) -> Result<(), EvalError> {
        let increment = op == IncrementOp::Increment;
        let step = |value: &Value| {
            step_by_one(value, increment).ok_or_else(|| {
                unary_type_mismatch(if increment { "++" } else { "--" }, value.kind())
            })
        };
        match &target.kind {
            ExprKind::Variable(name) => {
                let current = self.env.get(name)?;
                self.assign_variable(name, step(&current)?)
            }
            ExprKind::DottedGet { object, name } => {
                let object = self.evaluate(object)?;
                let object = member_target(object)?;
                let current = object.get_member(&name.name).into_value();
                object.set_field(&name.name, step(&current)?)
            }
            ExprKind::IndexedGet { object, index } => {
                let object = self.evaluate(object)?;
                let index = self.evaluate(index)?;
                let object = match object {
                    Value::Object(object) => object,
                    other => return Err(not_indexable(&other)),
                };
                let current = object.index_get(&index)?;
                object.index_set(&index, step(&current)?)
            }
            _ => Err(EvalError::new("Invalid target for increment")),
        }
    }

    fn dimension(&mut self, expr: &Expr) -> Result<i64, EvalError> {
        let value = self.evaluate(expr)?;
        value.as_numeric().map(Numeric::as_i64).ok_or_else(|| {
            EvalError::new(format!("Dim dimensions must be numeric, got {}", value.kind()))
                .with_location(expr.location.clone())
        })
    }

    /// `;` joins items directly, `,` pads to the next zone; a trailing
    /// separator suppresses the newline.
    fn exec_print(&mut self, items: &[PrintItem]) -> Result<(), EvalError> {
        let mut out = String::new();
        let mut newline = true;
        for item in items {
            match item {
                PrintItem::Expr(expr) => {
                    let value = self.evaluate(expr)?;
                    out.push_str(&value.render(None));
                    newline = true;
                }
                PrintItem::Semicolon => newline = false,
                PrintItem::Comma => {
                    let column = column_after(self.output_column, &out);
                    let padding = PRINT_ZONE - column % PRINT_ZONE;
                    out.extend(std::iter::repeat(' ').take(padding));
                    newline = false;
                }
            }
        }
        if newline {
            out.push('\n');
        }
        self.write_output(&out);
        Ok(())
    }
}

/// Rejects shapes whose total slot count exceeds the array length limit.
fn check_dim_size(sizes: &[i64]) -> Result<(), EvalError> {
    let mut total: usize = 1;
    for &size in sizes {
        let slots = usize::try_from(size.saturating_add(1)).unwrap_or(0);
        total = total.saturating_mul(slots.max(1));
        if slots > MAX_ARRAY_LENGTH || total > MAX_ARRAY_LENGTH {
            return Err(index_out_of_range(size, MAX_ARRAY_LENGTH));
        }
    }
    Ok(())
}

/// Nested arrays for `dim`: each dimension `n` holds `n + 1` slots.
fn dim_array(sizes: &[i64]) -> Value {
    let Some((&size, rest)) = sizes.split_first() else {
        return Value::Invalid;
    };
    let len = usize::try_from(size.saturating_add(1)).unwrap_or(0);
    let elements = (0..len).map(|_| dim_array(rest)).collect();
    Value::Object(RoArray::object(elements))
}
