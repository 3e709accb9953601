//! AST builders for evaluator tests. Every node gets a synthetic location
//! unless a test needs a real one.

use std::rc::Rc;
use std::sync::Arc;

use brs_ir::ast::{
    AssignOp, BinaryOp, ElseIf, Expr, ExprKind, FunctionLiteral, Identifier, Parameter,
    PrintItem, Stmt, StmtKind, UnaryOp,
};
use brs_ir::{Literal, Location, Position, ValueKind};
use brs_values::Value;

use crate::interpreter::Interpreter;
use crate::print_handler::{buffer_handler, SharedPrintHandler};

pub(crate) fn loc() -> Location {
    Location::synthetic()
}

/// Location on `line` of `test.brs`.
pub(crate) fn at_line(line: u32) -> Location {
    Location::new(
        Arc::from("test.brs"),
        Position::new(line, 0),
        Position::new(line, 1),
    )
}

pub(crate) fn ident(name: &str) -> Identifier {
    Identifier::new(name, loc())
}

pub(crate) fn expr(kind: ExprKind) -> Expr {
    Expr::new(kind, loc())
}

pub(crate) fn stmt(kind: StmtKind) -> Stmt {
    Stmt::new(kind, loc())
}

pub(crate) fn lit(literal: Literal) -> Expr {
    expr(ExprKind::Literal(literal))
}

pub(crate) fn int(n: i32) -> Expr {
    lit(Literal::Int32(n))
}

pub(crate) fn float(x: f32) -> Expr {
    lit(Literal::Float(x))
}

pub(crate) fn string(s: &str) -> Expr {
    lit(Literal::String(s.to_string()))
}

pub(crate) fn boolean(b: bool) -> Expr {
    lit(Literal::Boolean(b))
}

pub(crate) fn invalid() -> Expr {
    lit(Literal::Invalid)
}

pub(crate) fn var(name: &str) -> Expr {
    expr(ExprKind::Variable(ident(name)))
}

pub(crate) fn binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
    expr(ExprKind::Binary {
        left: Box::new(left),
        op,
        right: Box::new(right),
    })
}

pub(crate) fn unary(op: UnaryOp, operand: Expr) -> Expr {
    expr(ExprKind::Unary {
        op,
        operand: Box::new(operand),
    })
}

pub(crate) fn call(callee: Expr, args: Vec<Expr>) -> Expr {
    expr(ExprKind::Call {
        callee: Box::new(callee),
        args,
    })
}

pub(crate) fn dotted(object: Expr, name: &str) -> Expr {
    expr(ExprKind::DottedGet {
        object: Box::new(object),
        name: ident(name),
    })
}

pub(crate) fn method_call(object: Expr, name: &str, args: Vec<Expr>) -> Expr {
    call(dotted(object, name), args)
}

pub(crate) fn index(object: Expr, index: Expr) -> Expr {
    expr(ExprKind::IndexedGet {
        object: Box::new(object),
        index: Box::new(index),
    })
}

pub(crate) fn array(elements: Vec<Expr>) -> Expr {
    expr(ExprKind::ArrayLiteral(elements))
}

pub(crate) fn aa(entries: Vec<(&str, Expr)>) -> Expr {
    expr(ExprKind::AssociativeArrayLiteral(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    ))
}

pub(crate) fn function_literal(
    name: Option<&str>,
    params: Vec<Parameter>,
    return_kind: ValueKind,
    body: Vec<Stmt>,
) -> Rc<FunctionLiteral> {
    Rc::new(FunctionLiteral {
        name: name.map(str::to_string),
        params,
        return_kind,
        body,
        location: loc(),
    })
}

pub(crate) fn anonymous(params: Vec<Parameter>, return_kind: ValueKind, body: Vec<Stmt>) -> Expr {
    expr(ExprKind::Function(function_literal(None, params, return_kind, body)))
}

pub(crate) fn param(name: &str, kind: ValueKind) -> Parameter {
    Parameter::new(ident(name), kind)
}

/// Named `function` declaration.
pub(crate) fn function(
    name: &str,
    params: Vec<Parameter>,
    return_kind: ValueKind,
    body: Vec<Stmt>,
) -> Stmt {
    stmt(StmtKind::Function {
        name: ident(name),
        func: function_literal(Some(name), params, return_kind, body),
    })
}

pub(crate) fn assign(name: &str, value: Expr) -> Stmt {
    compound(name, AssignOp::Assign, value)
}

pub(crate) fn compound(name: &str, op: AssignOp, value: Expr) -> Stmt {
    stmt(StmtKind::Assignment {
        name: ident(name),
        op,
        value,
    })
}

pub(crate) fn dotted_set(object: Expr, name: &str, value: Expr) -> Stmt {
    stmt(StmtKind::DottedSet {
        object,
        name: ident(name),
        value,
    })
}

pub(crate) fn indexed_set(object: Expr, index: Expr, value: Expr) -> Stmt {
    stmt(StmtKind::IndexedSet {
        object,
        index,
        value,
    })
}

pub(crate) fn expression(value: Expr) -> Stmt {
    stmt(StmtKind::Expression(value))
}

pub(crate) fn print(items: Vec<PrintItem>) -> Stmt {
    stmt(StmtKind::Print(items))
}

pub(crate) fn item(value: Expr) -> PrintItem {
    PrintItem::Expr(value)
}

pub(crate) fn ret(value: Option<Expr>) -> Stmt {
    stmt(StmtKind::Return(value))
}

pub(crate) fn if_(
    condition: Expr,
    then_branch: Vec<Stmt>,
    else_ifs: Vec<(Expr, Vec<Stmt>)>,
    else_branch: Option<Vec<Stmt>>,
) -> Stmt {
    stmt(StmtKind::If {
        condition,
        then_branch,
        else_ifs: else_ifs
            .into_iter()
            .map(|(condition, body)| ElseIf { condition, body })
            .collect(),
        else_branch,
    })
}

pub(crate) fn for_(
    counter: &str,
    start: Expr,
    end: Expr,
    step: Option<Expr>,
    body: Vec<Stmt>,
) -> Stmt {
    stmt(StmtKind::For {
        counter: ident(counter),
        start,
        end,
        step,
        body,
    })
}

pub(crate) fn for_each(item: &str, target: Expr, body: Vec<Stmt>) -> Stmt {
    stmt(StmtKind::ForEach {
        item: ident(item),
        target,
        body,
    })
}

pub(crate) fn while_(condition: Expr, body: Vec<Stmt>) -> Stmt {
    stmt(StmtKind::While { condition, body })
}

/// Interpreter printing into a buffer, plus the buffer handle.
pub(crate) fn buffered() -> (Interpreter, SharedPrintHandler) {
    let handler = buffer_handler();
    let interpreter = Interpreter::builder().print_handler(handler.clone()).build();
    (interpreter, handler)
}

/// Value of a variable after execution; panics if unbound.
pub(crate) fn lookup(interpreter: &Interpreter, name: &str) -> Value {
    interpreter
        .env()
        .get_by_name(name)
        .unwrap_or_else(|| panic!("{name} is not bound"))
}

/// `Debug` rendering, used to compare values without `PartialEq`.
pub(crate) fn show(value: &Value) -> String {
    format!("{value:?}")
}
