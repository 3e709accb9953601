//! Expressions.

use std::rc::Rc;

use super::operators::{BinaryOp, UnaryOp};
use super::stmt::Block;
use crate::{Literal, Location, ValueKind};

/// A name as written in source, with its location.
///
/// The evaluator matches names case-insensitively; `name` keeps the original
/// spelling for messages.
#[derive(Clone, Debug, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub location: Location,
}

impl Identifier {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Identifier {
            name: name.into(),
            location,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub location: Location,
}

impl Expr {
    pub fn new(kind: ExprKind, location: Location) -> Self {
        Expr { kind, location }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Variable(Identifier),
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Grouping(Box<Expr>),
    /// `obj[index]`
    IndexedGet {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    /// `obj.name`
    DottedGet {
        object: Box<Expr>,
        name: Identifier,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Function(Rc<FunctionLiteral>),
    ArrayLiteral(Vec<Expr>),
    /// `{ key: value, ... }`, keys in source order.
    AssociativeArrayLiteral(Vec<(String, Expr)>),
}

/// A declared parameter: `name as type = default`.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: Identifier,
    pub kind: ValueKind,
    pub default: Option<Expr>,
}

impl Parameter {
    pub fn new(name: Identifier, kind: ValueKind) -> Self {
        Parameter {
            name,
            kind,
            default: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: Expr) -> Self {
        self.default = Some(default);
        self
    }
}

/// `function ... end function` or `sub ... end sub`, named or anonymous.
///
/// Shared by `Rc` so that callables created from it can outlive the tree
/// walk that produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionLiteral {
    pub name: Option<String>,
    pub params: Vec<Parameter>,
    /// `Void` for subs.
    pub return_kind: ValueKind,
    pub body: Block,
    pub location: Location,
}
