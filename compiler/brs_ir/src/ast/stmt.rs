//! Statements.

use std::rc::Rc;

use super::expr::{Expr, FunctionLiteral, Identifier};
use super::operators::{AssignOp, IncrementOp};
use crate::Location;

pub type Block = Vec<Stmt>;

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub location: Location,
}

impl Stmt {
    pub fn new(kind: StmtKind, location: Location) -> Self {
        Stmt { kind, location }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ElseIf {
    pub condition: Expr,
    pub body: Block,
}

/// One element of a `print` list.
#[derive(Clone, Debug, PartialEq)]
pub enum PrintItem {
    Expr(Expr),
    /// `;`: no separation.
    Semicolon,
    /// `,`: advance to the next print zone.
    Comma,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    Expression(Expr),
    /// `name = value`, `name += value`, ...
    Assignment {
        name: Identifier,
        op: AssignOp,
        value: Expr,
    },
    /// `obj.name = value`
    DottedSet {
        object: Expr,
        name: Identifier,
        value: Expr,
    },
    /// `obj[index] = value`
    IndexedSet {
        object: Expr,
        index: Expr,
        value: Expr,
    },
    /// `target++` / `target--`; `target` is a variable, dotted or indexed get.
    Increment {
        target: Expr,
        op: IncrementOp,
    },
    If {
        condition: Expr,
        then_branch: Block,
        else_ifs: Vec<ElseIf>,
        else_branch: Option<Block>,
    },
    /// `for counter = start to end [step increment] ... next`
    For {
        counter: Identifier,
        start: Expr,
        end: Expr,
        step: Option<Expr>,
        body: Block,
    },
    /// `for each item in target ... next`
    ForEach {
        item: Identifier,
        target: Expr,
        body: Block,
    },
    While {
        condition: Expr,
        body: Block,
    },
    /// `dim name[d1, d2, ...]`
    Dim {
        name: Identifier,
        dimensions: Vec<Expr>,
    },
    Print(Vec<PrintItem>),
    Return(Option<Expr>),
    ExitFor,
    ExitWhile,
    /// Named `function`/`sub` declaration at module level.
    Function {
        name: Identifier,
        func: Rc<FunctionLiteral>,
    },
    Block(Block),
}
