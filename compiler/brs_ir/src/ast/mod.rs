//! Statement/expression tree consumed by the evaluator.
//!
//! The parser is an external collaborator; these types are the contract it
//! fills in. Every node that can raise a runtime condition carries the
//! `Location` used to report it.
//!
//! # Module Structure
//!
//! - `expr`: expressions (`Expr`, `ExprKind`) and function literals
//! - `stmt`: statements (`Stmt`, `StmtKind`) and blocks
//! - `operators`: binary, unary, assignment and increment operators

mod expr;
mod operators;
mod stmt;

pub use expr::{Expr, ExprKind, FunctionLiteral, Identifier, Parameter};
pub use operators::{AssignOp, BinaryOp, IncrementOp, UnaryOp};
pub use stmt::{Block, ElseIf, PrintItem, Stmt, StmtKind};
