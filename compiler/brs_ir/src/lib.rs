//! BRS IR - shared data types for the BrightScript core.
//!
//! Everything that crosses a crate boundary lives here:
//! - `Location`: 1-indexed line / 0-indexed column source ranges
//! - `Token`, `Lexeme`, `Literal`: the scanner's output format
//! - `ValueKind`: the closed set of runtime value kinds used in signatures
//! - `ast`: the statement/expression tree handed to the evaluator
//!
//! The scanner produces tokens, an external parser turns them into the `ast`
//! types, and the evaluator walks that tree.

pub mod ast;
mod location;
mod token;
mod value_kind;

pub use location::{Location, Position};
pub use token::{is_reserved_word, Lexeme, Literal, Token, RESERVED_WORDS};
pub use value_kind::ValueKind;
