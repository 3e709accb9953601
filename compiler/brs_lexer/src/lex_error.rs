//! Errors recorded while scanning.

use brs_ir::Location;
use thiserror::Error;

/// A recorded lexical error. Scanning continues after every one of these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub location: Location,
}

impl LexError {
    pub fn new(kind: LexErrorKind, location: Location) -> Self {
        LexError { kind, location }
    }

    /// Human-readable message.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.location, self.kind)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("Unterminated string at end of line")]
    UnterminatedStringAtEndOfLine,
    #[error("Unterminated string at end of file")]
    UnterminatedStringAtEndOfFile,
    #[error("Unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("Fractional hex literals are not supported")]
    FractionalHexLiteral,
    #[error("Hex literal '{0}' has no digits")]
    EmptyHexLiteral(String),
    #[error("Numeric literal '{0}' is out of range")]
    NumberOutOfRange(String),
    #[error("Unknown conditional-compile directive '#{0}'")]
    UnknownDirective(String),
}
