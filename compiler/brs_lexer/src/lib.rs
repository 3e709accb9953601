//! Scanner for the BrightScript core.
//!
//! [`scan`] turns source text into a flat token list. It never stops at the
//! first problem: every lexical error is recorded with its location and
//! scanning resumes, so a caller can report all of them in one pass.
//!
//! # Architecture
//!
//! - `cursor`: `Copy` cursor over the source characters, tracks line/column
//! - `scanner`: the main loop dispatching on the current character
//! - `number`: numeric literal classification (decimal and `&H` hex)
//! - `keywords`: single-word and multi-word keyword tables
//! - `lex_error`: error kinds recorded during scanning

mod cursor;
mod keywords;
mod lex_error;
mod number;
mod scanner;

use std::sync::Arc;

use brs_ir::Token;

pub use keywords::{lookup as keyword_lookup, multi_word_lookup};
pub use lex_error::{LexError, LexErrorKind};

/// Everything a scan produced: the tokens (always ending in `Eof`) and any
/// recorded errors.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl ScanOutput {
    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Scan `source` into tokens. `file` is recorded in every location.
#[tracing::instrument(level = "debug", skip_all, fields(file = %file))]
pub fn scan(source: &str, file: &str) -> ScanOutput {
    let chars: Vec<char> = source.chars().collect();
    let output = scanner::Scanner::new(&chars, Arc::from(file)).run();
    tracing::debug!(
        tokens = output.tokens.len(),
        errors = output.errors.len(),
        "scan finished"
    );
    output
}
