//! Source locations.
//!
//! Lines are 1-indexed, columns are 0-indexed, and the end column is one
//! past the last character of the range.

use std::fmt;
use std::sync::Arc;

/// A single point in a source file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// 1-indexed line number.
    pub line: u32,
    /// 0-indexed column.
    pub column: u32,
}

impl Position {
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A range in a named source file.
///
/// The file name is shared (`Arc<str>`) so that every token of a source unit
/// can carry it without copying.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    pub start: Position,
    pub end: Position,
    pub file: Arc<str>,
}

impl Location {
    /// Create a location from start/end positions.
    pub fn new(file: Arc<str>, start: Position, end: Position) -> Self {
        Location { start, end, file }
    }

    /// Location used for nodes synthesized without source text.
    pub fn synthetic() -> Self {
        Location {
            start: Position::new(0, 0),
            end: Position::new(0, 0),
            file: Arc::from(""),
        }
    }

    /// Smallest location covering both `self` and `other`.
    ///
    /// The file name of `self` is kept.
    #[must_use]
    pub fn merge(&self, other: &Location) -> Location {
        Location {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            file: Arc::clone(&self.file),
        }
    }

    /// The 1-indexed line the range starts on.
    #[inline]
    pub fn line(&self) -> u32 {
        self.start.line
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({},{}-{},{})",
            self.file, self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}
