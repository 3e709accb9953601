//! Character cursor with line/column tracking.
//!
//! The cursor is [`Copy`], so the scanner snapshots it before speculative
//! reads (multi-word keywords, `#else if`) and restores it on a miss.

use brs_ir::Position;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    chars: &'a [char],
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(chars: &'a [char]) -> Self {
        Cursor {
            chars,
            pos: 0,
            line: 1,
            column: 0,
        }
    }

    #[inline]
    pub(crate) fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.peek_nth(1)
    }

    #[inline]
    pub(crate) fn peek_nth(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// Current line/column. The line advances past every raw `\n`.
    #[inline]
    pub(crate) fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Consume one character and return it.
    pub(crate) fn advance(&mut self) -> Option<char> {
        let c = self.current()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consume the current character if it equals `expected`.
    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.current() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume characters while `pred` holds; returns how many were eaten.
    pub(crate) fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> usize {
        let mut count = 0;
        while let Some(c) = self.current() {
            if !pred(c) {
                break;
            }
            self.advance();
            count += 1;
        }
        count
    }

    /// Skip spaces and tabs (never newlines).
    pub(crate) fn skip_horizontal_whitespace(&mut self) -> usize {
        self.eat_while(|c| c == ' ' || c == '\t')
    }

    /// Source text between two positions.
    pub(crate) fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        self.chars[start.min(end)..end].iter().collect()
    }

    /// Source text from `start` up to the cursor.
    pub(crate) fn slice_from(&self, start: usize) -> String {
        self.slice(start, self.pos)
    }
}
