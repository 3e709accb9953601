//! The scanning loop.
//!
//! Dispatches on the current character, producing at most one token per
//! step. Errors are pushed onto `errors` and the loop carries on from
//! wherever the failed rule stopped.

use std::sync::Arc;

use brs_ir::{Lexeme, Literal, Location, Position, Token};

use crate::cursor::Cursor;
use crate::{keywords, number, LexError, LexErrorKind, ScanOutput};

pub(crate) struct Scanner<'a> {
    cursor: Cursor<'a>,
    file: Arc<str>,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
    /// Start of the token being scanned.
    start: usize,
    start_position: Position,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(chars: &'a [char], file: Arc<str>) -> Self {
        let cursor = Cursor::new(chars);
        Scanner {
            cursor,
            file,
            tokens: Vec::new(),
            errors: Vec::new(),
            start: 0,
            start_position: cursor.position(),
        }
    }

    pub(crate) fn run(mut self) -> ScanOutput {
        while !self.cursor.is_eof() {
            self.start = self.cursor.pos();
            self.start_position = self.cursor.position();
            self.scan_token();
        }

        let end = self.cursor.position();
        let eof = Token::new(
            Lexeme::Eof,
            "",
            Location::new(Arc::clone(&self.file), end, end),
        );
        self.tokens.push(eof);

        ScanOutput {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    fn scan_token(&mut self) {
        let Some(c) = self.cursor.current() else {
            return;
        };

        let next = self.cursor.peek();
        if c.is_ascii_digit() || (c == '.' && next.is_some_and(|d| d.is_ascii_digit())) {
            self.number(number::decimal);
            return;
        }
        if c == '&' && number::is_hex_prefix(next) {
            self.number(number::hex);
            return;
        }

        self.cursor.advance();
        match c {
            '\n' => self.newline(),
            ' ' | '\t' | '\r' => {}
            '\'' => self.skip_comment(),
            '"' => self.string(),

            '(' => self.push(Lexeme::LeftParen),
            ')' => self.push(Lexeme::RightParen),
            '[' => self.push(Lexeme::LeftSquare),
            ']' => self.push(Lexeme::RightSquare),
            '{' => self.push(Lexeme::LeftBrace),
            '}' => self.push(Lexeme::RightBrace),
            ',' => self.push(Lexeme::Comma),
            ':' => self.push(Lexeme::Colon),
            ';' => self.push(Lexeme::Semicolon),
            '@' => self.push(Lexeme::At),
            '?' => self.push(Lexeme::Print),

            '.' => self.push(Lexeme::Dot),

            '^' => self.with_equal(Lexeme::Caret, Lexeme::CaretEqual),
            '*' => self.with_equal(Lexeme::Star, Lexeme::StarEqual),
            '/' => self.with_equal(Lexeme::Slash, Lexeme::SlashEqual),
            '\\' => self.with_equal(Lexeme::Backslash, Lexeme::BackslashEqual),
            '=' => self.push(Lexeme::Equal),
            '+' => {
                if self.cursor.eat('+') {
                    self.push(Lexeme::PlusPlus);
                } else {
                    self.with_equal(Lexeme::Plus, Lexeme::PlusEqual);
                }
            }
            '-' => {
                if self.cursor.eat('-') {
                    self.push(Lexeme::MinusMinus);
                } else {
                    self.with_equal(Lexeme::Minus, Lexeme::MinusEqual);
                }
            }
            '<' => {
                if self.cursor.eat('=') {
                    self.push(Lexeme::LessEqual);
                } else if self.cursor.eat('>') {
                    self.push(Lexeme::LessGreater);
                } else if self.cursor.eat('<') {
                    self.with_equal(Lexeme::LeftShift, Lexeme::LeftShiftEqual);
                } else {
                    self.push(Lexeme::Less);
                }
            }
            '>' => {
                if self.cursor.eat('=') {
                    self.push(Lexeme::GreaterEqual);
                } else if self.cursor.eat('>') {
                    self.with_equal(Lexeme::RightShift, Lexeme::RightShiftEqual);
                } else {
                    self.push(Lexeme::Greater);
                }
            }

            '#' => self.directive(),
            c if c.is_alphabetic() || c == '_' => self.identifier(),

            other => self.error(LexErrorKind::UnexpectedCharacter(other)),
        }
    }

    // === Emission ===

    fn location(&self) -> Location {
        Location::new(
            Arc::clone(&self.file),
            self.start_position,
            self.cursor.position(),
        )
    }

    fn push(&mut self, kind: Lexeme) {
        let text = self.cursor.slice_from(self.start);
        let token = Token::new(kind, text, self.location());
        self.tokens.push(token);
    }

    fn push_literal(&mut self, kind: Lexeme, literal: Literal) {
        let text = self.cursor.slice_from(self.start);
        let token = Token::new(kind, text, self.location()).with_literal(literal);
        self.tokens.push(token);
    }

    fn error(&mut self, kind: LexErrorKind) {
        let error = LexError::new(kind, self.location());
        self.errors.push(error);
    }

    fn with_equal(&mut self, plain: Lexeme, compound: Lexeme) {
        if self.cursor.eat('=') {
            self.push(compound);
        } else {
            self.push(plain);
        }
    }

    // === Rules ===

    fn newline(&mut self) {
        if self
            .tokens
            .last()
            .is_some_and(|token| token.kind == Lexeme::Newline)
        {
            return;
        }
        let end = Position::new(self.start_position.line, self.start_position.column + 1);
        let location = Location::new(Arc::clone(&self.file), self.start_position, end);
        self.tokens.push(Token::new(Lexeme::Newline, "\n", location));
    }

    fn skip_comment(&mut self) {
        self.cursor.eat_while(|c| c != '\n');
    }

    fn string(&mut self) {
        let mut value = String::new();
        loop {
            match self.cursor.current() {
                None => {
                    self.error(LexErrorKind::UnterminatedStringAtEndOfFile);
                    return;
                }
                Some('\n') => {
                    self.error(LexErrorKind::UnterminatedStringAtEndOfLine);
                    return;
                }
                Some('"') => {
                    self.cursor.advance();
                    if self.cursor.eat('"') {
                        value.push('"');
                    } else {
                        break;
                    }
                }
                Some(c) => {
                    self.cursor.advance();
                    value.push(c);
                }
            }
        }
        self.push_literal(Lexeme::String, Literal::String(value));
    }

    fn number(
        &mut self,
        rule: fn(&mut Cursor<'_>) -> Result<(Lexeme, Literal), LexErrorKind>,
    ) {
        match rule(&mut self.cursor) {
            Ok((kind, literal)) => self.push_literal(kind, literal),
            Err(kind) => self.error(kind),
        }
    }

    fn identifier(&mut self) {
        self.cursor.eat_while(is_identifier_char);
        let word = self.cursor.slice_from(self.start);
        let lower = word.to_ascii_lowercase();

        if lower == "rem" {
            self.skip_comment();
            return;
        }

        if keywords::starts_multi_word(&lower) && self.try_multi_word(&lower) {
            return;
        }

        if matches!(self.cursor.current(), Some('$' | '%' | '!' | '#' | '&')) {
            self.cursor.advance();
            self.push(Lexeme::Identifier);
            return;
        }

        match keywords::lookup(&lower) {
            Some(Lexeme::True) => self.push_literal(Lexeme::True, Literal::Boolean(true)),
            Some(Lexeme::False) => self.push_literal(Lexeme::False, Literal::Boolean(false)),
            Some(Lexeme::Invalid) => self.push_literal(Lexeme::Invalid, Literal::Invalid),
            Some(kind) => self.push(kind),
            None => self.push(Lexeme::Identifier),
        }
    }

    /// After `end`, `else`, `exit` or `for`, try to read a second word that
    /// completes a multi-word keyword. On a miss the cursor is restored to
    /// just after the first word.
    fn try_multi_word(&mut self, first: &str) -> bool {
        let saved = self.cursor;
        if self.cursor.skip_horizontal_whitespace() == 0 {
            return false;
        }
        let second_start = self.cursor.pos();
        self.cursor.eat_while(is_identifier_char);
        let second = self.cursor.slice_from(second_start).to_ascii_lowercase();

        if let Some(kind) = keywords::multi_word_lookup(&format!("{first} {second}")) {
            self.push(kind);
            true
        } else {
            self.cursor = saved;
            false
        }
    }

    fn directive(&mut self) {
        let word_start = self.cursor.pos();
        self.cursor.eat_while(|c| c.is_ascii_alphabetic());
        let word = self.cursor.slice_from(word_start).to_ascii_lowercase();
        tracing::trace!(directive = %word, line = self.start_position.line, "directive");

        match word.as_str() {
            "const" => self.push(Lexeme::HashConst),
            "if" => self.push(Lexeme::HashIf),
            "elseif" => self.push(Lexeme::HashElseIf),
            "endif" => self.push(Lexeme::HashEndIf),
            "else" => {
                if self.eat_trailing_if() {
                    self.push(Lexeme::HashElseIf);
                } else {
                    self.push(Lexeme::HashElse);
                }
            }
            "end" => {
                if self.eat_trailing_if() {
                    self.push(Lexeme::HashEndIf);
                } else {
                    self.error(LexErrorKind::UnknownDirective(word));
                }
            }
            "error" => self.error_directive(),
            _ => self.error(LexErrorKind::UnknownDirective(word)),
        }
    }

    /// `#else if` / `#end if`: consume whitespace plus `if` when present.
    fn eat_trailing_if(&mut self) -> bool {
        let saved = self.cursor;
        self.cursor.skip_horizontal_whitespace();
        let word_start = self.cursor.pos();
        self.cursor.eat_while(|c| c.is_ascii_alphabetic());
        if self.cursor.slice_from(word_start).eq_ignore_ascii_case("if") {
            true
        } else {
            self.cursor = saved;
            false
        }
    }

    /// `#error message`: the message is the rest of the line, and the newline
    /// that ends it produces no token.
    fn error_directive(&mut self) {
        self.push(Lexeme::HashError);

        self.cursor.skip_horizontal_whitespace();
        self.start = self.cursor.pos();
        self.start_position = self.cursor.position();
        self.cursor.eat_while(|c| c != '\n');
        self.push(Lexeme::HashErrorMessage);

        self.cursor.eat('\n');
    }
}

#[inline]
fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
