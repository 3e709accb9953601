//! Scanner output: lexemes, literal payloads and tokens.
//!
//! The token stream is the one artifact downstream parsing depends on
//! directly, so lexeme names and classification are kept stable.

use std::fmt;

use crate::Location;

/// Syntactic category of a scanned chunk of source text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Lexeme {
    // Grouping
    LeftParen,
    RightParen,
    LeftSquare,
    RightSquare,
    LeftBrace,
    RightBrace,

    // Operators
    Caret,
    Minus,
    Plus,
    Star,
    Slash,
    Backslash,
    PlusPlus,
    MinusMinus,
    LeftShift,
    RightShift,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    LessGreater,

    // Compound assignment
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    BackslashEqual,
    CaretEqual,
    LeftShiftEqual,
    RightShiftEqual,

    // Punctuation
    Dot,
    Comma,
    Colon,
    Semicolon,
    At,

    // Literals and names
    Identifier,
    String,
    Integer,
    LongInteger,
    Float,
    Double,

    // Keywords
    And,
    Dim,
    Else,
    ElseIf,
    End,
    EndFunction,
    EndFor,
    EndIf,
    EndSub,
    EndWhile,
    Exit,
    ExitFor,
    ExitWhile,
    False,
    For,
    ForEach,
    Function,
    Goto,
    If,
    In,
    Invalid,
    Let,
    Library,
    Mod,
    Next,
    Not,
    Or,
    Print,
    Return,
    Step,
    Stop,
    Sub,
    Then,
    To,
    True,
    While,

    // Conditional compilation
    HashConst,
    HashIf,
    HashElseIf,
    HashElse,
    HashEndIf,
    HashError,
    HashErrorMessage,

    Newline,
    Eof,
}

impl Lexeme {
    /// Whether this lexeme is a word-like keyword (as opposed to an operator,
    /// literal, identifier or directive).
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            Lexeme::And
                | Lexeme::Dim
                | Lexeme::Else
                | Lexeme::ElseIf
                | Lexeme::End
                | Lexeme::EndFunction
                | Lexeme::EndFor
                | Lexeme::EndIf
                | Lexeme::EndSub
                | Lexeme::EndWhile
                | Lexeme::Exit
                | Lexeme::ExitFor
                | Lexeme::ExitWhile
                | Lexeme::False
                | Lexeme::For
                | Lexeme::ForEach
                | Lexeme::Function
                | Lexeme::Goto
                | Lexeme::If
                | Lexeme::In
                | Lexeme::Invalid
                | Lexeme::Let
                | Lexeme::Library
                | Lexeme::Mod
                | Lexeme::Next
                | Lexeme::Not
                | Lexeme::Or
                | Lexeme::Print
                | Lexeme::Return
                | Lexeme::Step
                | Lexeme::Stop
                | Lexeme::Sub
                | Lexeme::Then
                | Lexeme::To
                | Lexeme::True
                | Lexeme::While
        )
    }

    /// Whether this lexeme is a numeric literal.
    pub fn is_number(self) -> bool {
        matches!(
            self,
            Lexeme::Integer | Lexeme::LongInteger | Lexeme::Float | Lexeme::Double
        )
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Literal payload attached to string, numeric, boolean and `invalid` tokens.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Invalid,
    Boolean(bool),
    String(String),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Invalid => write!(f, "invalid"),
            Literal::Boolean(b) => write!(f, "{b}"),
            Literal::String(s) => write!(f, "\"{s}\""),
            Literal::Int32(n) => write!(f, "{n}"),
            Literal::Int64(n) => write!(f, "{n}&"),
            Literal::Float(x) => write!(f, "{x}!"),
            Literal::Double(x) => write!(f, "{x}#"),
        }
    }
}

/// A scanned token. Immutable once produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: Lexeme,
    /// Source text exactly as written (multi-word keywords keep their
    /// original spacing).
    pub text: String,
    /// Reserved words cannot be assigned to, independent of `kind`.
    pub is_reserved: bool,
    pub literal: Option<Literal>,
    pub location: Location,
}

impl Token {
    pub fn new(kind: Lexeme, text: impl Into<String>, location: Location) -> Self {
        let text = text.into();
        let is_reserved = is_reserved_word(&text);
        Token {
            kind,
            text,
            is_reserved,
            literal: None,
            location,
        }
    }

    #[must_use]
    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = Some(literal);
        self
    }
}

/// Words that may never be used as assignment targets.
///
/// Some of these are keywords (`if`, `while`), some are ordinary identifiers
/// that resolve to built-ins (`type`, `createobject`), and some keywords are
/// deliberately absent (`in`, `mod`, `library`, `foreach`).
pub const RESERVED_WORDS: &[&str] = &[
    "and",
    "box",
    "createobject",
    "dim",
    "each",
    "else",
    "elseif",
    "end",
    "endfunction",
    "endif",
    "endsub",
    "endwhile",
    "eval",
    "exit",
    "exitwhile",
    "false",
    "for",
    "function",
    "getglobalaa",
    "getlastruncompileerror",
    "getlastrunruntimeerror",
    "goto",
    "if",
    "invalid",
    "let",
    "line_num",
    "next",
    "not",
    "objfun",
    "or",
    "pos",
    "print",
    "rem",
    "return",
    "run",
    "step",
    "stop",
    "sub",
    "tab",
    "then",
    "to",
    "true",
    "type",
    "while",
];

/// Case-insensitive reserved-word check.
pub fn is_reserved_word(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    RESERVED_WORDS.binary_search(&lower.as_str()).is_ok()
}
