//! Lexical tokens produced by the tokenizer
//!
//! A [`Token`] is an immutable value: its kind, a kind-dependent payload, and
//! the 1-based line/column of its first character. Payloads can never
//! mismatch their kind because the only way to build a token is through the
//! per-kind factory constructors.

use std::hash::{Hash, Hasher};

use crate::error::Position;

/// The closed set of lexical token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// `{`
    ObjectStart,
    /// `}`
    ObjectEnd,
    /// `:`
    NameSeparator,
    /// `,`
    ValueSeparator,
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
    /// String literal
    String,
    /// `null`
    Null,
    /// `true` or `false`
    Boolean,
    /// Numeric literal with neither fraction nor exponent
    Integer,
    /// Numeric literal with a fraction or exponent
    Float,
    /// Terminal lexical error; the payload is the message
    Error,
}

impl TokenKind {
    /// Returns a string representation of the token kind for error messages
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::ObjectStart => "'{'",
            TokenKind::ObjectEnd => "'}'",
            TokenKind::NameSeparator => "':'",
            TokenKind::ValueSeparator => "','",
            TokenKind::ArrayStart => "'['",
            TokenKind::ArrayEnd => "']'",
            TokenKind::String => "string",
            TokenKind::Null => "null",
            TokenKind::Boolean => "boolean",
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::Error => "error",
        }
    }
}

/// Kind-dependent token payload
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenValue {
    /// Structural tokens and `null` carry no payload
    None,
    /// Boolean literal
    Bool(bool),
    /// Decoded string literal, or an error message
    Str(String),
    /// 64-bit signed integer literal
    Int(i64),
    /// 64-bit binary floating point literal
    Float(f64),
}

// The tokenizer only ever produces floats parsed from finite decimal
// literals, never NaN, so total equality holds for every value that can
// actually appear in a token.
impl Eq for TokenValue {}

impl Hash for TokenValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            TokenValue::None => {}
            TokenValue::Bool(b) => b.hash(state),
            TokenValue::Str(s) => s.hash(state),
            TokenValue::Int(i) => i.hash(state),
            TokenValue::Float(f) => f.to_bits().hash(state),
        }
    }
}

/// One immutable lexical unit
///
/// Equality and hashing are structural over (kind, value, line, column). An
/// `Error`-kind token is shape-identical to any other token so that a single
/// stream type serves both success and failure reporting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    kind: TokenKind,
    value: TokenValue,
    line: usize,
    column: usize,
}

impl Token {
    fn new(kind: TokenKind, value: TokenValue, line: usize, column: usize) -> Self {
        Self {
            kind,
            value,
            line,
            column,
        }
    }

    /// Creates an `{` token
    pub fn object_start(line: usize, column: usize) -> Self {
        Self::new(TokenKind::ObjectStart, TokenValue::None, line, column)
    }

    /// Creates a `}` token
    pub fn object_end(line: usize, column: usize) -> Self {
        Self::new(TokenKind::ObjectEnd, TokenValue::None, line, column)
    }

    /// Creates a `:` token
    pub fn name_separator(line: usize, column: usize) -> Self {
        Self::new(TokenKind::NameSeparator, TokenValue::None, line, column)
    }

    /// Creates a `,` token
    pub fn value_separator(line: usize, column: usize) -> Self {
        Self::new(TokenKind::ValueSeparator, TokenValue::None, line, column)
    }

    /// Creates a `[` token
    pub fn array_start(line: usize, column: usize) -> Self {
        Self::new(TokenKind::ArrayStart, TokenValue::None, line, column)
    }

    /// Creates a `]` token
    pub fn array_end(line: usize, column: usize) -> Self {
        Self::new(TokenKind::ArrayEnd, TokenValue::None, line, column)
    }

    /// Creates a string literal token from its decoded value
    pub fn string(value: impl Into<String>, line: usize, column: usize) -> Self {
        Self::new(TokenKind::String, TokenValue::Str(value.into()), line, column)
    }

    /// Creates a `null` literal token
    pub fn null(line: usize, column: usize) -> Self {
        Self::new(TokenKind::Null, TokenValue::None, line, column)
    }

    /// Creates a boolean literal token
    pub fn boolean(value: bool, line: usize, column: usize) -> Self {
        Self::new(TokenKind::Boolean, TokenValue::Bool(value), line, column)
    }

    /// Creates an integer literal token
    pub fn integer(value: i64, line: usize, column: usize) -> Self {
        Self::new(TokenKind::Integer, TokenValue::Int(value), line, column)
    }

    /// Creates a float literal token
    pub fn float(value: f64, line: usize, column: usize) -> Self {
        Self::new(TokenKind::Float, TokenValue::Float(value), line, column)
    }

    /// Creates an error token carrying a human-readable message
    pub fn error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::new(TokenKind::Error, TokenValue::Str(message.into()), line, column)
    }

    /// Returns the token kind
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Returns the token payload
    pub fn value(&self) -> &TokenValue {
        &self.value
    }

    /// Returns the line of the token's first character (1-based)
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the column of the token's first character (1-based)
    pub fn column(&self) -> usize {
        self.column
    }

    /// Returns the position of the token's first character
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Returns true for `Error`-kind tokens
    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }
}
