//! Error types and position tracking for JSON tokenization
//!
//! Every lexical failure is position-tagged and terminal for the stream. The
//! tokenizer never surfaces a `LexError` to its callers directly; instead each
//! error is converted into a single `Error`-kind token at the scan boundary
//! (see [`LexError::into_token`]), so consumers have exactly one code path for
//! success and failure.

use std::fmt;
use std::io;
use thiserror::Error;

use crate::token::Token;

/// Represents a position in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
}

impl Position {
    /// Creates a new position
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Lexical analysis errors
///
/// The `Display` strings double as the payload of the error token a failed
/// scan produces, so they deliberately do not repeat the position; callers
/// that want it use [`LexError::position`].
#[derive(Debug, Error)]
pub enum LexError {
    /// A keyword tail (`alse`, `ull`, `rue`) did not match
    #[error("Unexpected character: {character}")]
    UnexpectedCharacter { character: char, position: Position },

    /// A byte outside the structural/literal-start set at a token boundary
    #[error("Unrecognized character: {character}")]
    UnrecognizedCharacter { character: char, position: Position },

    /// Source exhausted inside a multi-character construct
    #[error("Unexpected end of input")]
    UnexpectedEndOfInput { position: Position },

    /// Unknown escape letter after a backslash in a string
    #[error("Unrecognized escape sequence: \\{character}")]
    UnrecognizedEscape { character: char, position: Position },

    /// Non-hex digit inside a `\u` escape
    #[error("Invalid character in Unicode escape: {character}")]
    InvalidUnicodeEscape { character: char, position: Position },

    /// Unescaped code point <= 0x1F inside a string literal
    #[error("Control characters not allowed inside strings")]
    ControlCharacter { position: Position },

    /// A required digit run in a numeric literal was empty
    #[error("Expected digits in numeric literal")]
    ExpectedDigits { position: Position },

    /// A literal matched the numeric grammar but failed final parsing,
    /// e.g. integer magnitude overflow
    #[error("Invalid numeric literal: {literal}")]
    InvalidNumber { literal: String, position: Position },

    /// Read failure from the underlying source
    #[error("{source}")]
    Io {
        position: Position,
        #[source]
        source: io::Error,
    },
}

impl LexError {
    /// Returns the position at which the failure was detected
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedCharacter { position, .. }
            | LexError::UnrecognizedCharacter { position, .. }
            | LexError::UnexpectedEndOfInput { position }
            | LexError::UnrecognizedEscape { position, .. }
            | LexError::InvalidUnicodeEscape { position, .. }
            | LexError::ControlCharacter { position }
            | LexError::ExpectedDigits { position }
            | LexError::InvalidNumber { position, .. }
            | LexError::Io { position, .. } => *position,
        }
    }

    /// Converts the error into an `Error`-kind token carrying the
    /// human-readable message and the failure position
    pub fn into_token(self) -> Token {
        let position = self.position();
        Token::error(self.to_string(), position.line, position.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;
    use std::error::Error as _;

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, 14).to_string(), "3:14");
    }

    #[test]
    fn test_error_messages() {
        let pos = Position::new(1, 2);
        assert_eq!(
            LexError::UnexpectedCharacter {
                character: 'l',
                position: pos
            }
            .to_string(),
            "Unexpected character: l"
        );
        assert_eq!(
            LexError::UnrecognizedCharacter {
                character: '@',
                position: pos
            }
            .to_string(),
            "Unrecognized character: @"
        );
        assert_eq!(
            LexError::UnexpectedEndOfInput { position: pos }.to_string(),
            "Unexpected end of input"
        );
        assert_eq!(
            LexError::UnrecognizedEscape {
                character: 'x',
                position: pos
            }
            .to_string(),
            "Unrecognized escape sequence: \\x"
        );
        assert_eq!(
            LexError::InvalidUnicodeEscape {
                character: 'g',
                position: pos
            }
            .to_string(),
            "Invalid character in Unicode escape: g"
        );
        assert_eq!(
            LexError::ControlCharacter { position: pos }.to_string(),
            "Control characters not allowed inside strings"
        );
        assert_eq!(
            LexError::ExpectedDigits { position: pos }.to_string(),
            "Expected digits in numeric literal"
        );
        assert_eq!(
            LexError::InvalidNumber {
                literal: "99999999999999999999".to_string(),
                position: pos
            }
            .to_string(),
            "Invalid numeric literal: 99999999999999999999"
        );
    }

    #[test]
    fn test_position_accessor() {
        let err = LexError::ControlCharacter {
            position: Position::new(4, 7),
        };
        assert_eq!(err.position(), Position::new(4, 7));
    }

    #[test]
    fn test_into_token() {
        let err = LexError::UnexpectedEndOfInput {
            position: Position::new(2, 5),
        };
        let token = err.into_token();
        assert_eq!(token.kind(), TokenKind::Error);
        assert_eq!(token.line(), 2);
        assert_eq!(token.column(), 5);
        assert_eq!(token, Token::error("Unexpected end of input", 2, 5));
    }

    #[test]
    fn test_io_error_preserves_cause() {
        let inner = io::Error::new(io::ErrorKind::Other, "disk on fire");
        let err = LexError::Io {
            position: Position::new(1, 1),
            source: inner,
        };
        assert_eq!(err.to_string(), "disk on fire");
        assert!(err.source().is_some());
    }
}
