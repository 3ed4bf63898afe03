//! # jsonlex
//!
//! A streaming lexical tokenizer for JSON with one-token lookahead and
//! precise line/column tracking.
//!
//! ## Overview
//!
//! This crate turns a character stream into a sequence of typed lexical
//! tokens (structural punctuation and literals), each annotated with the
//! 1-based line and column of its first character. It is the bottom layer of
//! a JSON processing stack: a downstream parser assembles the tokens into a
//! value tree and enforces grammar rules; the tokenizer guarantees lexical
//! correctness only, and will happily emit `}` right after `{`.
//!
//! ## Key Features
//!
//! - **Pull-based streaming**: tokens are scanned on demand from any
//!   [`std::io::Read`] source, never reading ahead of what recognition
//!   requires (at most one character of pushback)
//! - **Exact positions**: line/column accounting is per character consumed,
//!   including inside strings and numbers, so errors point at the offending
//!   character
//! - **Full escape handling**: the eight simple escapes, strict `\uXXXX`
//!   decoding, and implicit UTF-16 surrogate pair reassembly
//! - **Shape-based numeric classification**: literals without a fraction or
//!   exponent become `i64` tokens, everything else `f64`
//! - **Uniform error reporting**: a lexical failure is delivered as a single
//!   `Error`-kind token that terminates the stream, so consumers have one
//!   code path instead of a side channel
//!
//! ## Basic Usage
//!
//! ```rust
//! use jsonlex::{Token, tokenizer_from_str};
//!
//! let mut tokens = tokenizer_from_str(r#"{"answer": 42}"#);
//!
//! assert_eq!(tokens.next(), Some(Token::object_start(1, 1)));
//! assert_eq!(tokens.next(), Some(Token::string("answer", 1, 2)));
//! assert_eq!(tokens.next(), Some(Token::name_separator(1, 10)));
//! assert_eq!(tokens.next(), Some(Token::integer(42, 1, 12)));
//! assert_eq!(tokens.next(), Some(Token::object_end(1, 14)));
//! assert_eq!(tokens.next(), None);
//! ```
//!
//! ## Streaming from a Reader
//!
//! ```rust,no_run
//! use std::fs::File;
//! use std::io::BufReader;
//! use jsonlex::Tokenizer;
//!
//! let file = File::open("large.json")?;
//! let mut tokenizer = Tokenizer::new(BufReader::new(file));
//! while let Some(token) = tokenizer.next_token() {
//!     // Process one token at a time with constant memory usage...
//! }
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Errors arrive in-band as the final token of the stream:
//!
//! ```rust
//! use jsonlex::{TokenKind, TokenValue, tokenizer_from_str};
//!
//! let mut tokens = tokenizer_from_str("[1, nope]");
//!
//! assert_eq!(tokens.next().unwrap().kind(), TokenKind::ArrayStart);
//! assert_eq!(tokens.next().unwrap().kind(), TokenKind::Integer);
//! assert_eq!(tokens.next().unwrap().kind(), TokenKind::ValueSeparator);
//!
//! let error = tokens.next().unwrap();
//! assert_eq!(error.kind(), TokenKind::Error);
//! assert_eq!(
//!     error.value(),
//!     &TokenValue::Str("Unexpected character: o".to_string())
//! );
//! assert_eq!((error.line(), error.column()), (1, 6));
//!
//! // The stream is terminal after an error token.
//! assert_eq!(tokens.next(), None);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: derive `Serialize`/`Deserialize` for [`Token`], [`TokenKind`],
//!   [`TokenValue`], and [`Position`] so token streams can be captured and
//!   replayed by tooling

pub mod error;
pub mod lexer;
pub mod token;

// Re-export main types and functions
pub use error::{LexError, Position};
pub use lexer::{Tokenizer, tokenizer_from_str};
pub use token::{Token, TokenKind, TokenValue};
