//! Streaming JSON tokenizer
//!
//! This module provides the core lexical analysis functionality: a pull-based,
//! single-pass [`Tokenizer`] that reads characters from any [`Read`] source on
//! demand and produces [`Token`]s one at a time.
//!
//! The tokenizer holds at most one character of pushback (used when a scanning
//! routine reads one character past the end of a sub-token to detect its
//! boundary) and at most one already-scanned token in an on-deck slot (filled
//! by [`Tokenizer::has_next`] lookahead). It never reads further ahead of the
//! source than recognition requires, so it can tokenize from a pipe or socket
//! without waiting for the document to end.

use std::io::{self, Cursor, Read};

use crate::error::{LexError, Position};
use crate::token::{Token, TokenKind};

/// Incremental UTF-8 decoder over a byte source
///
/// Decodes exactly one scalar value per call, reading only the bytes that
/// value needs. Invalid or truncated UTF-8 is reported as an `InvalidData`
/// I/O error, distinct from end-of-input.
struct CharSource<R> {
    reader: R,
}

impl<R: Read> CharSource<R> {
    fn new(reader: R) -> Self {
        Self { reader }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn read_char(&mut self) -> io::Result<Option<char>> {
        let first = match self.read_byte()? {
            Some(byte) => byte,
            None => return Ok(None),
        };
        if first < 0x80 {
            return Ok(Some(first as char));
        }

        // Leading byte determines the sequence length; 0xC0/0xC1 and
        // 0xF5..=0xFF can never start a valid sequence.
        let len = match first {
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "invalid UTF-8 sequence in input",
                ));
            }
        };

        let mut buf = [first, 0, 0, 0];
        for slot in buf.iter_mut().take(len).skip(1) {
            *slot = self.read_byte()?.ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "truncated UTF-8 sequence in input",
                )
            })?;
        }

        match std::str::from_utf8(&buf[..len]) {
            Ok(s) => Ok(s.chars().next()),
            Err(_) => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "invalid UTF-8 sequence in input",
            )),
        }
    }
}

/// A pull-based JSON tokenizer over a character source
///
/// The tokenizer owns the source for its lifetime and only ever reads from
/// it; dropping the tokenizer drops the source. It is single-threaded mutable
/// state with no internal locking; use one tokenizer per source.
///
/// Once a scan fails, the failure is delivered as a single `Error`-kind token
/// and the tokenizer goes inert: every later [`has_next`](Self::has_next)
/// answers `false` and every later [`next_token`](Self::next_token) answers
/// `None`, regardless of what the source still contains.
pub struct Tokenizer<R> {
    source: CharSource<R>,
    /// Line of the most recently consumed character (1-based)
    line: usize,
    /// Column of the most recently consumed character; 0 before the first
    /// character of a line is consumed
    column: usize,
    /// Single-character pushback slot
    pushback: Option<char>,
    /// Token already scanned but not yet handed to the caller
    on_deck: Option<Token>,
    /// Set once an error token has been produced
    errored: bool,
}

/// Creates a tokenizer over an in-memory string
///
/// Convenience for tests and small inputs; equivalent to
/// `Tokenizer::new(Cursor::new(input.as_bytes()))`.
pub fn tokenizer_from_str(input: &str) -> Tokenizer<Cursor<&[u8]>> {
    Tokenizer::new(Cursor::new(input.as_bytes()))
}

impl<R: Read> Tokenizer<R> {
    /// Creates a new tokenizer reading from the given source
    ///
    /// The source is read one scalar value at a time; wrap slow sources in a
    /// [`std::io::BufReader`].
    pub fn new(reader: R) -> Self {
        Self {
            source: CharSource::new(reader),
            line: 1,
            column: 0,
            pushback: None,
            on_deck: None,
            errored: false,
        }
    }

    /// Returns whether a call to [`next_token`](Self::next_token) will yield
    /// a token
    ///
    /// Performs lookahead by scanning the next token into the on-deck slot if
    /// one is not already buffered. This may read from the source, but it is
    /// idempotent: repeated calls without an intervening `next_token` do not
    /// read again.
    pub fn has_next(&mut self) -> bool {
        if self.errored {
            return false;
        }
        if self.on_deck.is_none() {
            self.try_read_token();
        }
        self.on_deck.is_some()
    }

    /// Returns the next token, or `None` if the source is exhausted or an
    /// error token has already been delivered
    ///
    /// An `Error`-kind return is the last token of the stream.
    pub fn next_token(&mut self) -> Option<Token> {
        if self.errored {
            return None;
        }
        if self.on_deck.is_none() {
            self.try_read_token();
        }
        let token = self.on_deck.take()?;
        if token.kind() == TokenKind::Error {
            self.errored = true;
        }
        Some(token)
    }

    /// Returns whether the stream was cut short by a lexical error
    pub fn hit_error(&self) -> bool {
        self.errored
    }

    /// Scans one token into the on-deck slot, converting any failure into an
    /// error token. This is the single error boundary of the tokenizer.
    fn try_read_token(&mut self) {
        debug_assert!(
            self.on_deck.is_none(),
            "scan requested with a token on deck"
        );
        self.on_deck = match self.scan_token() {
            Ok(token) => token,
            Err(e) => Some(e.into_token()),
        };
    }

    /// Position of the most recently consumed character
    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Delivers the pushed-back character if present, otherwise reads one
    /// from the source and counts it
    ///
    /// Every character is counted exactly once, at the moment it is first
    /// decoded: `\n` increments the line and resets the column to 0, anything
    /// else increments the column. A pushed-back character was already
    /// counted, so re-delivering it leaves the counters pointing at it.
    fn next_char(&mut self) -> Result<Option<char>, LexError> {
        if let Some(c) = self.pushback.take() {
            return Ok(Some(c));
        }
        match self.source.read_char() {
            Ok(Some(c)) => {
                if c == '\n' {
                    self.line += 1;
                    self.column = 0;
                } else {
                    self.column += 1;
                }
                Ok(Some(c))
            }
            Ok(None) => Ok(None),
            Err(source) => Err(LexError::Io {
                position: Self::position(self),
                source,
            }),
        }
    }

    /// Holds one character for the next read
    fn push_back(&mut self, c: char) {
        debug_assert!(self.pushback.is_none(), "pushback slot already occupied");
        self.pushback = Some(c);
    }

    /// Scans one token, or `None` at a clean end of input
    fn scan_token(&mut self) -> Result<Option<Token>, LexError> {
        let c = loop {
            match self.next_char()? {
                None => return Ok(None),
                Some(' ' | '\t' | '\r' | '\n') => continue,
                Some(c) => break c,
            }
        };

        // The counters point at the character just consumed, which is the
        // first character of the token.
        let (line, column) = (self.line, self.column);
        let token = match c {
            '{' => Token::object_start(line, column),
            '}' => Token::object_end(line, column),
            ':' => Token::name_separator(line, column),
            ',' => Token::value_separator(line, column),
            '[' => Token::array_start(line, column),
            ']' => Token::array_end(line, column),
            '"' => self.scan_string(line, column)?,
            'f' => self.expect_tail("alse", Token::boolean(false, line, column))?,
            'n' => self.expect_tail("ull", Token::null(line, column))?,
            't' => self.expect_tail("rue", Token::boolean(true, line, column))?,
            '-' | '0'..='9' => self.scan_number(c, line, column)?,
            other => {
                return Err(LexError::UnrecognizedCharacter {
                    character: other,
                    position: Position::new(line, column),
                });
            }
        };
        Ok(Some(token))
    }

    /// Matches the remaining characters of a keyword literal
    ///
    /// On mismatch the error points at the offending character; at end of
    /// input it points at the last character that was consumed.
    fn expect_tail(&mut self, tail: &str, token: Token) -> Result<Token, LexError> {
        for expected in tail.chars() {
            match self.next_char()? {
                None => {
                    return Err(LexError::UnexpectedEndOfInput {
                        position: Self::position(self),
                    });
                }
                Some(actual) if actual != expected => {
                    return Err(LexError::UnexpectedCharacter {
                        character: actual,
                        position: Self::position(self),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(token)
    }

    /// Scans a string literal; `line`/`column` locate the opening quote
    fn scan_string(&mut self, line: usize, column: usize) -> Result<Token, LexError> {
        let mut value = String::new();
        // High surrogate from a `\u` escape waiting for its low half.
        let mut pending_surrogate: Option<u16> = None;

        loop {
            let c = self.next_char()?.ok_or_else(|| LexError::UnexpectedEndOfInput {
                position: Self::position(self),
            })?;

            if c == '\\' {
                let escape = self.next_char()?.ok_or_else(|| LexError::UnexpectedEndOfInput {
                    position: Self::position(self),
                })?;
                if escape == 'u' {
                    let unit = self.read_utf16_unit()?;
                    push_utf16_unit(&mut value, &mut pending_surrogate, unit);
                    continue;
                }
                flush_pending_surrogate(&mut value, &mut pending_surrogate);
                match escape {
                    '"' | '\\' | '/' => value.push(escape),
                    'b' => value.push('\u{0008}'),
                    'f' => value.push('\u{000C}'),
                    'n' => value.push('\n'),
                    'r' => value.push('\r'),
                    't' => value.push('\t'),
                    other => {
                        return Err(LexError::UnrecognizedEscape {
                            character: other,
                            position: Self::position(self),
                        });
                    }
                }
            } else if c == '"' {
                flush_pending_surrogate(&mut value, &mut pending_surrogate);
                return Ok(Token::string(value, line, column));
            } else if (c as u32) <= 0x1F {
                return Err(LexError::ControlCharacter {
                    position: Self::position(self),
                });
            } else {
                flush_pending_surrogate(&mut value, &mut pending_surrogate);
                value.push(c);
            }
        }
    }

    /// Reads the four hex digits of a `\u` escape into one UTF-16 code unit
    fn read_utf16_unit(&mut self) -> Result<u16, LexError> {
        let mut unit: u16 = 0;
        for _ in 0..4 {
            let c = self.next_char()?.ok_or_else(|| LexError::UnexpectedEndOfInput {
                position: Self::position(self),
            })?;
            let digit = c.to_digit(16).ok_or_else(|| LexError::InvalidUnicodeEscape {
                character: c,
                position: Self::position(self),
            })?;
            unit = (unit << 4) | digit as u16;
        }
        Ok(unit)
    }

    /// Scans a numeric literal; `first` is its already-consumed first
    /// character (`-` or a digit) and `line`/`column` locate it
    ///
    /// Literal shape decides the payload: with neither fraction nor exponent
    /// the literal parses as `i64` (overflow is a lexical error, never
    /// widened to float), otherwise as `f64`.
    fn scan_number(&mut self, first: char, line: usize, column: usize) -> Result<Token, LexError> {
        let mut literal = String::new();
        let mut is_float = false;

        let first_digit = if first == '-' {
            literal.push('-');
            None
        } else {
            Some(first)
        };
        self.scan_digits(&mut literal, first_digit)?;

        if let Some(c) = self.next_char()? {
            if c == '.' {
                is_float = true;
                literal.push('.');
                self.scan_digits(&mut literal, None)?;
            } else {
                self.push_back(c);
            }
        }

        if let Some(c) = self.next_char()? {
            if c == 'e' || c == 'E' {
                is_float = true;
                literal.push(c);
                if let Some(sign) = self.next_char()? {
                    if sign == '+' || sign == '-' {
                        literal.push(sign);
                    } else {
                        self.push_back(sign);
                    }
                }
                self.scan_digits(&mut literal, None)?;
            } else {
                self.push_back(c);
            }
        }

        let position = Position::new(line, column);
        if is_float {
            let value = literal.parse::<f64>().map_err(|_| LexError::InvalidNumber {
                literal: literal.clone(),
                position,
            })?;
            Ok(Token::float(value, line, column))
        } else {
            let value = literal.parse::<i64>().map_err(|_| LexError::InvalidNumber {
                literal: literal.clone(),
                position,
            })?;
            Ok(Token::integer(value, line, column))
        }
    }

    /// Greedily accumulates one digit run, requiring at least one digit
    ///
    /// `first` carries a digit the caller already consumed, if any. The
    /// character that terminates the run goes to the pushback slot; end of
    /// input terminates the run normally.
    fn scan_digits(&mut self, literal: &mut String, first: Option<char>) -> Result<(), LexError> {
        let mut count = 0;
        if let Some(c) = first {
            debug_assert!(c.is_ascii_digit());
            literal.push(c);
            count += 1;
        }
        loop {
            match self.next_char()? {
                Some(c) if c.is_ascii_digit() => {
                    literal.push(c);
                    count += 1;
                }
                Some(c) => {
                    self.push_back(c);
                    break;
                }
                None => break,
            }
        }
        if count == 0 {
            return Err(LexError::ExpectedDigits {
                position: Self::position(self),
            });
        }
        Ok(())
    }
}

impl<R: Read> Iterator for Tokenizer<R> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

/// Appends one UTF-16 code unit from a `\u` escape to the string under
/// construction, combining consecutive high/low surrogate pairs
///
/// The source grammar accepts any code unit value without validating
/// surrogate pairing. Rust strings enforce well-formed UTF-8, so an unpaired
/// surrogate becomes U+FFFD REPLACEMENT CHARACTER instead of passing through.
fn push_utf16_unit(value: &mut String, pending: &mut Option<u16>, unit: u16) {
    if let Some(high) = pending.take() {
        if (0xDC00..=0xDFFF).contains(&unit) {
            let combined = 0x10000 + (((high as u32) - 0xD800) << 10) + ((unit as u32) - 0xDC00);
            value.push(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
            return;
        }
        value.push(char::REPLACEMENT_CHARACTER);
    }
    match unit {
        0xD800..=0xDBFF => *pending = Some(unit),
        0xDC00..=0xDFFF => value.push(char::REPLACEMENT_CHARACTER),
        _ => value.push(char::from_u32(unit as u32).unwrap_or(char::REPLACEMENT_CHARACTER)),
    }
}

/// Flushes a high surrogate that never got its low half
fn flush_pending_surrogate(value: &mut String, pending: &mut Option<u16>) {
    if pending.take().is_some() {
        value.push(char::REPLACEMENT_CHARACTER);
    }
}
