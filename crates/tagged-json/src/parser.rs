//! JSON text → [`Value`] parser.
//!
//! A single-pass recursive-descent parser over an in-memory buffer. The only
//! state is a byte cursor that moves forward; the parser looks at most one
//! byte ahead and never backtracks. The first error aborts the parse and no
//! partial value is returned.
//!
//! # Known limitations
//!
//! - `\uXXXX` escapes are recognized but the four bytes after `\u` are skipped
//!   without being decoded, so the code point is dropped from the result.
//! - Parsing stops after the first complete value. Bytes after it are not
//!   inspected; use [`Parser::position`] to detect them.
//! - Nesting depth is not limited. Each array or object level costs one
//!   recursive call while parsing and again when the tree is dropped, so
//!   input nested hundreds of thousands of levels deep overflows the thread's
//!   stack and aborts the process. Callers handling untrusted input should
//!   bound its size or run the parse on a thread with a larger stack.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{JsonError, Result};
use crate::value::{Map, Value};

/// Parse a JSON document held in memory.
///
/// Recursion depth follows the nesting depth of `text`; see the module-level
/// notes on deeply nested input.
pub fn parse(text: &str) -> Result<Value> {
    Parser::new(text).parse()
}

/// Read `source` line by line, concatenating the lines without their
/// terminators, then parse the result.
///
/// Dropping line breaks is harmless for well-formed JSON because string
/// literals cannot contain raw newlines.
///
/// A failed read is [`JsonError::SourceUnavailable`]. Bytes that were read
/// but are not valid UTF-8 are a [`JsonError::Syntax`] error whose offset
/// points into the joined text.
pub fn parse_reader<R: BufRead>(source: R) -> Result<Value> {
    let bytes =
        read_lines(source).map_err(|source| JsonError::SourceUnavailable { source, path: None })?;
    parse_bytes(bytes)
}

/// Open `path` and parse its contents with [`parse_reader`] semantics.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let unavailable = |source| JsonError::SourceUnavailable {
        source,
        path: Some(path.to_path_buf()),
    };
    let file = File::open(path).map_err(unavailable)?;
    let bytes = read_lines(BufReader::new(file)).map_err(unavailable)?;
    parse_bytes(bytes)
}

/// Concatenate the lines of `source`, dropping `\n` and `\r\n` terminators.
fn read_lines<R: BufRead>(source: R) -> io::Result<Vec<u8>> {
    let mut text = Vec::new();
    for line in source.split(b'\n') {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        text.extend_from_slice(&line);
    }
    Ok(text)
}

fn parse_bytes(bytes: Vec<u8>) -> Result<Value> {
    let text = String::from_utf8(bytes).map_err(|err| {
        JsonError::syntax(err.utf8_error().valid_up_to(), "invalid utf-8 in input")
    })?;
    parse(&text)
}

/// Forward-only byte cursor over the input.
#[derive(Debug, Clone)]
struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n') = self.peek() {
            self.pos += 1;
        }
    }

    /// Skip whitespace and peek at the next token byte.
    fn peek_token(&mut self) -> Option<u8> {
        self.skip_whitespace();
        self.peek()
    }

    fn remaining(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    fn end_error(&self) -> JsonError {
        JsonError::UnexpectedEnd { offset: self.pos }
    }

    fn syntax_error(&self, message: &str) -> JsonError {
        JsonError::syntax(self.pos, message)
    }
}

/// Recursive-descent parser. Most callers want [`parse`]; the struct is
/// public so the end position of the parsed value can be inspected.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str) -> Self {
        Parser {
            cursor: Cursor::new(text),
        }
    }

    /// Byte offset just past the last consumed byte.
    pub fn position(&self) -> usize {
        self.cursor.pos
    }

    /// Parse one value starting at the current position.
    pub fn parse(&mut self) -> Result<Value> {
        self.parse_value()
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.cursor.peek_token() {
            None => Err(self.cursor.end_error()),
            Some(b'n') => self.parse_literal("null", Value::Null),
            Some(b't') => self.parse_literal("true", Value::Bool(true)),
            Some(b'f') => self.parse_literal("false", Value::Bool(false)),
            Some(b'"') => {
                self.cursor.bump();
                self.parse_string().map(Value::String)
            }
            Some(b'[') => {
                self.cursor.bump();
                self.parse_array()
            }
            Some(b'{') => {
                self.cursor.bump();
                self.parse_object()
            }
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(_) => Err(self.cursor.syntax_error("unexpected character")),
        }
    }

    /// A keyword that does not match exactly (including a truncated one such
    /// as `tru`) is a syntax error.
    fn parse_literal(&mut self, word: &str, value: Value) -> Result<Value> {
        if self.cursor.remaining().starts_with(word.as_bytes()) {
            self.cursor.pos += word.len();
            Ok(value)
        } else {
            Err(self.cursor.syntax_error("unexpected character"))
        }
    }

    /// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
    fn parse_number(&mut self) -> Result<Value> {
        let start = self.cursor.pos;
        let mut is_double = false;

        if self.cursor.peek() == Some(b'-') {
            self.cursor.bump();
        }

        match self.cursor.peek() {
            Some(b'0') => {
                self.cursor.bump();
            }
            Some(b'1'..=b'9') => self.skip_digits(),
            Some(_) => return Err(self.cursor.syntax_error("expected digit")),
            None => return Err(self.cursor.end_error()),
        }

        if self.cursor.peek() == Some(b'.') {
            self.cursor.bump();
            is_double = true;
            self.expect_digits()?;
        }

        if let Some(b'e' | b'E') = self.cursor.peek() {
            self.cursor.bump();
            is_double = true;
            if let Some(b'+' | b'-') = self.cursor.peek() {
                self.cursor.bump();
            }
            self.expect_digits()?;
        }

        let bytes = &self.cursor.input[start..self.cursor.pos];
        // Only ASCII digits, signs, '.', 'e' and 'E' were consumed.
        let token = std::str::from_utf8(bytes)
            .map_err(|_| JsonError::syntax(start, "invalid number"))?;

        if is_double {
            token
                .parse::<f64>()
                .map(Value::Double)
                .map_err(|_| JsonError::syntax(start, "invalid number"))
        } else {
            token
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| JsonError::syntax(start, "integer out of range"))
        }
    }

    fn skip_digits(&mut self) {
        while let Some(b'0'..=b'9') = self.cursor.peek() {
            self.cursor.bump();
        }
    }

    /// One or more digits.
    fn expect_digits(&mut self) -> Result<()> {
        match self.cursor.peek() {
            Some(b'0'..=b'9') => {
                self.skip_digits();
                Ok(())
            }
            Some(_) => Err(self.cursor.syntax_error("expected digit")),
            None => Err(self.cursor.end_error()),
        }
    }

    /// Called with the cursor just past the opening quote.
    fn parse_string(&mut self) -> Result<String> {
        let start = self.cursor.pos;
        let mut buf = Vec::new();

        loop {
            let byte = self.cursor.bump().ok_or_else(|| self.cursor.end_error())?;
            match byte {
                b'"' => break,
                b'\\' => {
                    let escape = self.cursor.bump().ok_or_else(|| self.cursor.end_error())?;
                    match escape {
                        b'"' => buf.push(b'"'),
                        b'\\' => buf.push(b'\\'),
                        b'/' => buf.push(b'/'),
                        b'b' => buf.push(0x08),
                        b'f' => buf.push(0x0c),
                        b'n' => buf.push(b'\n'),
                        b'r' => buf.push(b'\r'),
                        b't' => buf.push(b'\t'),
                        b'u' => {
                            // Four hex digits follow; they are skipped, not decoded.
                            if self.cursor.remaining().len() < 4 {
                                self.cursor.pos = self.cursor.input.len();
                                return Err(self.cursor.end_error());
                            }
                            self.cursor.pos += 4;
                        }
                        _ => {
                            self.cursor.pos -= 1;
                            return Err(self.cursor.syntax_error("invalid escape sequence"));
                        }
                    }
                }
                other => buf.push(other),
            }
        }

        String::from_utf8(buf).map_err(|_| JsonError::syntax(start, "invalid utf-8 in string"))
    }

    /// Called with the cursor just past `[`.
    fn parse_array(&mut self) -> Result<Value> {
        let mut items = Vec::new();

        match self.cursor.peek_token() {
            Some(b']') => {
                self.cursor.bump();
                return Ok(Value::Array(items));
            }
            None => return Err(self.cursor.end_error()),
            Some(_) => {}
        }

        loop {
            items.push(self.parse_value()?);
            match self.cursor.peek_token() {
                Some(b',') => {
                    self.cursor.bump();
                }
                Some(b']') => {
                    self.cursor.bump();
                    return Ok(Value::Array(items));
                }
                Some(_) => return Err(self.cursor.syntax_error("expected ',' or ']'")),
                None => return Err(self.cursor.end_error()),
            }
        }
    }

    /// Called with the cursor just past `{`. A repeated key replaces the
    /// earlier entry.
    fn parse_object(&mut self) -> Result<Value> {
        let mut map = Map::new();

        if self.cursor.peek_token() == Some(b'}') {
            self.cursor.bump();
            return Ok(Value::Object(map));
        }

        loop {
            match self.cursor.peek_token() {
                Some(b'"') => {
                    self.cursor.bump();
                }
                Some(_) => return Err(self.cursor.syntax_error("expected string key")),
                None => return Err(self.cursor.end_error()),
            }
            let key = self.parse_string()?;

            match self.cursor.peek_token() {
                Some(b':') => {
                    self.cursor.bump();
                }
                Some(_) => return Err(self.cursor.syntax_error("expected ':'")),
                None => return Err(self.cursor.end_error()),
            }

            let value = self.parse_value()?;
            map.insert(key, value);

            match self.cursor.peek_token() {
                Some(b',') => {
                    self.cursor.bump();
                }
                Some(b'}') => {
                    self.cursor.bump();
                    return Ok(Value::Object(map));
                }
                Some(_) => return Err(self.cursor.syntax_error("expected ',' or '}'")),
                None => return Err(self.cursor.end_error()),
            }
        }
    }
}

impl std::str::FromStr for Value {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}
