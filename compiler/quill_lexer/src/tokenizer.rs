//! On-demand tokenizer for tag arguments and output expressions.
//!
//! Tags pull from a `Tokenizer` in the order their own grammar dictates
//! (`for` reads an identifier, the word `in`, a value, then a hash), so
//! there is no fixed argument grammar here. All spans are absolute source
//! offsets: the tokenizer is created with the offset of its input slice.

use std::rc::Rc;

use quill_ir::{Expr, HashArgs, HashEntry, Literal, PathSegment, Span, ValueToken, VariablePath};

use crate::lex_error::{LexError, LexErrorKind};

/// Comparison operators, longest first so `<=` wins over `<`.
const OPERATORS: [&str; 7] = ["==", "!=", "<>", "<=", ">=", "<", ">"];

/// Cursor over an argument string.
#[derive(Clone, Debug)]
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
    base: u32,
}

impl<'a> Tokenizer<'a> {
    /// Tokenize `src`, which starts at absolute offset `base`.
    pub fn new(src: &'a str, base: u32) -> Self {
        Tokenizer { src, pos: 0, base }
    }

    /// Current position within the input slice.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Unconsumed input.
    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Whether only whitespace is left.
    pub fn end(&self) -> bool {
        self.remaining().trim_start().is_empty()
    }

    pub fn skip_blank(&mut self) {
        let rest = self.remaining();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Absolute span of `start..self.pos`.
    pub fn span_from(&self, start: usize) -> Span {
        Span::from_range(start..self.pos).offset_by(self.base)
    }

    /// Absolute span of the unconsumed input.
    pub fn remaining_span(&self) -> Span {
        Span::from_range(self.pos..self.src.len()).offset_by(self.base)
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    fn error(&self, kind: LexErrorKind, start: usize) -> LexError {
        LexError::new(kind, self.span_from(start))
    }

    /// Skip blanks, then consume `text` if it comes next.
    pub fn consume(&mut self, text: &str) -> bool {
        self.skip_blank();
        if self.remaining().starts_with(text) {
            self.pos += text.len();
            true
        } else {
            false
        }
    }

    /// Skip blanks, then consume `word` if it comes next as a whole identifier.
    pub fn consume_word(&mut self, word: &str) -> bool {
        let saved = self.pos;
        match self.read_identifier() {
            Some(found) if found == word => true,
            _ => {
                self.pos = saved;
                false
            }
        }
    }

    /// Read an identifier: a letter or `_`, then letters, digits, `_` or `-`.
    ///
    /// Leaves the position unchanged (apart from blanks) when none follows.
    pub fn read_identifier(&mut self) -> Option<&'a str> {
        self.skip_blank();
        let rest = self.remaining();
        let first = rest.chars().next()?;
        if !(first.is_ascii_alphabetic() || first == '_') {
            return None;
        }
        let len = rest
            .find(|c: char| !is_identifier_char(c))
            .unwrap_or(rest.len());
        self.pos += len;
        Some(&rest[..len])
    }

    /// Read a comparison operator, including the word `contains`.
    pub fn read_operator(&mut self) -> Option<&'static str> {
        self.skip_blank();
        if let Some(op) = OPERATORS
            .iter()
            .find(|op| self.remaining().starts_with(**op))
        {
            self.pos += op.len();
            return Some(*op);
        }
        self.consume_word("contains").then_some("contains")
    }

    /// Read a value expression.
    ///
    /// Returns `Ok(None)` when no value starts here. A value that starts but
    /// is malformed (an unterminated string, a `.` with no name after it) is
    /// an error.
    pub fn read_value(&mut self) -> Result<Option<ValueToken>, LexError> {
        self.skip_blank();
        let start = self.pos;
        let Some(expr) = self.read_expr()? else {
            return Ok(None);
        };
        let text = &self.src[start..self.pos];
        Ok(Some(ValueToken::new(expr, text, self.span_from(start))))
    }

    fn read_expr(&mut self) -> Result<Option<Expr>, LexError> {
        let start = self.pos;
        let Some(c) = self.peek() else {
            return Ok(None);
        };
        match c {
            '(' => self.read_range(start).map(Some),
            '"' | '\'' => self.read_string(c, start).map(Some),
            '0'..='9' => self.read_number(start).map(Some),
            '-' if self.peek_at(1).is_some_and(|d| d.is_ascii_digit()) => {
                self.read_number(start).map(Some)
            }
            c if c.is_ascii_alphabetic() || c == '_' => self.read_path(start).map(Some),
            _ => Ok(None),
        }
    }

    fn read_range(&mut self, start: usize) -> Result<Expr, LexError> {
        self.pos += 1;
        self.skip_blank();
        let low = self.read_expr()?;
        if !self.consume("..") {
            return Err(self.error(LexErrorKind::UnterminatedRange, start));
        }
        self.skip_blank();
        let high = self.read_expr()?;
        let (Some(low), Some(high)) = (low, high) else {
            return Err(self.error(LexErrorKind::ExpectedValue, start));
        };
        if !self.consume(")") {
            return Err(self.error(LexErrorKind::UnterminatedRange, start));
        }
        Ok(Expr::Range(Box::new(low), Box::new(high)))
    }

    fn read_string(&mut self, quote: char, start: usize) -> Result<Expr, LexError> {
        let body = &self.remaining()[1..];
        let Some(len) = body.find(quote) else {
            self.pos = self.src.len();
            return Err(self.error(LexErrorKind::UnterminatedString, start));
        };
        self.pos += len + 2;
        Ok(Expr::Literal(Literal::Str(Rc::from(&body[..len]))))
    }

    fn read_number(&mut self, start: usize) -> Result<Expr, LexError> {
        let bytes = self.src.as_bytes();
        let mut end = self.pos;
        if bytes.get(end) == Some(&b'-') {
            end += 1;
        }
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        // `1..5` is a range bound, not a float
        let is_float = bytes.get(end) == Some(&b'.')
            && bytes.get(end + 1).is_some_and(u8::is_ascii_digit);
        if is_float {
            end += 1;
            while bytes.get(end).is_some_and(u8::is_ascii_digit) {
                end += 1;
            }
        }
        self.pos = end;
        let text = &self.src[start..end];
        let invalid = || self.error(LexErrorKind::InvalidNumber { text: text.to_owned() }, start);
        if is_float {
            text.parse::<f64>()
                .map(|x| Expr::Literal(Literal::Float(x)))
                .map_err(|_| invalid())
        } else {
            text.parse::<i64>()
                .map(|n| Expr::Literal(Literal::Int(n)))
                .map_err(|_| invalid())
        }
    }

    fn read_path(&mut self, start: usize) -> Result<Expr, LexError> {
        let Some(root) = self.read_identifier() else {
            return Err(self.error(LexErrorKind::ExpectedValue, start));
        };
        let mut segments = Vec::new();
        loop {
            match self.peek() {
                Some('.') if self.peek_at(1) != Some('.') => {
                    self.pos += 1;
                    if !self.peek().is_some_and(is_identifier_char) {
                        return Err(self.error(LexErrorKind::ExpectedProperty, start));
                    }
                    let rest = self.remaining();
                    let len = rest
                        .find(|c: char| !is_identifier_char(c))
                        .unwrap_or(rest.len());
                    self.pos += len;
                    segments.push(PathSegment::Name(rest[..len].to_owned()));
                }
                Some('[') => {
                    self.pos += 1;
                    self.skip_blank();
                    let Some(index) = self.read_expr()? else {
                        return Err(self.error(LexErrorKind::ExpectedValue, start));
                    };
                    if !self.consume("]") {
                        return Err(self.error(LexErrorKind::ExpectedCloseBracket, start));
                    }
                    segments.push(PathSegment::Index(index));
                }
                _ => break,
            }
        }

        if segments.is_empty() {
            let literal = match root {
                "nil" | "null" => Some(Literal::Nil),
                "true" => Some(Literal::Bool(true)),
                "false" => Some(Literal::Bool(false)),
                _ => None,
            };
            if let Some(literal) = literal {
                return Ok(Expr::Literal(literal));
            }
        }
        Ok(Expr::Path(VariablePath {
            root: root.to_owned(),
            segments,
        }))
    }

    /// Read `key<sep> value` entries until the input ends.
    ///
    /// A key without a separator is a flag whose value is `true` when
    /// rendered. Entries may be separated by blanks or commas.
    pub fn read_hash(&mut self, separator: char) -> Result<HashArgs, LexError> {
        let mut entries = Vec::new();
        loop {
            self.skip_blank();
            if self.end() {
                break;
            }
            let start = self.pos;
            let Some(key) = self.read_identifier() else {
                let found = self.peek().unwrap_or(' ');
                return Err(self.error(LexErrorKind::UnexpectedCharacter { found }, start));
            };
            let key = key.to_owned();
            self.skip_blank();
            let value = if self.peek() == Some(separator) {
                self.pos += separator.len_utf8();
                match self.read_value()? {
                    Some(value) => Some(value),
                    None => return Err(self.error(LexErrorKind::ExpectedValue, start)),
                }
            } else {
                None
            };
            entries.push(HashEntry {
                key,
                value,
                span: self.span_from(start),
            });
            self.consume(",");
        }
        Ok(HashArgs::new(entries))
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

#[cfg(test)]
mod tests;
