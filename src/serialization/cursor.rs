//! Shared recursive-descent cursor — parsers are recursive-descent
//! with a shared character-stream cursor that tracks position and a
//! whitespace skipper.

use chrono::{DateTime, Utc};

use crate::errors::{Result, TemporalError};

pub struct Cursor<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Cursor {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// The unconsumed tail of the input, for lookahead without advancing.
    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Consumes `lit` (case-insensitively), surrounding whitespace
    /// skipped first. Fails without advancing if not present.
    pub fn expect_ci(&mut self, lit: &str) -> Result<()> {
        self.skip_whitespace();
        let end = self.pos + lit.len();
        if end <= self.bytes.len() && self.input[self.pos..end].eq_ignore_ascii_case(lit) {
            self.pos = end;
            Ok(())
        } else {
            Err(TemporalError::parse(self.pos, format!("'{lit}'")))
        }
    }

    /// Consumes a single expected character, surrounding whitespace
    /// skipped first.
    pub fn expect_char(&mut self, c: char) -> Result<()> {
        self.skip_whitespace();
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            Ok(())
        } else {
            Err(TemporalError::parse(self.pos, format!("'{c}'")))
        }
    }

    /// Consumes one of `options`, returning which one matched.
    pub fn expect_one_of(&mut self, options: &[char]) -> Result<char> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if options.contains(&c) => {
                self.pos += c.len_utf8();
                Ok(c)
            }
            _ => Err(TemporalError::parse(
                self.pos,
                format!("one of {options:?}"),
            )),
        }
    }

    pub fn try_expect_ci(&mut self, lit: &str) -> bool {
        let save = self.pos;
        if self.expect_ci(lit).is_ok() {
            true
        } else {
            self.pos = save;
            false
        }
    }

    /// A run of characters matching `pred`, stopping at the first that
    /// doesn't (or at end of input). Does not skip leading whitespace.
    pub fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if pred(c) {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        &self.input[start..self.pos]
    }

    pub fn parse_i64(&mut self) -> Result<i64> {
        self.skip_whitespace();
        let start = self.pos;
        if self.peek() == Some('-') || self.peek() == Some('+') {
            self.pos += 1;
        }
        self.take_while(|c| c.is_ascii_digit());
        self.input[start..self.pos]
            .parse()
            .map_err(|_| TemporalError::parse(start, "an integer"))
    }

    pub fn parse_f64(&mut self) -> Result<f64> {
        self.skip_whitespace();
        let start = self.pos;
        if self.peek() == Some('-') || self.peek() == Some('+') {
            self.pos += 1;
        }
        self.take_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') {
            self.pos += 1;
            self.take_while(|c| c.is_ascii_digit());
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            self.pos += 1;
            if self.peek() == Some('-') || self.peek() == Some('+') {
                self.pos += 1;
            }
            self.take_while(|c| c.is_ascii_digit());
        }
        self.input[start..self.pos]
            .parse()
            .map_err(|_| TemporalError::parse(start, "a number"))
    }

    /// RFC-3339-ish timestamp: stops at the next structural delimiter
    /// (`,`, `]`, `)`, `}`, `@`, or end of input).
    pub fn parse_timestamp(&mut self) -> Result<DateTime<Utc>> {
        self.skip_whitespace();
        let start = self.pos;
        let text = self.take_while(|c| !matches!(c, ',' | ']' | ')' | '}' | '@'));
        let trimmed = text.trim();
        DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| TemporalError::parse(start, "an RFC 3339 timestamp"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_and_literals() {
        let mut c = Cursor::new("  [ 42 , -3.5 ] ");
        c.expect_char('[').unwrap();
        assert_eq!(c.parse_i64().unwrap(), 42);
        c.expect_char(',').unwrap();
        assert_eq!(c.parse_f64().unwrap(), -3.5);
        c.expect_char(']').unwrap();
    }

    #[test]
    fn expect_ci_is_case_insensitive() {
        let mut c = Cursor::new("CBUFFER(1 2,3)");
        c.expect_ci("cbuffer").unwrap();
    }

    #[test]
    fn parse_timestamp_stops_at_delimiter() {
        let mut c = Cursor::new("2024-01-01T00:00:00Z,2024-01-02T00:00:00Z");
        let t1 = c.parse_timestamp().unwrap();
        c.expect_char(',').unwrap();
        let t2 = c.parse_timestamp().unwrap();
        assert!(t1 < t2);
    }
}
