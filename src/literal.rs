//! Relaxed object-literal parsing for embedded js/html configs.
//!
//! The grammar accepts what a hand-written config literal contains: unquoted
//! identifier keys, single- and double-quoted strings, numbers, `true`,
//! `false`, `null`, nested objects and arrays, and trailing commas. It is a
//! data-only grammar — anything executable (function calls, bare
//! identifiers, expressions) is rejected, and the literal is never evaluated.

use serde_json::{Map, Number, Value};

use crate::error::EnvServeError;

/// Parse a brace-delimited object literal into a config mapping.
///
/// The entire input must be consumed; anything after the closing brace other
/// than whitespace is an error.
pub fn parse_object_literal(src: &str) -> Result<Map<String, Value>, EnvServeError> {
    let mut parser = Parser { src, pos: 0 };
    parser.skip_whitespace();
    let map = parser.parse_object()?;
    parser.skip_whitespace();
    if parser.peek().is_some() {
        return Err(parser.error("trailing characters after object literal"));
    }
    Ok(map)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), EnvServeError> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected '{expected}', found '{c}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of input"))),
        }
    }

    fn error(&self, reason: impl std::fmt::Display) -> EnvServeError {
        EnvServeError::ConfigFormat {
            reason: format!("{reason} (offset {})", self.pos),
        }
    }

    fn parse_object(&mut self) -> Result<Map<String, Value>, EnvServeError> {
        self.skip_whitespace();
        self.expect('{')?;
        let mut map = Map::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('}') => {
                    self.bump();
                    return Ok(map);
                }
                None => return Err(self.error("unterminated object")),
                _ => {}
            }
            let key = self.parse_key()?;
            self.skip_whitespace();
            self.expect(':')?;
            let value = self.parse_value()?;
            // Duplicate keys resolve to the last occurrence.
            map.insert(key, value);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {
                    self.bump();
                    return Ok(map);
                }
                Some(c) => return Err(self.error(format!("expected ',' or '}}', found '{c}'"))),
                None => return Err(self.error("unterminated object")),
            }
        }
    }

    fn parse_key(&mut self) -> Result<String, EnvServeError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => self.parse_string(quote),
            Some(c) if is_ident_start(c) => Ok(self.parse_identifier()),
            Some(c) => Err(self.error(format!("expected an object key, found '{c}'"))),
            None => Err(self.error("unterminated object")),
        }
    }

    fn parse_value(&mut self) -> Result<Value, EnvServeError> {
        self.skip_whitespace();
        match self.peek() {
            Some('{') => Ok(Value::Object(self.parse_object()?)),
            Some('[') => self.parse_array(),
            Some(quote @ ('"' | '\'')) => Ok(Value::String(self.parse_string(quote)?)),
            Some(c) if c == '-' || c == '+' || c.is_ascii_digit() => self.parse_number(),
            Some(c) if is_ident_start(c) => self.parse_word(),
            Some(c) => Err(self.error(format!("unexpected character '{c}'"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_array(&mut self) -> Result<Value, EnvServeError> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(']') => {
                    self.bump();
                    return Ok(Value::Array(items));
                }
                None => return Err(self.error("unterminated array")),
                _ => {}
            }
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(']') => {
                    self.bump();
                    return Ok(Value::Array(items));
                }
                Some(c) => return Err(self.error(format!("expected ',' or ']', found '{c}'"))),
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    /// Parse a string delimited by `quote` (the opening quote is still pending).
    fn parse_string(&mut self, quote: char) -> Result<String, EnvServeError> {
        self.expect(quote)?;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(out),
                Some('\\') => {
                    let Some(escaped) = self.bump() else {
                        return Err(self.error("unterminated string"));
                    };
                    match escaped {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        'b' => out.push('\u{0008}'),
                        'f' => out.push('\u{000C}'),
                        '0' => out.push('\0'),
                        'u' => out.push(self.parse_unicode_escape()?),
                        // JS resolves unknown escapes to the escaped character itself.
                        other => out.push(other),
                    }
                }
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn parse_unicode_escape(&mut self) -> Result<char, EnvServeError> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error("invalid unicode escape"))?;
            code = code * 16 + digit;
        }
        char::from_u32(code).ok_or_else(|| self.error("invalid unicode escape"))
    }

    fn parse_number(&mut self) -> Result<Value, EnvServeError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        {
            self.bump();
        }
        let token = &self.src[start..self.pos];
        let number = if token.contains(['.', 'e', 'E']) {
            parse_float(token).ok_or_else(|| self.error(format!("invalid number '{token}'")))?
        } else {
            match token.parse::<i64>() {
                Ok(i) => Number::from(i),
                // Integers beyond i64 fall back to float, like JSON.parse would.
                Err(_) => parse_float(token)
                    .ok_or_else(|| self.error(format!("invalid number '{token}'")))?,
            }
        };
        Ok(Value::Number(number))
    }

    fn parse_word(&mut self) -> Result<Value, EnvServeError> {
        let word = self.parse_identifier();
        match word.as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "null" => Ok(Value::Null),
            other => Err(self.error(format!(
                "'{other}' is not a literal value — only true, false, and null are accepted as bare words"
            ))),
        }
    }

    fn parse_identifier(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_continue) {
            self.bump();
        }
        self.src[start..self.pos].to_string()
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_numeric()
}

fn parse_float(token: &str) -> Option<Number> {
    token.parse::<f64>().ok().and_then(Number::from_f64)
}
