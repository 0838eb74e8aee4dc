//! Reads the constructor text written by [Expr::srepr] back into an expression tree.

use core::str::FromStr;

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::{Number, error::ReadError, number::Float};

use super::{Constant, Expr, Function};

/// The deepest nesting of constructors the reader accepts.
pub const MAX_DEPTH: usize = 512;

/// Converts constructor text into an [Expr]. Used to implement `FromStr` for `Expr`.
pub struct Reader<'a> {
    pub text: &'a str,
    pub index: usize,
}

impl<'a> Reader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, index: 0 }
    }

    pub fn read(&mut self) -> Result<Expr, ReadError> {
        let result = self.read_expr(0)?;

        // Leftover text is an error
        self.skip_whitespace();
        if self.eoi() {
            Ok(result)
        } else {
            Err(ReadError::UnexpectedTokensAtEnd(self.index))
        }
    }

    fn current(&self) -> Option<char> {
        self.text[self.index..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.current() {
            self.index += c.len_utf8();
        }
    }

    fn eoi(&self) -> bool {
        self.index >= self.text.len()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    /// Skips whitespace, then consumes `expected` or fails.
    fn expect(&mut self, expected: char) -> Result<(), ReadError> {
        self.skip_whitespace();
        match self.current() {
            Some(c) if c == expected => {
                self.advance();
                Ok(())
            }
            Some(found) => Err(ReadError::UnexpectedChar { found, offset: self.index }),
            None => Err(ReadError::UnexpectedEnd),
        }
    }

    /// Consumes a run of characters matching `pred` and returns it, which may be empty.
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let text = self.text;
        let start = self.index;
        while matches!(self.current(), Some(c) if pred(c)) {
            self.advance();
        }
        &text[start..self.index]
    }

    fn read_identifier(&mut self) -> Result<&'a str, ReadError> {
        self.skip_whitespace();
        let ident = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
        if !ident.is_empty() {
            Ok(ident)
        } else {
            match self.current() {
                Some(found) => Err(ReadError::UnexpectedChar { found, offset: self.index }),
                None => Err(ReadError::UnexpectedEnd),
            }
        }
    }

    fn read_integer(&mut self) -> Result<BigInt, ReadError> {
        self.skip_whitespace();
        let offset = self.index;
        let sign = if self.current() == Some('-') {
            self.advance();
            "-"
        } else {
            ""
        };
        let digits = self.take_while(|c| c.is_ascii_digit());

        format!("{}{}", sign, digits).parse()
            .map_err(|_| ReadError::InvalidLiteral { text: format!("{}{}", sign, digits), offset })
    }

    /// Reads a single-quoted string, where `\` escapes the next character.
    fn read_quoted(&mut self) -> Result<String, ReadError> {
        self.expect('\'')?;
        let mut result = String::new();
        loop {
            match self.current() {
                Some('\'') => {
                    self.advance();
                    return Ok(result)
                }
                Some('\\') => {
                    self.advance();
                    result.push(self.current().ok_or(ReadError::UnexpectedEnd)?);
                    self.advance();
                }
                Some(c) => {
                    result.push(c);
                    self.advance();
                }
                None => return Err(ReadError::UnexpectedEnd),
            }
        }
    }

    fn read_expr(&mut self, depth: usize) -> Result<Expr, ReadError> {
        if depth >= MAX_DEPTH {
            return Err(ReadError::DepthExceeded(MAX_DEPTH))
        }

        let offset = self.index;
        let name = self.read_identifier()?;

        Ok(match name {
            "pi" => Expr::Constant(Constant::Pi),
            "E" => Expr::Constant(Constant::E),

            "Integer" => {
                self.expect('(')?;
                let i = self.read_integer()?;
                self.expect(')')?;
                Expr::Number(Number::Integer(i))
            }

            "Rational" => {
                self.expect('(')?;
                let numer = self.read_integer()?;
                self.expect(',')?;
                let denom = self.read_integer()?;
                self.expect(')')?;
                Expr::Number(Number::Rational(numer, denom))
            }

            "Float" => {
                self.expect('(')?;
                let text = self.read_quoted()?;
                self.expect(',')?;
                let keyword_offset = self.index;
                if self.read_identifier()? != "precision" {
                    return Err(ReadError::InvalidLiteral { text: text.clone(), offset: keyword_offset })
                }
                self.expect('=')?;
                let precision = self.read_integer()?;
                self.expect(')')?;

                let invalid = || ReadError::InvalidLiteral { text: text.clone(), offset };
                let precision = precision.to_u32().ok_or_else(invalid)?;
                let float = Float::parse(&text, precision)
                    .and_then(Result::ok)
                    .ok_or_else(invalid)?;
                Expr::Number(Number::Float(float))
            }

            "Symbol" => {
                self.expect('(')?;
                let name = self.read_quoted()?;
                self.expect(')')?;
                Expr::Symbol(name)
            }

            _ => {
                let function = Function::from_name(name)
                    .ok_or_else(|| ReadError::UnknownConstructor { name: name.to_string(), offset })?;

                self.expect('(')?;
                let mut args = vec![];
                self.skip_whitespace();
                if self.current() == Some(')') {
                    self.advance();
                } else {
                    loop {
                        args.push(self.read_expr(depth + 1)?);
                        self.skip_whitespace();
                        match self.current() {
                            Some(',') => self.advance(),
                            Some(')') => {
                                self.advance();
                                break;
                            }
                            Some(found) => return Err(ReadError::UnexpectedChar { found, offset: self.index }),
                            None => return Err(ReadError::UnexpectedEnd),
                        }
                    }
                }

                Expr::Apply(function, args)
            }
        })
    }
}

impl FromStr for Expr {
    type Err = ReadError;

    /// Reads constructor text and checks that the resulting tree is well-formed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let expr = Reader::new(s).read()?;
        expr.validate()?;
        Ok(expr)
    }
}
