//! Recursive-descent evaluator for the calculator grammar.
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/' | '%') unary)*
//! unary  := ('+' | '-')? number
//! ```
//!
//! All binary operators are left-associative. The parser evaluates as it
//! goes; no tree is kept.

use super::error::CalcError;
use super::lexer::{Lexeme, Spanned};

pub struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    source_len: usize,
}

impl<'a> Parser<'a> {
    /// `source_len` is used as the error position when input runs out.
    pub fn new(tokens: &'a [Spanned], source_len: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            source_len,
        }
    }

    /// Evaluate the whole token stream.
    pub fn evaluate(mut self) -> Result<f64, CalcError> {
        let value = self.expr()?;

        match self.peek() {
            Some(token) => Err(CalcError::syntax(token.pos)),
            None => Ok(value),
        }
    }

    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn peek_lexeme(&self) -> Option<Lexeme> {
        self.peek().map(|t| t.lexeme)
    }

    fn next(&mut self) -> Option<Spanned> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;

        while let Some(lexeme) = self.peek_lexeme() {
            match lexeme {
                Lexeme::Plus => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Lexeme::Minus => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }

        Ok(value)
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.unary()?;

        while let Some(lexeme) = self.peek_lexeme() {
            match lexeme {
                Lexeme::Star => {
                    self.pos += 1;
                    value *= self.unary()?;
                }
                Lexeme::Slash => {
                    self.pos += 1;
                    value /= self.unary()?;
                }
                Lexeme::Percent => {
                    self.pos += 1;
                    // Truncated remainder: the sign follows the dividend.
                    value %= self.unary()?;
                }
                _ => break,
            }
        }

        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, CalcError> {
        let negate = match self.peek_lexeme() {
            Some(Lexeme::Minus) => {
                self.pos += 1;
                true
            }
            Some(Lexeme::Plus) => {
                self.pos += 1;
                false
            }
            _ => false,
        };

        let value = self.number()?;
        Ok(if negate { -value } else { value })
    }

    fn number(&mut self) -> Result<f64, CalcError> {
        match self.next() {
            Some(Spanned {
                lexeme: Lexeme::Number(n),
                ..
            }) => Ok(n),
            Some(token) => Err(CalcError::syntax(token.pos)),
            None => Err(CalcError::syntax(self.source_len)),
        }
    }
}
