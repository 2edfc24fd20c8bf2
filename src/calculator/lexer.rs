//! Lexer for calculator expressions using logos.

use logos::Logos;

use super::error::CalcError;

/// A single lexeme of a calculator expression.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
// Same whitespace class as the validator's `\s`, Unicode included.
#[logos(skip r"\s+")]
pub enum Lexeme {
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    // A dot that is not part of a number, e.g. the second dot in `2.5.3`.
    #[token(".")]
    Dot,
}

/// A lexeme together with its byte offset in the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spanned {
    pub lexeme: Lexeme,
    pub pos: usize,
}

/// Tokenize an expression.
///
/// Any character the lexer does not recognise is reported as
/// `InvalidCharacters`.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, CalcError> {
    let mut lexer = Lexeme::lexer(input);
    let mut out = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(lexeme) => out.push(Spanned {
                lexeme,
                pos: lexer.span().start,
            }),
            Err(()) => return Err(CalcError::InvalidCharacters),
        }
    }

    Ok(out)
}
