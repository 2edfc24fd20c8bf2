//! Error kinds produced while validating or evaluating an expression.

use thiserror::Error;

/// Why an expression could not be turned into a finite number.
///
/// The display never distinguishes between these; they exist for logging
/// and for callers that evaluate expressions directly.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    #[error("expression contains characters outside the arithmetic alphabet")]
    InvalidCharacters,

    #[error("expression cannot start with `*`, `/`, `.` or `%`")]
    BadStart,

    #[error("expression cannot end with an operator or `.`")]
    BadEnd,

    #[error("adjacent operators in expression")]
    BadOperatorSequence,

    #[error("unexpected input at position {pos}")]
    Syntax { pos: usize },

    #[error("result is not a finite number")]
    MathError,
}

impl CalcError {
    pub fn syntax(pos: usize) -> Self {
        Self::Syntax { pos }
    }

    /// Short stable name, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCharacters => "invalid_characters",
            Self::BadStart => "bad_start",
            Self::BadEnd => "bad_end",
            Self::BadOperatorSequence => "bad_operator_sequence",
            Self::Syntax { .. } => "syntax",
            Self::MathError => "math_error",
        }
    }
}
