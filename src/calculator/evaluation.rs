//! Expression evaluation.
//!
//! Runs the shape checks, then the arithmetic parser, then the finiteness
//! check, and formats the result for the display.

use super::error::CalcError;
use super::lexer::tokenize;
use super::parser::Parser;
use super::validation::validate;

/// Result of evaluating a calculator expression.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcResult {
    /// Successful calculation with a finite numeric result.
    Success {
        /// The expression that was evaluated, trimmed.
        expression: String,
        /// The numeric value.
        value: f64,
        /// Canonical text for the display.
        display_result: String,
    },
    /// The expression was rejected or produced a non-finite value.
    Error {
        /// The expression that was evaluated, trimmed.
        expression: String,
        error: CalcError,
    },
}

impl CalcResult {
    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the display text, or `None` for errors.
    pub fn display(&self) -> Option<&str> {
        match self {
            Self::Success { display_result, .. } => Some(display_result),
            Self::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<CalcError> {
        match self {
            Self::Success { .. } => None,
            Self::Error { error, .. } => Some(*error),
        }
    }
}

/// Evaluate an arithmetic expression to a finite number.
///
/// Pure and deterministic: the same input always yields the same value or
/// the same error kind.
pub fn evaluate(input: &str) -> Result<f64, CalcError> {
    let expr = input.trim();

    validate(expr)?;

    let tokens = tokenize(expr)?;
    let value = Parser::new(&tokens, expr.len()).evaluate()?;

    if !value.is_finite() {
        return Err(CalcError::MathError);
    }

    Ok(value)
}

/// Evaluate an expression and package the outcome for the display.
pub fn evaluate_expression(input: &str) -> CalcResult {
    let expression = input.trim().to_string();

    match evaluate(&expression) {
        Ok(value) => CalcResult::Success {
            display_result: format_number(value),
            expression,
            value,
        },
        Err(error) => CalcResult::Error { expression, error },
    }
}

/// Format a number as plain decimal text.
///
/// Uses the shortest representation that round-trips and never switches to
/// exponent notation, so the text can be edited and evaluated again.
/// Negative zero is shown as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}
