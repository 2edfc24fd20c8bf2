//! Calculator module for evaluating arithmetic expressions.
//!
//! This module provides functionality to:
//! - Reject malformed expressions before they are parsed
//! - Tokenize and evaluate the restricted arithmetic grammar
//! - Format results as plain decimal text

mod error;
mod evaluation;
mod lexer;
mod parser;
mod validation;

pub use error::CalcError;
pub use evaluation::{CalcResult, evaluate, evaluate_expression, format_number};
pub use lexer::{Lexeme, Spanned, tokenize};
pub use validation::validate;
