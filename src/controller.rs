//! Display buffer edit state machine.
//!
//! [`Calculator`] owns the display text and applies one [`Token`] at a time.
//! No transition fails: edits that would make the text implausible are
//! dropped, and only `Compute` can put the error marker on screen.

use lazy_static::lazy_static;
use regex::Regex;

use crate::calculator::{CalcResult, evaluate_expression, format_number};
use crate::input::{Digit, Operator, Token};

/// Marker shown after a failed computation.
pub const DEFAULT_ERROR_MARKER: &str = "Error";

/// Characters that trigger the operator overwrite rule.
const OVERWRITE_CHARS: &str = "+-*/.";

lazy_static! {
    /// Trailing `digits(.digits)?` run, the target of the percent key.
    static ref TRAILING_NUMBER: Regex = Regex::new(r"\d+(?:\.\d+)?$").unwrap();
}

/// Handle for a pending error-flash reset.
///
/// Only honoured while the display is still at the generation that showed
/// the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashTicket {
    generation: u64,
}

impl FlashTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Outcome from applying a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The display text did not change.
    Unchanged,
    /// The display text changed.
    Changed,
    /// The error marker is showing; the host should expire the ticket after
    /// the flash delay.
    Flash(FlashTicket),
}

/// Calculator display state.
#[derive(Debug, Clone)]
pub struct Calculator {
    text: String,
    generation: u64,
    flash: Option<FlashTicket>,
    error_marker: String,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Create a calculator with an empty display.
    pub fn new() -> Self {
        Self::with_error_marker(DEFAULT_ERROR_MARKER)
    }

    pub fn with_error_marker(marker: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            generation: 0,
            flash: None,
            error_marker: marker.into(),
        }
    }

    /// Current display text.
    pub fn display(&self) -> &str {
        &self.text
    }

    /// Bumped on every change to the display text.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the error marker is currently showing.
    pub fn is_flashing(&self) -> bool {
        self.flash.is_some()
    }

    /// Apply a token and return the outcome.
    pub fn apply(&mut self, token: &Token) -> Outcome {
        tracing::trace!(?token, display = %self.text, "apply token");

        // Any input dismisses the error marker before it is handled.
        let dismissed = self.dismiss_flash();

        let outcome = match token {
            Token::Clear => self.clear(),
            Token::Backspace => self.backspace(),
            Token::Percent => self.percent(),
            Token::Compute => self.compute(),
            Token::Digit(d) => self.push_digit(*d),
            Token::DecimalPoint => self.push_operator('.'),
            Token::Operator(op) => self.push_operator(op.as_char()),
            Token::Text(text) => self.push_str(text),
        };

        if dismissed && outcome == Outcome::Unchanged {
            Outcome::Changed
        } else {
            outcome
        }
    }

    /// Reset the display once an error flash has run its course.
    ///
    /// Stale tickets, whose error was already dismissed by later input,
    /// are ignored.
    pub fn expire_flash(&mut self, ticket: FlashTicket) -> Outcome {
        if self.flash != Some(ticket) || self.generation != ticket.generation {
            tracing::trace!(
                ticket = ticket.generation,
                current = self.generation,
                "ignoring stale flash ticket"
            );
            return Outcome::Unchanged;
        }

        self.flash = None;
        self.set_text(String::new());
        Outcome::Changed
    }

    fn dismiss_flash(&mut self) -> bool {
        if self.flash.take().is_some() {
            tracing::debug!("error marker dismissed by input");
            self.set_text(String::new());
            true
        } else {
            false
        }
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
        self.generation += 1;
    }

    fn changed_if(&mut self, text: String) -> Outcome {
        if text == self.text {
            Outcome::Unchanged
        } else {
            self.set_text(text);
            Outcome::Changed
        }
    }

    fn clear(&mut self) -> Outcome {
        self.changed_if(String::new())
    }

    fn backspace(&mut self) -> Outcome {
        let mut text = self.text.clone();
        if text.pop().is_none() {
            return Outcome::Unchanged;
        }
        self.set_text(text);
        Outcome::Changed
    }

    /// Replace the trailing number with a hundredth of itself.
    fn percent(&mut self) -> Outcome {
        let Some(m) = TRAILING_NUMBER.find(&self.text) else {
            return Outcome::Unchanged;
        };

        let Ok(number) = m.as_str().parse::<f64>() else {
            return Outcome::Unchanged;
        };

        let text = format!("{}{}", &self.text[..m.start()], format_number(number / 100.0));
        self.changed_if(text)
    }

    fn compute(&mut self) -> Outcome {
        if self.text.trim().is_empty() {
            return Outcome::Unchanged;
        }

        match evaluate_expression(&self.text) {
            CalcResult::Success {
                expression,
                display_result,
                ..
            } => {
                tracing::debug!(%expression, result = %display_result, "computed");
                self.changed_if(display_result)
            }
            CalcResult::Error { expression, error } => {
                tracing::debug!(%expression, kind = error.kind(), "compute failed: {}", error);
                self.set_text(self.error_marker.clone());
                let ticket = FlashTicket {
                    generation: self.generation,
                };
                self.flash = Some(ticket);
                Outcome::Flash(ticket)
            }
        }
    }

    fn push_digit(&mut self, digit: Digit) -> Outcome {
        let digit = digit.as_char();
        let text = if self.text == "0" {
            digit.to_string()
        } else {
            format!("{}{}", self.text, digit)
        };
        self.changed_if(text)
    }

    /// Append an operator or decimal point, overwriting a trailing one.
    fn push_operator(&mut self, op: char) -> Outcome {
        let minus = Operator::Subtract.as_char();

        let text = match self.text.chars().last() {
            // Only a minus can start an expression.
            None if op != minus => return Outcome::Unchanged,
            None => op.to_string(),
            Some(last) if OVERWRITE_CHARS.contains(last) => {
                if op == minus && last != minus {
                    // Negative operand, e.g. `3*-`.
                    format!("{}{}", self.text, op)
                } else {
                    let mut text = self.text.clone();
                    text.pop();
                    text.push(op);
                    text
                }
            }
            Some(_) => format!("{}{}", self.text, op),
        };

        self.changed_if(text)
    }

    fn push_str(&mut self, s: &str) -> Outcome {
        let text = format!("{}{}", self.text, s);
        self.changed_if(text)
    }
}
