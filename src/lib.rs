//! Keypad calculator core.
//!
//! A restricted arithmetic evaluator plus the state machine that turns
//! keyboard and button input into edits of a single display string.

pub mod calculator;
pub mod config;
pub mod controller;
pub mod flash;
pub mod input;
pub mod session;

pub use calculator::{CalcError, CalcResult, evaluate, evaluate_expression};
pub use config::CalciConfig;
pub use controller::{Calculator, FlashTicket, Outcome};
pub use input::{Digit, Input, Operator, Token};
pub use session::Session;
