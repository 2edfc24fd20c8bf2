//! Shape checks run before an expression reaches the parser.
//!
//! These reject the common malformed inputs with a specific error kind,
//! before the grammar gets a chance to report a generic syntax error.

use lazy_static::lazy_static;
use regex::Regex;

use super::error::CalcError;

lazy_static! {
    /// Digits, the five operators, the decimal point and whitespace.
    static ref ARITHMETIC_CHARS: Regex = Regex::new(r"^[0-9+\-*/.%\s]+$").unwrap();

    static ref BAD_START: Regex = Regex::new(r"^[*/.%]").unwrap();

    static ref BAD_END: Regex = Regex::new(r"[+\-*/.%]$").unwrap();
}

/// Check an expression's shape.
///
/// Runs the checks in order and reports the first one that fails:
/// 1. only arithmetic characters
/// 2. no leading `* / . %`
/// 3. no trailing `+ - * / . %`
/// 4. no adjacent operators once sign characters are set aside
pub fn validate(expr: &str) -> Result<(), CalcError> {
    if !ARITHMETIC_CHARS.is_match(expr) {
        return Err(CalcError::InvalidCharacters);
    }

    if BAD_START.is_match(expr) {
        return Err(CalcError::BadStart);
    }

    if BAD_END.is_match(expr) {
        return Err(CalcError::BadEnd);
    }

    if has_operator_run(expr) {
        return Err(CalcError::BadOperatorSequence);
    }

    Ok(())
}

/// How the previous significant character was classified.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Prev {
    Start,
    Operand,
    Binary,
    Sign,
}

/// Detect two adjacent operator characters, ignoring whitespace.
///
/// A `+` or `-` at the very start is a sign, and so is a `-` right after a
/// binary operator. Signs never count towards a run, but an operand gets at
/// most one: the `-` after a sign is binary again.
fn has_operator_run(expr: &str) -> bool {
    let mut prev = Prev::Start;
    let mut last_was_operator = false;

    for c in expr.chars().filter(|c| !c.is_whitespace()) {
        if c.is_ascii_digit() {
            prev = Prev::Operand;
            last_was_operator = false;
            continue;
        }

        let is_sign = match c {
            '+' => prev == Prev::Start,
            '-' => matches!(prev, Prev::Start | Prev::Binary),
            _ => false,
        };

        if is_sign {
            prev = Prev::Sign;
            continue;
        }

        if last_was_operator {
            return true;
        }
        last_was_operator = true;
        // `.` sits inside a number, so a following `-` is not a sign.
        prev = if c == '.' { Prev::Operand } else { Prev::Binary };
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_expressions() {
        assert_eq!(validate("2+2"), Ok(()));
        assert_eq!(validate("10 / 2"), Ok(()));
        assert_eq!(validate("-5*3"), Ok(()));
        assert_eq!(validate("+5"), Ok(()));
        assert_eq!(validate("3*-5"), Ok(()));
        assert_eq!(validate("3 - -2"), Ok(()));
        assert_eq!(validate("7%3"), Ok(()));
        assert_eq!(validate("0.5+1.25"), Ok(()));
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(validate("2+a"), Err(CalcError::InvalidCharacters));
        assert_eq!(validate("alert(1)"), Err(CalcError::InvalidCharacters));
        assert_eq!(validate("(2+3)"), Err(CalcError::InvalidCharacters));
        assert_eq!(validate(""), Err(CalcError::InvalidCharacters));
    }

    #[test]
    fn test_bad_start() {
        assert_eq!(validate("*2"), Err(CalcError::BadStart));
        assert_eq!(validate("/2"), Err(CalcError::BadStart));
        assert_eq!(validate(".5"), Err(CalcError::BadStart));
        assert_eq!(validate("%5"), Err(CalcError::BadStart));
    }

    #[test]
    fn test_bad_end() {
        assert_eq!(validate("2+"), Err(CalcError::BadEnd));
        assert_eq!(validate("2-"), Err(CalcError::BadEnd));
        assert_eq!(validate("2."), Err(CalcError::BadEnd));
        assert_eq!(validate("2%"), Err(CalcError::BadEnd));
    }

    #[test]
    fn test_operator_runs() {
        assert_eq!(validate("5*/2"), Err(CalcError::BadOperatorSequence));
        assert_eq!(validate("5++2"), Err(CalcError::BadOperatorSequence));
        assert_eq!(validate("5-+2"), Err(CalcError::BadOperatorSequence));
        assert_eq!(validate("2+.5"), Err(CalcError::BadOperatorSequence));
        assert_eq!(validate("3 + * 2"), Err(CalcError::BadOperatorSequence));
    }

    #[test]
    fn test_minus_runs() {
        // Subtracting a negative number is fine, a second sign is not.
        assert_eq!(validate("3--2"), Ok(()));
        assert_eq!(validate("3*--2"), Err(CalcError::BadOperatorSequence));
        assert_eq!(validate("3---2"), Err(CalcError::BadOperatorSequence));
        // A dot belongs to the number before it.
        assert_eq!(validate("5.-3"), Err(CalcError::BadOperatorSequence));
    }
}
