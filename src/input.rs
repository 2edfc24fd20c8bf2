//! Input normalization.
//!
//! Keyboard keys and keypad buttons are two sources of the same logical
//! tokens. Both are reduced to [`Token`] here so the controller only ever
//! sees one alphabet.

use std::fmt;

/// A binary operator on the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }
}

/// A decimal digit `0`-`9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digit(u8);

impl Digit {
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self(d as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

/// One normalized unit of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Digit(Digit),
    DecimalPoint,
    Operator(Operator),
    Percent,
    Clear,
    Backspace,
    Compute,
    /// Any other button label, appended to the display as-is.
    Text(String),
}

impl Token {
    /// Map a token made of a single keypad character.
    fn from_keypad_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::DecimalPoint),
            '%' => Some(Self::Percent),
            '=' => Some(Self::Compute),
            _ => Digit::from_char(c)
                .map(Self::Digit)
                .or_else(|| Operator::from_char(c).map(Self::Operator)),
        }
    }

    /// Normalize a keyboard key.
    ///
    /// `key` is either a single character or a named key such as `Enter`.
    /// Keys with no calculator meaning yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" => return Some(Self::Compute),
            "Backspace" => return Some(Self::Backspace),
            "Escape" | "c" | "C" => return Some(Self::Clear),
            _ => {}
        }

        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_keypad_char(c),
            _ => None,
        }
    }

    /// Normalize the label of a clicked keypad button.
    ///
    /// Unknown labels are passed through as [`Token::Text`]; blank labels
    /// yield `None`.
    pub fn from_button_label(label: &str) -> Option<Self> {
        let label = label.trim();

        match label {
            "" => return None,
            "C" => return Some(Self::Clear),
            "R" => return Some(Self::Backspace),
            _ => {}
        }

        let mut chars = label.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(token) = Self::from_keypad_char(c) {
                return Some(token);
            }
        }

        Some(Self::Text(label.to_string()))
    }
}

/// A raw input event before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A key press, by character or key name.
    Key(String),
    /// A click on a keypad button, by its label.
    Button(String),
}

impl Input {
    pub fn token(&self) -> Option<Token> {
        match self {
            Self::Key(key) => Token::from_key(key),
            Self::Button(label) => Token::from_button_label(label),
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) if key.chars().count() == 1 => write!(f, "{}", key),
            Self::Key(key) => write!(f, "{{{}}}", key),
            Self::Button(label) => write!(f, "[{}]", label),
        }
    }
}

/// Parse one line of a host input script.
///
/// `{Name}` is a named key, `[label]` a button click, and any other
/// character is a key press of that character. An unclosed bracket is
/// read as plain characters.
pub fn parse_script_line(line: &str) -> Vec<Input> {
    let mut inputs = Vec::new();
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        let close = match c {
            '{' => Some('}'),
            '[' => Some(']'),
            _ => None,
        };

        if let Some(close) = close {
            if let Some(end) = rest[1..].find(close) {
                let name = rest[1..1 + end].to_string();
                inputs.push(if c == '{' {
                    Input::Key(name)
                } else {
                    Input::Button(name)
                });
                rest = &rest[end + 2..];
                continue;
            }
        }

        inputs.push(Input::Key(c.to_string()));
        rest = &rest[c.len_utf8()..];
    }

    inputs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_keys() {
        assert_eq!(Token::from_key("7"), Some(Token::Digit(Digit(7))));
        assert_eq!(Token::from_key("."), Some(Token::DecimalPoint));
        assert_eq!(
            Token::from_key("*"),
            Some(Token::Operator(Operator::Multiply))
        );
        assert_eq!(Token::from_key("%"), Some(Token::Percent));
        assert_eq!(Token::from_key("Enter"), Some(Token::Compute));
        assert_eq!(Token::from_key("="), Some(Token::Compute));
        assert_eq!(Token::from_key("Backspace"), Some(Token::Backspace));
        assert_eq!(Token::from_key("Escape"), Some(Token::Clear));
        assert_eq!(Token::from_key("c"), Some(Token::Clear));
        assert_eq!(Token::from_key("C"), Some(Token::Clear));
    }

    #[test]
    fn test_digit_only_holds_decimal_digits() {
        assert_eq!(Digit::from_char('7').map(Digit::as_char), Some('7'));
        assert_eq!(Digit::new(9).map(Digit::value), Some(9));
        assert_eq!(Digit::new(10), None);
        assert_eq!(Digit::from_char('x'), None);
        // Non-ASCII numerals are not keypad digits.
        assert_eq!(Digit::from_char('\u{0663}'), None);
    }

    #[test]
    fn test_keyboard_ignores_unknown_keys() {
        assert_eq!(Token::from_key("x"), None);
        assert_eq!(Token::from_key("R"), None);
        assert_eq!(Token::from_key("Shift"), None);
        assert_eq!(Token::from_key(""), None);
    }

    #[test]
    fn test_button_labels() {
        assert_eq!(Token::from_button_label(" C "), Some(Token::Clear));
        assert_eq!(Token::from_button_label("R"), Some(Token::Backspace));
        assert_eq!(Token::from_button_label("="), Some(Token::Compute));
        assert_eq!(Token::from_button_label("%"), Some(Token::Percent));
        assert_eq!(Token::from_button_label("0"), Some(Token::Digit(Digit(0))));
        assert_eq!(
            Token::from_button_label("-"),
            Some(Token::Operator(Operator::Subtract))
        );
    }

    #[test]
    fn test_button_passes_unknown_labels_through() {
        assert_eq!(
            Token::from_button_label("00"),
            Some(Token::Text("00".to_string()))
        );
        assert_eq!(Token::from_button_label("   "), None);
    }

    #[test]
    fn test_both_sources_agree() {
        for c in "0123456789.+-*/%=".chars() {
            let s = c.to_string();
            assert_eq!(
                Input::Key(s.clone()).token(),
                Input::Button(s).token(),
                "mismatch for {c}"
            );
        }
    }

    #[test]
    fn test_parse_script_line() {
        assert_eq!(
            parse_script_line("1+2{Enter}[C]"),
            vec![
                Input::Key("1".into()),
                Input::Key("+".into()),
                Input::Key("2".into()),
                Input::Key("Enter".into()),
                Input::Button("C".into()),
            ]
        );
    }

    #[test]
    fn test_parse_script_line_unclosed() {
        assert_eq!(
            parse_script_line("{Ent"),
            vec![
                Input::Key("{".into()),
                Input::Key("E".into()),
                Input::Key("n".into()),
                Input::Key("t".into()),
            ]
        );
    }

    #[test]
    fn test_input_display() {
        assert_eq!(Input::Key("5".into()).to_string(), "5");
        assert_eq!(Input::Key("Enter".into()).to_string(), "{Enter}");
        assert_eq!(Input::Button("=".into()).to_string(), "[=]");
    }
}
