//! Numeric literal recognition.

use crate::TextWindowWithNull;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Start,
    DigitsBeforeDot,
    AfterDot,
    DigitsAfterDot,
    AfterE,
    SignAfterE,
    DigitsAfterE,
}

/// Measures the number literal at the start of `window` without consuming it.
///
/// Returns its length in characters, or `Err` with the length scanned so far
/// when an exponent has no digits. A dot directly followed by an operator
/// that has a dotted form (`1.^2`, `1.'`) is left for the operator.
pub(crate) fn scan(window: &TextWindowWithNull<'_>) -> Result<usize, usize> {
    let mut state = State::Start;
    let mut len = 0;
    loop {
        let c = window.peek(len);
        state = match (state, c) {
            (State::Start | State::DigitsBeforeDot, '0'..='9') => State::DigitsBeforeDot,
            (State::Start | State::DigitsBeforeDot, '.') => State::AfterDot,
            (State::AfterDot, '^' | '*' | '/' | '\\' | '\'') => return Ok(len - 1),
            (State::AfterDot | State::DigitsAfterDot, '0'..='9') => State::DigitsAfterDot,
            (State::DigitsBeforeDot | State::AfterDot | State::DigitsAfterDot, 'e' | 'E') => {
                State::AfterE
            }
            (State::AfterE, '+' | '-') => State::SignAfterE,
            (State::AfterE | State::SignAfterE | State::DigitsAfterE, '0'..='9') => {
                State::DigitsAfterE
            }
            (State::Start | State::AfterE | State::SignAfterE, _) => return Err(len),
            _ => return Ok(len),
        };
        len += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_str(text: &str) -> Result<usize, usize> {
        scan(&TextWindowWithNull::new(text))
    }

    #[test]
    fn test_lengths() {
        let inputs = vec![
            ("42", Ok(2)),
            ("42;", Ok(2)),
            ("42.", Ok(3)),
            ("42.;", Ok(3)),
            ("3.14", Ok(4)),
            (".5", Ok(2)),
            ("1e10", Ok(4)),
            ("42.e-5", Ok(6)),
            ("2.5E+3x", Ok(6)),
            ("26.^[1]", Ok(2)),
            ("1.'", Ok(1)),
            ("1.*2", Ok(1)),
            ("1./2", Ok(1)),
            ("1.\\2", Ok(1)),
            ("1e", Err(2)),
            ("1e+", Err(3)),
            ("1.5ex", Err(4)),
        ];

        for (input, expected) in inputs {
            assert_eq!(scan_str(input), expected, "Input: '{input}'");
        }
    }
}
