//! CSS Values & Units Level 3: §4 Numbers
//! See <https://www.w3.org/TR/css-values-3/#numeric-types>

use crate::{ParseError, parse_entirely};
use cssparser::{Parser, Token};

/// A CSS <number>
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Number(pub f32);

/// Parse a CSS <number> (§4.2). Accepts integer or real numbers.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` when the next token is not a `<number>`.
pub fn parse_number(input: &mut Parser) -> Result<Number, ParseError> {
    match input.next() {
        Ok(&Token::Number { value, .. }) => Ok(Number(value)),
        _ => Err(ParseError::UnexpectedToken),
    }
}

/// Parse a whole string as a `<number>`, e.g. `flex-grow: 2`.
pub fn number_from_str(text: &str) -> Option<f32> {
    parse_entirely(text, parse_number).map(|Number(value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_parse_whole_input_only() {
        assert_eq!(number_from_str(" 1.5 "), Some(1.5));
        assert_eq!(number_from_str("-2"), Some(-2.0));
        assert_eq!(number_from_str("2px"), None);
        assert_eq!(number_from_str("1 2"), None);
    }
}
