//! CSS Values & Units Level 3: §5 Percentages
//! See <https://www.w3.org/TR/css-values-3/#percentages>

use crate::{ParseError, parse_entirely};
use cssparser::{Parser, Token};

/// A CSS <percentage>
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Percentage(pub f32); // stored as 0.0..=1.0

/// Parse a CSS <percentage> (§5.1).
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` when the next token is not a `<percentage>`.
pub fn parse_percentage(input: &mut Parser) -> Result<Percentage, ParseError> {
    match input.next() {
        Ok(&Token::Percentage { unit_value, .. }) => Ok(Percentage(unit_value)),
        _ => Err(ParseError::UnexpectedToken),
    }
}

/// Parse `<number> | <percentage>` as a fraction: `50%` and `0.5` both give
/// `0.5`. Used by opacity and the color transform amounts.
pub fn fraction_from_str(text: &str) -> Option<f32> {
    parse_entirely(text, |input| match input.next() {
        Ok(&Token::Percentage { unit_value, .. }) => Ok(unit_value),
        Ok(&Token::Number { value, .. }) => Ok(value),
        _ => Err(ParseError::UnexpectedToken),
    })
}
