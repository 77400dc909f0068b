//! CSS Values & Units Level 3: §7 Other Quantities (angles, durations)
//! See <https://www.w3.org/TR/css-values-3/#other-units>

use crate::{ParseError, parse_entirely};
use cssparser::{Parser, Token};

/// Parse a <time> (§7.3) and return seconds. `0` is accepted unitless.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` for anything but `s`/`ms` or zero.
pub fn parse_time(input: &mut Parser) -> Result<f32, ParseError> {
    match input.next() {
        Ok(Token::Dimension { value, unit, .. }) => {
            let lower = unit.to_ascii_lowercase();
            match lower.as_str() {
                "s" => Ok(*value),
                "ms" => Ok(*value / 1000.0),
                _ => Err(ParseError::UnexpectedToken),
            }
        }
        Ok(&Token::Number { value, .. }) if value == 0.0 => Ok(0.0),
        _ => Err(ParseError::UnexpectedToken),
    }
}

/// Whole-string <time> in seconds.
pub fn time_from_str(text: &str) -> Option<f32> {
    parse_entirely(text, parse_time)
}

/// Parse an <angle> (§7.1) and return degrees. Bare numbers are degrees.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` for unknown angle units.
pub fn parse_angle(input: &mut Parser) -> Result<f32, ParseError> {
    match input.next() {
        Ok(Token::Dimension { value, unit, .. }) => {
            let lower = unit.to_ascii_lowercase();
            match lower.as_str() {
                "deg" => Ok(*value),
                "rad" => Ok(value.to_degrees()),
                "grad" => Ok(*value * 0.9),
                "turn" => Ok(*value * 360.0),
                _ => Err(ParseError::UnexpectedToken),
            }
        }
        Ok(&Token::Number { value, .. }) => Ok(value),
        _ => Err(ParseError::UnexpectedToken),
    }
}

/// Whole-string <angle> in degrees.
pub fn angle_from_str(text: &str) -> Option<f32> {
    parse_entirely(text, parse_angle)
}
