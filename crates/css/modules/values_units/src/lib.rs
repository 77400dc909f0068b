//! CSS Values and Units Module Level 3: numbers, percentages, lengths,
//! times, angles and `calc()` expressions.
//! See <https://www.w3.org/TR/css-values-3/>
//!
//! Every grammar has two entry points: a `parse_*` function that reads from a
//! `cssparser::Parser` and a whole-string helper that returns `None` unless
//! the entire text is consumed.

#![forbid(unsafe_code)]

// Per-chapter modules mirroring the CSS Values 3 table of contents.
pub mod chapter_4_numbers;
pub mod chapter_5_percentages;
pub mod chapter_6_dimensions;
pub mod chapter_7_other_quantities;
pub mod chapter_8_calc;

use cssparser::{Parser, ParserInput};

pub use chapter_4_numbers::{Number, number_from_str, parse_number};
pub use chapter_5_percentages::{Percentage, fraction_from_str, parse_percentage};
pub use chapter_6_dimensions::{
    Length, LengthContext, LengthUnit, Viewport, compute_length_px, parse_length,
};
pub use chapter_7_other_quantities::{angle_from_str, parse_angle, parse_time, time_from_str};
pub use chapter_8_calc::{CalcExpression, CalcNode};

/// Parse error for Values & Units parsing utilities in this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The next token did not match the expected grammar.
    UnexpectedToken,
    /// The value parsed but input remained after it.
    TrailingInput,
}

/// Run `parse` over the whole of `text`, failing on leftover tokens.
pub(crate) fn parse_entirely<T, F>(text: &str, parse: F) -> Option<T>
where
    F: FnOnce(&mut Parser) -> Result<T, ParseError>,
{
    let mut input = ParserInput::new(text.trim());
    let mut parser = Parser::new(&mut input);
    let value = parse(&mut parser).ok()?;
    parser.expect_exhausted().ok()?;
    Some(value)
}
