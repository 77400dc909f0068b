//! CSS Values & Units Level 3: §6 Dimensions (Lengths)
//! See <https://www.w3.org/TR/css-values-3/#lengths>
//!
//! Besides the absolute and relative units this also models the keyword
//! lengths the panel properties accept (`auto`, `contain`, `cover`, `none`)
//! and `calc()` expressions, so every sizing property has one value type.

use core::fmt;
use std::sync::Arc;

use crate::chapter_8_calc::{CalcExpression, parse_calc_arguments};
use crate::{ParseError, parse_entirely};
use cssparser::{Parser, Token};

/// Unit of a [`Length`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    Pixels,
    /// Stored as 0..=100.
    Percentage,
    Em,
    RootEm,
    ViewWidth,
    ViewHeight,
    ViewMin,
    ViewMax,
    Auto,
    Contain,
    Cover,
    /// A `calc()` expression; see [`Length::expression`].
    Expression,
    /// No value; layout treats it like `auto`.
    Undefined,
}

/// A length with its unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Length {
    pub value: f32,
    pub unit: LengthUnit,
    expression: Option<Arc<CalcExpression>>,
}

/// Viewport metrics used to evaluate viewport-relative units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width_px: f32,
    pub height_px: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width_px: f32, height_px: f32) -> Self {
        Self {
            width_px,
            height_px,
        }
    }
}

/// Everything pixel resolution needs besides the length itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LengthContext {
    /// Computed font size of the element, for `em`.
    pub font_size: f32,
    /// Font size of the root, for `rem`.
    pub root_font_size: f32,
    pub viewport: Viewport,
}

impl Default for LengthContext {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            root_font_size: 16.0,
            viewport: Viewport::new(0.0, 0.0),
        }
    }
}

impl Length {
    #[inline]
    const fn with_unit(value: f32, unit: LengthUnit) -> Self {
        Self {
            value,
            unit,
            expression: None,
        }
    }

    #[inline]
    pub const fn px(value: f32) -> Self {
        Self::with_unit(value, LengthUnit::Pixels)
    }

    /// `value` is in percent, so `Length::percent(50.0)` is `50%`.
    #[inline]
    pub const fn percent(value: f32) -> Self {
        Self::with_unit(value, LengthUnit::Percentage)
    }

    #[inline]
    pub const fn em(value: f32) -> Self {
        Self::with_unit(value, LengthUnit::Em)
    }

    #[inline]
    pub const fn rem(value: f32) -> Self {
        Self::with_unit(value, LengthUnit::RootEm)
    }

    #[inline]
    pub const fn auto() -> Self {
        Self::with_unit(0.0, LengthUnit::Auto)
    }

    #[inline]
    pub const fn undefined() -> Self {
        Self::with_unit(0.0, LengthUnit::Undefined)
    }

    /// Wrap a parsed `calc()` expression.
    pub fn calc(expression: CalcExpression) -> Self {
        Self {
            value: 0.0,
            unit: LengthUnit::Expression,
            expression: Some(Arc::new(expression)),
        }
    }

    /// Parse a whole string as a length. Bare numbers are pixels.
    ///
    /// ```
    /// use css_values_units::{Length, LengthUnit};
    /// let length = Length::parse("50%").unwrap_or_else(Length::undefined);
    /// assert_eq!(length.unit, LengthUnit::Percentage);
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        parse_entirely(text, parse_length)
    }

    #[inline]
    pub fn expression(&self) -> Option<&CalcExpression> {
        self.expression.as_deref()
    }

    /// `auto` or `undefined`: layout engines get their auto sentinel.
    #[inline]
    pub const fn is_auto_like(&self) -> bool {
        matches!(self.unit, LengthUnit::Auto | LengthUnit::Undefined)
    }

    /// Whether resolution needs the containing block's size.
    pub fn depends_on_container(&self) -> bool {
        match self.unit {
            LengthUnit::Percentage => true,
            LengthUnit::Expression => self
                .expression
                .as_deref()
                .is_some_and(CalcExpression::has_percentage),
            LengthUnit::Pixels
            | LengthUnit::Em
            | LengthUnit::RootEm
            | LengthUnit::ViewWidth
            | LengthUnit::ViewHeight
            | LengthUnit::ViewMin
            | LengthUnit::ViewMax
            | LengthUnit::Auto
            | LengthUnit::Contain
            | LengthUnit::Cover
            | LengthUnit::Undefined => false,
        }
    }

    /// Resolve to pixels. `reference` is the size percentages refer to.
    #[inline]
    pub fn to_pixels(&self, context: &LengthContext, reference: Option<f32>) -> Option<f32> {
        compute_length_px(self, context, reference)
    }

    /// Linear interpolation for transitions; only same-unit lengths blend.
    pub fn lerp(&self, target: &Self, progress: f32) -> Option<Self> {
        if self.unit != target.unit || self.unit == LengthUnit::Expression {
            return None;
        }
        let value = (target.value - self.value).mul_add(progress, self.value);
        Some(Self::with_unit(value, self.unit))
    }
}

/// Compute the pixel value for a given `Length` using the current environment.
///
/// - Pixels: returns the raw value.
/// - Em/RootEm: scales by the context's font sizes.
/// - Viewport-relative units: a percentage of the context's viewport.
/// - Percentages and percentage-bearing `calc()` need `reference`.
/// - Keyword lengths (`auto`, `contain`, `cover`, `undefined`) have no pixel value.
pub fn compute_length_px(
    length: &Length,
    context: &LengthContext,
    reference: Option<f32>,
) -> Option<f32> {
    let viewport = context.viewport;
    match length.unit {
        LengthUnit::Pixels => Some(length.value),
        LengthUnit::Percentage => reference.map(|base| length.value * base / 100.0),
        LengthUnit::Em => Some(length.value * context.font_size),
        LengthUnit::RootEm => Some(length.value * context.root_font_size),
        LengthUnit::ViewWidth => Some(length.value * viewport.width_px / 100.0),
        LengthUnit::ViewHeight => Some(length.value * viewport.height_px / 100.0),
        LengthUnit::ViewMin => {
            Some(length.value * viewport.width_px.min(viewport.height_px) / 100.0)
        }
        LengthUnit::ViewMax => {
            Some(length.value * viewport.width_px.max(viewport.height_px) / 100.0)
        }
        LengthUnit::Expression => length
            .expression
            .as_deref()
            .and_then(|expression| expression.evaluate(context, reference)),
        LengthUnit::Auto | LengthUnit::Contain | LengthUnit::Cover | LengthUnit::Undefined => {
            None
        }
    }
}

/// Map a dimension unit to a [`LengthUnit`].
pub(crate) fn unit_from_str(unit: &str) -> Option<LengthUnit> {
    let lower = unit.to_ascii_lowercase();
    let kind = match lower.as_str() {
        "px" => LengthUnit::Pixels,
        "em" => LengthUnit::Em,
        "rem" => LengthUnit::RootEm,
        "vw" => LengthUnit::ViewWidth,
        "vh" => LengthUnit::ViewHeight,
        "vmin" => LengthUnit::ViewMin,
        "vmax" => LengthUnit::ViewMax,
        _ => return None,
    };
    Some(kind)
}

/// Parse a <length> (§6.2), a percentage, a keyword length, or `calc()`.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` when the next token is not a length.
pub fn parse_length(input: &mut Parser) -> Result<Length, ParseError> {
    let token = input
        .next()
        .map_err(|_| ParseError::UnexpectedToken)?
        .clone();
    match token {
        Token::Dimension { value, unit, .. } => unit_from_str(&unit)
            .map(|kind| Length::with_unit(value, kind))
            .ok_or(ParseError::UnexpectedToken),
        Token::Percentage { unit_value, .. } => Ok(Length::percent(unit_value * 100.0)),
        Token::Number { value, .. } => Ok(Length::px(value)),
        Token::Ident(name) => {
            let lower = name.to_ascii_lowercase();
            match lower.as_str() {
                "auto" => Ok(Length::auto()),
                "contain" => Ok(Length::with_unit(0.0, LengthUnit::Contain)),
                "cover" => Ok(Length::with_unit(0.0, LengthUnit::Cover)),
                "none" | "initial" | "undefined" => Ok(Length::undefined()),
                _ => Err(ParseError::UnexpectedToken),
            }
        }
        Token::Function(name) if name.eq_ignore_ascii_case("calc") => {
            parse_calc_arguments(input).map(Length::calc)
        }
        _ => Err(ParseError::UnexpectedToken),
    }
}

impl fmt::Display for Length {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value;
        match self.unit {
            LengthUnit::Pixels => write!(formatter, "{value}px"),
            LengthUnit::Percentage => write!(formatter, "{value}%"),
            LengthUnit::Em => write!(formatter, "{value}em"),
            LengthUnit::RootEm => write!(formatter, "{value}rem"),
            LengthUnit::ViewWidth => write!(formatter, "{value}vw"),
            LengthUnit::ViewHeight => write!(formatter, "{value}vh"),
            LengthUnit::ViewMin => write!(formatter, "{value}vmin"),
            LengthUnit::ViewMax => write!(formatter, "{value}vmax"),
            LengthUnit::Auto => formatter.write_str("auto"),
            LengthUnit::Contain => formatter.write_str("contain"),
            LengthUnit::Cover => formatter.write_str("cover"),
            LengthUnit::Undefined => formatter.write_str("none"),
            LengthUnit::Expression => match &self.expression {
                Some(expression) => write!(formatter, "calc({})", expression.source()),
                None => formatter.write_str("calc()"),
            },
        }
    }
}
