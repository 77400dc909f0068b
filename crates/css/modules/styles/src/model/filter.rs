//! `filter` and `backdrop-filter`.

use css_syntax::{function_call, split_whitespace_top_level};
use css_values_units::{Length, angle_from_str, fraction_from_str};

use super::Shadow;

/// One filter function. Amount-style arguments are fractions (`50%` is 0.5),
/// hue rotation is in degrees.
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    Blur(Length),
    Brightness(f32),
    Contrast(f32),
    Grayscale(f32),
    HueRotate(f32),
    Invert(f32),
    Opacity(f32),
    Saturate(f32),
    Sepia(f32),
    DropShadow(Shadow),
}

impl Filter {
    pub fn parse(text: &str) -> Option<Self> {
        let (name, argument) = function_call(text)?;
        let amount = || {
            if argument.is_empty() {
                Some(1.0)
            } else {
                fraction_from_str(argument)
            }
        };
        let filter = match name.to_ascii_lowercase().as_str() {
            "blur" => Self::Blur(if argument.is_empty() {
                Length::px(0.0)
            } else {
                Length::parse(argument).filter(|length| !length.is_auto_like())?
            }),
            "brightness" => Self::Brightness(amount()?),
            "contrast" => Self::Contrast(amount()?),
            "grayscale" => Self::Grayscale(amount()?),
            "hue-rotate" => Self::HueRotate(if argument.is_empty() {
                0.0
            } else {
                angle_from_str(argument)?
            }),
            "invert" => Self::Invert(amount()?),
            "opacity" => Self::Opacity(amount()?),
            "saturate" => Self::Saturate(amount()?),
            "sepia" => Self::Sepia(amount()?),
            "drop-shadow" => Self::DropShadow(Shadow::parse(argument)?),
            _ => return None,
        };
        Some(filter)
    }
}

/// Space separated filter functions; `none` is the empty list.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FilterList(pub Vec<Filter>);

impl FilterList {
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("none") {
            return Some(Self::default());
        }
        split_whitespace_top_level(trimmed)
            .into_iter()
            .map(Filter::parse)
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
