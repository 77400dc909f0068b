//! `transform`.

use css_syntax::{function_call, split_top_level, split_whitespace_top_level};
use css_values_units::{Length, angle_from_str, number_from_str};

/// One transform function; angles are degrees.
#[derive(Clone, Debug, PartialEq)]
pub enum Transform {
    Translate(Length, Length),
    Scale(f32, f32),
    Rotate(f32),
    Skew(f32, f32),
    Perspective(Length),
}

impl Transform {
    pub fn parse(text: &str) -> Option<Self> {
        let (name, arguments) = function_call(text)?;
        let parts = split_top_level(arguments, ',');
        let length = |index: usize| -> Option<Length> {
            parts
                .get(index)
                .and_then(|part| Length::parse(part))
                .filter(|value| !value.is_auto_like())
        };
        let number = |index: usize| parts.get(index).and_then(|part| number_from_str(part));
        let angle = |index: usize| parts.get(index).and_then(|part| angle_from_str(part));
        let zero = || Length::px(0.0);
        let transform = match (name.to_ascii_lowercase().as_str(), parts.len()) {
            ("translate", 1) => Self::Translate(length(0)?, zero()),
            ("translate", 2) => Self::Translate(length(0)?, length(1)?),
            ("translatex", 1) => Self::Translate(length(0)?, zero()),
            ("translatey", 1) => Self::Translate(zero(), length(0)?),
            ("scale", 1) => {
                let factor = number(0)?;
                Self::Scale(factor, factor)
            }
            ("scale", 2) => Self::Scale(number(0)?, number(1)?),
            ("scalex", 1) => Self::Scale(number(0)?, 1.0),
            ("scaley", 1) => Self::Scale(1.0, number(0)?),
            ("rotate" | "rotatez", 1) => Self::Rotate(angle(0)?),
            ("skew", 1) => Self::Skew(angle(0)?, 0.0),
            ("skew", 2) => Self::Skew(angle(0)?, angle(1)?),
            ("skewx", 1) => Self::Skew(angle(0)?, 0.0),
            ("skewy", 1) => Self::Skew(0.0, angle(0)?),
            ("perspective", 1) => Self::Perspective(length(0)?),
            _ => return None,
        };
        Some(transform)
    }
}

/// Space separated transform functions applied left to right; `none` is
/// the empty list.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TransformList(pub Vec<Transform>);

impl TransformList {
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("none") {
            return Some(Self::default());
        }
        split_whitespace_top_level(trimmed)
            .into_iter()
            .map(Transform::parse)
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
