//! `box-shadow` and `text-shadow`.

use css_color::Color;
use css_syntax::{split_top_level, split_whitespace_top_level};
use css_values_units::Length;

/// One shadow layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Shadow {
    pub offset_x: Length,
    pub offset_y: Length,
    pub blur: Length,
    pub spread: Length,
    pub color: Color,
    pub inset: bool,
}

impl Shadow {
    /// Parse `[inset] <x> <y> [<blur> [<spread>]] [<color>]`; the color and
    /// `inset` may appear first or last.
    pub fn parse(text: &str) -> Option<Self> {
        let mut lengths = Vec::with_capacity(4);
        let mut color = None;
        let mut inset = false;
        for token in split_whitespace_top_level(text) {
            if token.eq_ignore_ascii_case("inset") && !inset {
                inset = true;
            } else if let Some(length) = Length::parse(token).filter(|len| !len.is_auto_like()) {
                if lengths.len() == 4 {
                    return None;
                }
                lengths.push(length);
            } else if color.is_none() {
                color = Some(Color::parse(token)?);
            } else {
                return None;
            }
        }
        let mut lengths = lengths.into_iter();
        let offset_x = lengths.next()?;
        let offset_y = lengths.next()?;
        Some(Self {
            offset_x,
            offset_y,
            blur: lengths.next().unwrap_or_else(|| Length::px(0.0)),
            spread: lengths.next().unwrap_or_else(|| Length::px(0.0)),
            color: color.unwrap_or(Color::BLACK),
            inset,
        })
    }
}

/// Comma separated shadow layers; `none` is the empty list.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ShadowList(pub Vec<Shadow>);

impl ShadowList {
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("none") {
            return Some(Self::default());
        }
        split_top_level(trimmed, ',')
            .into_iter()
            .map(Shadow::parse)
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
