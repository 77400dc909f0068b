//! `border-image`.

use css_syntax::{find_top_level, function_call, split_whitespace_top_level, unquote};
use css_values_units::Length;

use super::Edges;
use crate::keywords::BorderImageRepeat;

/// `border-image: url(...) <slice>{1,4} [/ <width>{1,4}] [fill] [<repeat>]`.
///
/// Unitless slices are pixels of the source image.
#[derive(Clone, Debug, PartialEq)]
pub struct BorderImage {
    pub source: String,
    pub slice: Edges<Length>,
    /// Border widths to draw at; the element's border widths when absent.
    pub width: Option<Edges<Length>>,
    pub repeat: BorderImageRepeat,
    pub fill: bool,
}

impl BorderImage {
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let (head, tail) = match find_top_level(trimmed, &['/']) {
            Some((offset, _)) => (
                trimmed.get(..offset)?,
                Some(trimmed.get(offset.saturating_add(1)..)?),
            ),
            None => (trimmed, None),
        };

        let mut source = None;
        let mut repeat = None;
        let mut fill = false;
        let mut slices = Vec::with_capacity(4);
        for token in split_whitespace_top_level(head) {
            if let Some((_, argument)) =
                function_call(token).filter(|(name, _)| name.eq_ignore_ascii_case("url"))
            {
                source = Some(unquote(argument).to_owned());
            } else if token.eq_ignore_ascii_case("fill") {
                fill = true;
            } else if let Some(mode) = BorderImageRepeat::parse(token) {
                repeat = Some(mode);
            } else {
                slices.push(Length::parse(token).filter(|length| !length.is_auto_like())?);
            }
        }

        let width = match tail {
            None => None,
            Some(widths) => {
                let mut lengths = Vec::with_capacity(4);
                for token in split_whitespace_top_level(widths) {
                    if token.eq_ignore_ascii_case("fill") {
                        fill = true;
                    } else if let Some(mode) = BorderImageRepeat::parse(token) {
                        repeat = Some(mode);
                    } else {
                        lengths.push(Length::parse(token).filter(|length| !length.is_auto_like())?);
                    }
                }
                Some(Edges::from_slice(&lengths)?)
            }
        };

        Some(Self {
            source: source?,
            slice: Edges::from_slice(&slices)?,
            width,
            repeat: repeat.unwrap_or(BorderImageRepeat::Stretch),
            fill,
        })
    }
}
