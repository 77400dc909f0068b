//! Typed panel style properties.
//!
//! [`Styles`] is a flat record with one `Option` per longhand. Values are
//! parsed on assignment through [`Styles::set`]; shorthands such as `margin`,
//! `border`, `flex` or `animation` expand into their longhands.

#![forbid(unsafe_code)]

mod keywords;
mod model;
mod parsers;
mod styles;

use std::collections::HashSet;

use once_cell::sync::Lazy;

pub use keywords::{
    Align, AnimationDirection, AnimationFillMode, AnimationPlayState, BackgroundRepeat,
    BorderImageRepeat, BorderStyle, Display, FlexDirection, FlexWrap, FontStyle, ImageRendering,
    Justify, OverflowMode, PointerEvents, PositionMode, TextAlign, TextOverflow, TextTransform,
    WhiteSpace, WordBreak,
};
pub use model::{
    BorderImage, Edges, Filter, FilterList, Shadow, ShadowList, TimingFunction, Transform,
    TransformList, Transition, TransitionList,
};
pub use parsers::{shorthand_longhands, shorthand_names};
pub use styles::{LONGHANDS, Styles, is_inherited};

/// Every longhand and shorthand name.
static KNOWN_PROPERTIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    LONGHANDS
        .iter()
        .copied()
        .chain(shorthand_names())
        .collect()
});

/// Whether `name` (any case) is a known longhand or shorthand.
pub fn is_known_property(name: &str) -> bool {
    KNOWN_PROPERTIES.contains(name.trim().to_ascii_lowercase().as_str())
}
