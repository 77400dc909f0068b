//! Shorthand expansion, organized by category.
//!
//! Each shorthand parses every component before writing any longhand, so a
//! rejected value leaves the record untouched.

mod animation;
mod background;
mod border;
mod edges;
mod flex;
pub mod scalars;

use crate::Styles;

/// Longhands covered by each shorthand.
const SHORTHANDS: &[(&str, &[&str])] = &[
    ("margin", &["margin-top", "margin-right", "margin-bottom", "margin-left"]),
    ("padding", &["padding-top", "padding-right", "padding-bottom", "padding-left"]),
    ("inset", &["top", "right", "bottom", "left"]),
    (
        "border",
        &[
            "border-top-width",
            "border-right-width",
            "border-bottom-width",
            "border-left-width",
            "border-top-color",
            "border-right-color",
            "border-bottom-color",
            "border-left-color",
        ],
    ),
    ("border-top", &["border-top-width", "border-top-color"]),
    ("border-right", &["border-right-width", "border-right-color"]),
    ("border-bottom", &["border-bottom-width", "border-bottom-color"]),
    ("border-left", &["border-left-width", "border-left-color"]),
    (
        "border-width",
        &["border-top-width", "border-right-width", "border-bottom-width", "border-left-width"],
    ),
    (
        "border-color",
        &["border-top-color", "border-right-color", "border-bottom-color", "border-left-color"],
    ),
    (
        "border-radius",
        &[
            "border-top-left-radius",
            "border-top-right-radius",
            "border-bottom-right-radius",
            "border-bottom-left-radius",
        ],
    ),
    ("flex", &["flex-grow", "flex-shrink", "flex-basis"]),
    ("flex-flow", &["flex-direction", "flex-wrap"]),
    ("gap", &["row-gap", "column-gap"]),
    ("overflow", &["overflow-x", "overflow-y"]),
    ("background", &["background-color", "background-image", "background-repeat"]),
    ("background-size", &["background-size-x", "background-size-y"]),
    ("background-position", &["background-position-x", "background-position-y"]),
    ("transform-origin", &["transform-origin-x", "transform-origin-y"]),
    (
        "animation",
        &[
            "animation-name",
            "animation-duration",
            "animation-delay",
            "animation-iteration-count",
            "animation-timing-function",
            "animation-direction",
            "animation-fill-mode",
            "animation-play-state",
        ],
    ),
];

/// Longhands of a (lowercase) shorthand name.
pub fn shorthand_longhands(name: &str) -> Option<&'static [&'static str]> {
    SHORTHANDS
        .iter()
        .find(|(shorthand, _)| *shorthand == name)
        .map(|(_, longhands)| *longhands)
}

/// Every shorthand name.
pub fn shorthand_names() -> impl Iterator<Item = &'static str> {
    SHORTHANDS.iter().map(|(name, _)| *name)
}

/// Expand a lowercase shorthand; `None` when `name` is not a shorthand.
pub fn set_shorthand(styles: &mut Styles, name: &str, value: &str) -> Option<bool> {
    let accepted = match name {
        "margin" => edges::set_margin(styles, value),
        "padding" => edges::set_padding(styles, value),
        "inset" => edges::set_inset(styles, value),
        "border" => border::set_border(styles, value),
        "border-top" | "border-right" | "border-bottom" | "border-left" => {
            border::set_border_side(styles, name, value)
        }
        "border-width" => border::set_border_width(styles, value),
        "border-color" => border::set_border_color(styles, value),
        "border-radius" => border::set_border_radius(styles, value),
        "flex" => flex::set_flex(styles, value),
        "flex-flow" => flex::set_flex_flow(styles, value),
        "gap" => flex::set_gap(styles, value),
        "overflow" => flex::set_overflow(styles, value),
        "background" => background::set_background(styles, value),
        "background-size" => background::set_background_size(styles, value),
        "background-position" => background::set_background_position(styles, value),
        "transform-origin" => background::set_transform_origin(styles, value),
        "animation" => animation::set_animation(styles, value),
        _ => return None,
    };
    Some(accepted)
}
