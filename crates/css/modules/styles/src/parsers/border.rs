//! Border shorthands.

use css_color::Color;
use css_syntax::split_whitespace_top_level;
use css_values_units::Length;

use super::edges::parse_length_edges;
use crate::Styles;
use crate::keywords::BorderStyle;
use crate::model::Edges;

/// `<width> || <style> || <color>` in any order.
fn parse_border_line(value: &str) -> Option<(Option<Length>, Option<Color>)> {
    let mut width = None;
    let mut color = None;
    let mut style = None;
    for token in split_whitespace_top_level(value) {
        if let Some(line_style) = BorderStyle::parse(token) {
            if style.replace(line_style).is_some() {
                return None;
            }
        } else if let Some(length) = Length::parse(token).filter(|len| !len.is_auto_like()) {
            if width.replace(length).is_some() {
                return None;
            }
        } else if color.replace(Color::parse(token)?).is_some() {
            return None;
        }
    }
    // `border: none` removes the border.
    if style == Some(BorderStyle::None) {
        return Some((Some(Length::px(0.0)), color));
    }
    if width.is_none() && color.is_none() && style.is_none() {
        return None;
    }
    Some((width, color))
}

pub fn set_border(styles: &mut Styles, value: &str) -> bool {
    let Some((width, color)) = parse_border_line(value) else {
        return false;
    };
    if let Some(length) = width {
        styles.border_top_width = Some(length.clone());
        styles.border_right_width = Some(length.clone());
        styles.border_bottom_width = Some(length.clone());
        styles.border_left_width = Some(length);
    }
    if let Some(line_color) = color {
        styles.border_top_color = Some(line_color);
        styles.border_right_color = Some(line_color);
        styles.border_bottom_color = Some(line_color);
        styles.border_left_color = Some(line_color);
    }
    true
}

/// `border-top`, `border-right`, `border-bottom` or `border-left`.
pub fn set_border_side(styles: &mut Styles, name: &str, value: &str) -> bool {
    let Some((width, color)) = parse_border_line(value) else {
        return false;
    };
    let (width_slot, color_slot) = match name {
        "border-top" => (&mut styles.border_top_width, &mut styles.border_top_color),
        "border-right" => (&mut styles.border_right_width, &mut styles.border_right_color),
        "border-bottom" => (&mut styles.border_bottom_width, &mut styles.border_bottom_color),
        "border-left" => (&mut styles.border_left_width, &mut styles.border_left_color),
        _ => return false,
    };
    if width.is_some() {
        *width_slot = width;
    }
    if color.is_some() {
        *color_slot = color;
    }
    true
}

pub fn set_border_width(styles: &mut Styles, value: &str) -> bool {
    let Some(edges) = parse_length_edges(value) else {
        return false;
    };
    styles.border_top_width = Some(edges.top);
    styles.border_right_width = Some(edges.right);
    styles.border_bottom_width = Some(edges.bottom);
    styles.border_left_width = Some(edges.left);
    true
}

pub fn set_border_color(styles: &mut Styles, value: &str) -> bool {
    let Some(colors) = split_whitespace_top_level(value)
        .into_iter()
        .map(Color::parse)
        .collect::<Option<Vec<_>>>()
    else {
        return false;
    };
    let Some(edges) = Edges::from_slice(&colors) else {
        return false;
    };
    styles.border_top_color = Some(edges.top);
    styles.border_right_color = Some(edges.right);
    styles.border_bottom_color = Some(edges.bottom);
    styles.border_left_color = Some(edges.left);
    true
}

/// Corner radii in `top-left top-right bottom-right bottom-left` order.
/// Elliptical radii after a `/` are not supported; the horizontal radii are
/// used.
pub fn set_border_radius(styles: &mut Styles, value: &str) -> bool {
    let horizontal = value.split('/').next().unwrap_or_default();
    let Some(edges) = parse_length_edges(horizontal) else {
        return false;
    };
    styles.border_top_left_radius = Some(edges.top);
    styles.border_top_right_radius = Some(edges.right);
    styles.border_bottom_right_radius = Some(edges.bottom);
    styles.border_bottom_left_radius = Some(edges.left);
    true
}
