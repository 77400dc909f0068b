//! Background and origin shorthands.

use css_color::Color;
use css_syntax::split_whitespace_top_level;
use css_values_units::{Length, LengthUnit};

use super::scalars::parse_image;
use crate::Styles;
use crate::keywords::BackgroundRepeat;

/// `background: <color> || <image> || <repeat>`.
pub fn set_background(styles: &mut Styles, value: &str) -> bool {
    if value.trim().eq_ignore_ascii_case("none") {
        styles.background_color = Some(Color::TRANSPARENT);
        styles.background_image = Some(String::new());
        return true;
    }
    let mut color = None;
    let mut image = None;
    let mut repeat = None;
    for token in split_whitespace_top_level(value) {
        if let Some(mode) = BackgroundRepeat::parse(token) {
            if repeat.replace(mode).is_some() {
                return false;
            }
        } else if let Some(path) = parse_image(token).filter(|path| !path.is_empty()) {
            if image.replace(path).is_some() {
                return false;
            }
        } else if let Some(parsed) = Color::parse(token) {
            if color.replace(parsed).is_some() {
                return false;
            }
        } else {
            return false;
        }
    }
    if color.is_none() && image.is_none() && repeat.is_none() {
        return false;
    }
    if color.is_some() {
        styles.background_color = color;
    }
    if image.is_some() {
        styles.background_image = image;
    }
    if repeat.is_some() {
        styles.background_repeat = repeat;
    }
    true
}

/// `background-size: cover | contain | <x> [<y>]`.
pub fn set_background_size(styles: &mut Styles, value: &str) -> bool {
    let Some(sizes) = split_whitespace_top_level(value)
        .into_iter()
        .map(Length::parse)
        .collect::<Option<Vec<_>>>()
    else {
        return false;
    };
    let (horizontal, vertical) = match sizes.as_slice() {
        [keyword] if matches!(keyword.unit, LengthUnit::Contain | LengthUnit::Cover) => (keyword.clone(), keyword.clone()),
        [horizontal] => (horizontal.clone(), Length::auto()),
        [horizontal, vertical] => (horizontal.clone(), vertical.clone()),
        _ => return false,
    };
    styles.background_size_x = Some(horizontal);
    styles.background_size_y = Some(vertical);
    true
}

/// Position keyword as a percentage, and whether it names an axis.
fn position_keyword(token: &str) -> Option<(Length, Option<bool>)> {
    let keyword = match token.to_ascii_lowercase().as_str() {
        "left" => (Length::percent(0.0), Some(true)),
        "right" => (Length::percent(100.0), Some(true)),
        "top" => (Length::percent(0.0), Some(false)),
        "bottom" => (Length::percent(100.0), Some(false)),
        "center" => (Length::percent(50.0), None),
        _ => return None,
    };
    Some(keyword)
}

/// Two-axis positions (`background-position`, `transform-origin`):
/// keywords or lengths, horizontal first unless a keyword says otherwise.
fn parse_position(value: &str) -> Option<(Length, Length)> {
    let tokens = split_whitespace_top_level(value);
    let mut parsed = Vec::with_capacity(2);
    for token in &tokens {
        match position_keyword(token) {
            Some(keyword) => parsed.push(keyword),
            None => parsed.push((Length::parse(token).filter(|len| !len.is_auto_like())?, None)),
        }
    }
    match parsed.as_slice() {
        [(single, axis)] => match axis {
            Some(false) => Some((Length::percent(50.0), single.clone())),
            _ => Some((single.clone(), Length::percent(50.0))),
        },
        [(first, Some(false)), (second, first_axis)] if *first_axis != Some(false) => {
            Some((second.clone(), first.clone()))
        }
        [(first, first_axis), (second, second_axis)]
            if *first_axis != Some(false) && *second_axis != Some(true) =>
        {
            Some((first.clone(), second.clone()))
        }
        _ => None,
    }
}

pub fn set_background_position(styles: &mut Styles, value: &str) -> bool {
    let Some((horizontal, vertical)) = parse_position(value) else {
        return false;
    };
    styles.background_position_x = Some(horizontal);
    styles.background_position_y = Some(vertical);
    true
}

pub fn set_transform_origin(styles: &mut Styles, value: &str) -> bool {
    let Some((horizontal, vertical)) = parse_position(value) else {
        return false;
    };
    styles.transform_origin_x = Some(horizontal);
    styles.transform_origin_y = Some(vertical);
    true
}
