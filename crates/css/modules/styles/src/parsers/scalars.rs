//! Single-token value parsers that have no dedicated value type.

use css_syntax::{function_call, split_top_level, unquote};
use css_values_units::number_from_str;

/// Integer properties (`z-index`, `order`).
pub fn parse_integer(text: &str) -> Option<i32> {
    text.trim().parse().ok()
}

/// `font-weight`: `normal`, `bold`, `lighter`, `bolder` or `1..=1000`.
pub fn parse_font_weight(text: &str) -> Option<i32> {
    let weight = match text.trim().to_ascii_lowercase().as_str() {
        "normal" => 400,
        "bold" => 700,
        "lighter" => 300,
        "bolder" => 800,
        other => other.parse().ok().filter(|value| (1..=1000).contains(value))?,
    };
    Some(weight)
}

/// `aspect-ratio`: `16 / 9` or a single number.
pub fn parse_ratio(text: &str) -> Option<f32> {
    let parts = split_top_level(text, '/');
    let ratio = match parts.as_slice() {
        [single] => number_from_str(single)?,
        [width, height] => {
            let divisor = number_from_str(height)?;
            if divisor == 0.0 {
                return None;
            }
            number_from_str(width)? / divisor
        }
        _ => return None,
    };
    (ratio > 0.0).then_some(ratio)
}

/// Free text such as `font-family` or `content`; one pair of quotes is removed.
pub fn parse_text(text: &str) -> Option<String> {
    let value = unquote(text);
    (!value.is_empty() || text.trim().len() >= 2).then(|| value.to_owned())
}

/// `background-image`: `url(...)`, a quoted path, or `none` (empty string).
pub fn parse_image(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("none") {
        return Some(String::new());
    }
    if let Some((name, argument)) = function_call(trimmed) {
        return name
            .eq_ignore_ascii_case("url")
            .then(|| unquote(argument).to_owned());
    }
    let unquoted = unquote(trimmed);
    (unquoted.len() != trimmed.len() && !unquoted.is_empty()).then(|| unquoted.to_owned())
}

/// `animation-iteration-count`: a non-negative number or `infinite`.
pub fn parse_iteration_count(text: &str) -> Option<f32> {
    if text.trim().eq_ignore_ascii_case("infinite") {
        return Some(f32::INFINITY);
    }
    number_from_str(text).filter(|count| *count >= 0.0)
}
