//! Flex, gap and overflow shorthands.

use css_syntax::split_whitespace_top_level;
use css_values_units::{Length, number_from_str};

use crate::Styles;
use crate::keywords::{FlexDirection, FlexWrap, OverflowMode};

/// `flex: none | auto | <grow> [<shrink>] || <basis>`.
pub fn set_flex(styles: &mut Styles, value: &str) -> bool {
    let (grow, shrink, basis) = match value.trim().to_ascii_lowercase().as_str() {
        "none" => (0.0, 0.0, Length::auto()),
        "auto" => (1.0, 1.0, Length::auto()),
        "initial" => (0.0, 1.0, Length::auto()),
        _ => {
            let mut factors = Vec::with_capacity(2);
            let mut basis = None;
            for token in split_whitespace_top_level(value) {
                if let Some(number) = number_from_str(token).filter(|_| basis.is_none()) {
                    if factors.len() == 2 {
                        return false;
                    }
                    factors.push(number);
                } else if let Some(length) = Length::parse(token) {
                    if basis.replace(length).is_some() {
                        return false;
                    }
                } else {
                    return false;
                }
            }
            match (factors.as_slice(), basis) {
                ([], None) => return false,
                ([], Some(basis)) => (1.0, 1.0, basis),
                (&[grow], basis) => (grow, 1.0, basis.unwrap_or_else(|| Length::px(0.0))),
                (&[grow, shrink], basis) => {
                    (grow, shrink, basis.unwrap_or_else(|| Length::px(0.0)))
                }
                _ => return false,
            }
        }
    };
    styles.flex_grow = Some(grow);
    styles.flex_shrink = Some(shrink);
    styles.flex_basis = Some(basis);
    true
}

/// `flex-flow: <direction> || <wrap>`.
pub fn set_flex_flow(styles: &mut Styles, value: &str) -> bool {
    let mut direction = None;
    let mut wrap = None;
    for token in split_whitespace_top_level(value) {
        if let Some(parsed) = FlexDirection::parse(token) {
            if direction.replace(parsed).is_some() {
                return false;
            }
        } else if let Some(parsed) = FlexWrap::parse(token) {
            if wrap.replace(parsed).is_some() {
                return false;
            }
        } else {
            return false;
        }
    }
    if direction.is_none() && wrap.is_none() {
        return false;
    }
    if direction.is_some() {
        styles.flex_direction = direction;
    }
    if wrap.is_some() {
        styles.flex_wrap = wrap;
    }
    true
}

/// `gap: <row> [<column>]`.
pub fn set_gap(styles: &mut Styles, value: &str) -> bool {
    let Some(lengths) = split_whitespace_top_level(value)
        .into_iter()
        .map(Length::parse)
        .collect::<Option<Vec<_>>>()
    else {
        return false;
    };
    match lengths.as_slice() {
        [both] => {
            styles.row_gap = Some(both.clone());
            styles.column_gap = Some(both.clone());
        }
        [row, column] => {
            styles.row_gap = Some(row.clone());
            styles.column_gap = Some(column.clone());
        }
        _ => return false,
    }
    true
}

/// `overflow: <x> [<y>]`.
pub fn set_overflow(styles: &mut Styles, value: &str) -> bool {
    let Some(modes) = split_whitespace_top_level(value)
        .into_iter()
        .map(OverflowMode::parse)
        .collect::<Option<Vec<_>>>()
    else {
        return false;
    };
    match modes.as_slice() {
        &[both] => {
            styles.overflow_x = Some(both);
            styles.overflow_y = Some(both);
        }
        &[horizontal, vertical] => {
            styles.overflow_x = Some(horizontal);
            styles.overflow_y = Some(vertical);
        }
        _ => return false,
    }
    true
}
