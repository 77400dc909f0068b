//! Margin, padding and inset shorthands.

use css_syntax::split_whitespace_top_level;
use css_values_units::Length;

use crate::Styles;
use crate::model::Edges;

/// Parse one to four lengths into edges.
pub fn parse_length_edges(value: &str) -> Option<Edges<Length>> {
    let lengths = split_whitespace_top_level(value)
        .into_iter()
        .map(Length::parse)
        .collect::<Option<Vec<_>>>()?;
    Edges::from_slice(&lengths)
}

pub fn set_margin(styles: &mut Styles, value: &str) -> bool {
    let Some(edges) = parse_length_edges(value) else {
        return false;
    };
    styles.margin_top = Some(edges.top);
    styles.margin_right = Some(edges.right);
    styles.margin_bottom = Some(edges.bottom);
    styles.margin_left = Some(edges.left);
    true
}

pub fn set_padding(styles: &mut Styles, value: &str) -> bool {
    let Some(edges) = parse_length_edges(value) else {
        return false;
    };
    styles.padding_top = Some(edges.top);
    styles.padding_right = Some(edges.right);
    styles.padding_bottom = Some(edges.bottom);
    styles.padding_left = Some(edges.left);
    true
}

pub fn set_inset(styles: &mut Styles, value: &str) -> bool {
    let Some(edges) = parse_length_edges(value) else {
        return false;
    };
    styles.top = Some(edges.top);
    styles.right = Some(edges.right);
    styles.bottom = Some(edges.bottom);
    styles.left = Some(edges.left);
    true
}
