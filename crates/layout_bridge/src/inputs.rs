//! Unit conversion from computed styles to layout inputs.

use css_styles::{
    Align, Display, Edges, FlexDirection, FlexWrap, Justify, OverflowMode, PositionMode, Styles,
};
use css_values_units::{Length, LengthContext, LengthUnit};
use log::debug;

/// A length as the layout engine understands it.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum LayoutValue {
    /// The engine's auto sentinel; never zero.
    #[default]
    Auto,
    Px(f32),
    /// Fraction of the containing block, `0.5` for `50%`.
    Percent(f32),
}

impl LayoutValue {
    pub const ZERO: Self = Self::Px(0.0);

    /// Pixel value against a containing block size; `None` for auto.
    pub fn resolve(self, base: f32) -> Option<f32> {
        match self {
            Self::Auto => None,
            Self::Px(px) => Some(px),
            Self::Percent(fraction) => Some(fraction * base),
        }
    }
}

/// Context required to pre-resolve font and viewport relative units.
/// `containing_block_*` are in pixels and only feed `calc()` expressions
/// that mix percentages with other units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LayoutContext {
    pub lengths: LengthContext,
    pub containing_block_width: f32,
    pub containing_block_height: f32,
}

impl LayoutContext {
    #[inline]
    pub const fn new(lengths: LengthContext) -> Self {
        Self {
            lengths,
            containing_block_width: 0.0,
            containing_block_height: 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_containing_block(mut self, width: f32, height: f32) -> Self {
        self.containing_block_width = width;
        self.containing_block_height = height;
        self
    }

    /// Convert one length. Margins, padding and insets in CSS resolve
    /// percentages against the containing block's width for every side, so
    /// callers pass the matching axis.
    pub fn convert(&self, length: &Length, base: f32) -> LayoutValue {
        match length.unit {
            LengthUnit::Pixels => LayoutValue::Px(length.value),
            LengthUnit::Percentage => LayoutValue::Percent(length.value / 100.0),
            LengthUnit::Auto | LengthUnit::Undefined | LengthUnit::Contain | LengthUnit::Cover => {
                LayoutValue::Auto
            }
            LengthUnit::Em
            | LengthUnit::RootEm
            | LengthUnit::ViewWidth
            | LengthUnit::ViewHeight
            | LengthUnit::ViewMin
            | LengthUnit::ViewMax
            | LengthUnit::Expression => {
                let reference = length.depends_on_container().then_some(base);
                length.to_pixels(&self.lengths, reference).map_or_else(
                    || {
                        debug!(target: "layout_bridge", "unresolvable length {length:?}, using auto");
                        LayoutValue::Auto
                    },
                    LayoutValue::Px,
                )
            }
        }
    }
}

/// Everything the layout engine is told about one node.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutInputs {
    pub display: Display,
    pub position: PositionMode,
    pub inset: Edges<LayoutValue>,
    pub width: LayoutValue,
    pub height: LayoutValue,
    pub min_width: LayoutValue,
    pub min_height: LayoutValue,
    pub max_width: LayoutValue,
    pub max_height: LayoutValue,
    pub aspect_ratio: Option<f32>,
    pub margin: Edges<LayoutValue>,
    pub padding: Edges<LayoutValue>,
    /// Border thickness in pixels.
    pub border: Edges<f32>,
    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub flex_basis: LayoutValue,
    pub justify_content: Option<Justify>,
    pub align_items: Option<Align>,
    pub align_self: Option<Align>,
    pub align_content: Option<Align>,
    pub row_gap: LayoutValue,
    pub column_gap: LayoutValue,
    pub overflow_x: OverflowMode,
    pub overflow_y: OverflowMode,
}

impl Default for LayoutInputs {
    fn default() -> Self {
        Self {
            display: Display::Flex,
            position: PositionMode::Relative,
            inset: Edges::default(),
            width: LayoutValue::Auto,
            height: LayoutValue::Auto,
            min_width: LayoutValue::Auto,
            min_height: LayoutValue::Auto,
            max_width: LayoutValue::Auto,
            max_height: LayoutValue::Auto,
            aspect_ratio: None,
            margin: Edges::uniform(LayoutValue::ZERO),
            padding: Edges::uniform(LayoutValue::ZERO),
            border: Edges::default(),
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::NoWrap,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            flex_basis: LayoutValue::Auto,
            justify_content: None,
            align_items: None,
            align_self: None,
            align_content: None,
            row_gap: LayoutValue::ZERO,
            column_gap: LayoutValue::ZERO,
            overflow_x: OverflowMode::Visible,
            overflow_y: OverflowMode::Visible,
        }
    }
}

/// Resolve the geometry properties of `styles` into engine inputs.
///
/// Unset sizes stay auto; unset margins, padding, borders and gaps are zero.
pub fn resolve_layout_inputs(styles: &Styles, context: &LayoutContext) -> LayoutInputs {
    let width = context.containing_block_width;
    let height = context.containing_block_height;
    let length = |value: Option<&Length>, base: f32, unset: LayoutValue| {
        value.map_or(unset, |set| context.convert(set, base))
    };
    let auto = LayoutValue::Auto;
    let zero = LayoutValue::ZERO;
    let border = |value: Option<&Length>| match length(value, width, zero) {
        LayoutValue::Px(px) => px.max(0.0),
        LayoutValue::Percent(fraction) => (fraction * width).max(0.0),
        LayoutValue::Auto => 0.0,
    };

    let defaults = LayoutInputs::default();
    LayoutInputs {
        display: styles.display.unwrap_or(defaults.display),
        position: styles.position.unwrap_or(defaults.position),
        inset: Edges::new(
            length(styles.top.as_ref(), height, auto),
            length(styles.right.as_ref(), width, auto),
            length(styles.bottom.as_ref(), height, auto),
            length(styles.left.as_ref(), width, auto),
        ),
        width: length(styles.width.as_ref(), width, auto),
        height: length(styles.height.as_ref(), height, auto),
        min_width: length(styles.min_width.as_ref(), width, auto),
        min_height: length(styles.min_height.as_ref(), height, auto),
        max_width: length(styles.max_width.as_ref(), width, auto),
        max_height: length(styles.max_height.as_ref(), height, auto),
        aspect_ratio: styles.aspect_ratio,
        margin: Edges::new(
            length(styles.margin_top.as_ref(), width, zero),
            length(styles.margin_right.as_ref(), width, zero),
            length(styles.margin_bottom.as_ref(), width, zero),
            length(styles.margin_left.as_ref(), width, zero),
        ),
        padding: Edges::new(
            length(styles.padding_top.as_ref(), width, zero),
            length(styles.padding_right.as_ref(), width, zero),
            length(styles.padding_bottom.as_ref(), width, zero),
            length(styles.padding_left.as_ref(), width, zero),
        ),
        border: Edges::new(
            border(styles.border_top_width.as_ref()),
            border(styles.border_right_width.as_ref()),
            border(styles.border_bottom_width.as_ref()),
            border(styles.border_left_width.as_ref()),
        ),
        flex_direction: styles.flex_direction.unwrap_or(defaults.flex_direction),
        flex_wrap: styles.flex_wrap.unwrap_or(defaults.flex_wrap),
        flex_grow: styles.flex_grow.unwrap_or(defaults.flex_grow),
        flex_shrink: styles.flex_shrink.unwrap_or(defaults.flex_shrink),
        flex_basis: length(styles.flex_basis.as_ref(), width, auto),
        justify_content: styles.justify_content,
        align_items: styles.align_items,
        align_self: styles.align_self,
        align_content: styles.align_content,
        row_gap: length(styles.row_gap.as_ref(), height, zero),
        column_gap: length(styles.column_gap.as_ref(), width, zero),
        overflow_x: styles.overflow_x.unwrap_or(defaults.overflow_x),
        overflow_y: styles.overflow_y.unwrap_or(defaults.overflow_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_is_delegated_as_a_fraction() {
        let context = LayoutContext::default().with_containing_block(200.0, 100.0);
        assert_eq!(context.convert(&Length::percent(50.0), 200.0), LayoutValue::Percent(0.5));
    }

    #[test]
    fn undefined_is_auto_not_zero() {
        let context = LayoutContext::default();
        assert_eq!(context.convert(&Length::undefined(), 0.0), LayoutValue::Auto);
        assert_eq!(context.convert(&Length::auto(), 0.0), LayoutValue::Auto);
    }
}
