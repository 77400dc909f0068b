//! [`LayoutEngine`] backed by `taffy`'s flexbox implementation.

use anyhow::{Context as _, Result};
use css_styles::{
    Align, Display, Edges, FlexDirection, FlexWrap, Justify, OverflowMode, PositionMode,
};
use log::trace;
use taffy::{
    AlignContent, AlignItems, AvailableSpace, Dimension, Display as TaffyDisplay,
    FlexDirection as TaffyDirection, FlexWrap as TaffyWrap, LengthPercentage,
    LengthPercentageAuto, NodeId, Overflow, Point, Position, Rect, Size, Style, TaffyTree,
};
use tracing::debug_span;

use crate::engine::LayoutEngine;
use crate::inputs::{LayoutInputs, LayoutValue};
use crate::rect::LayoutRect;

/// A `taffy` tree holding one leaf per panel.
#[derive(Default)]
pub struct TaffyLayout {
    tree: TaffyTree<()>,
}

impl TaffyLayout {
    pub fn new() -> Self {
        Self {
            tree: TaffyTree::new(),
        }
    }

    /// Nodes currently alive in the tree.
    pub fn node_count(&self) -> usize {
        self.tree.total_node_count()
    }
}

impl LayoutEngine for TaffyLayout {
    type Node = NodeId;

    fn create_node(&mut self) -> Result<NodeId> {
        self.tree
            .new_leaf(Style::default())
            .context("creating layout node")
    }

    fn remove_node(&mut self, node: NodeId) -> Result<()> {
        self.tree
            .remove(node)
            .map(|_| ())
            .with_context(|| format!("removing layout node {node:?}"))
    }

    fn set_children(&mut self, parent: NodeId, children: &[NodeId]) -> Result<()> {
        self.tree
            .set_children(parent, children)
            .with_context(|| format!("setting children of layout node {parent:?}"))
    }

    fn set_inputs(&mut self, node: NodeId, inputs: &LayoutInputs) -> Result<()> {
        self.tree
            .set_style(node, to_taffy_style(inputs))
            .with_context(|| format!("setting style of layout node {node:?}"))
    }

    fn compute(&mut self, root: NodeId, width: f32, height: f32) -> Result<()> {
        let _span = debug_span!("taffy_compute", width, height).entered();
        let available = Size {
            width: AvailableSpace::Definite(width),
            height: AvailableSpace::Definite(height),
        };
        self.tree
            .compute_layout(root, available)
            .context("computing layout")?;
        trace!(target: "layout_bridge", "computed layout for {} nodes", self.node_count());
        Ok(())
    }

    fn rect(&self, node: NodeId) -> Result<LayoutRect> {
        let layout = self
            .tree
            .layout(node)
            .with_context(|| format!("reading layout of node {node:?}"))?;
        Ok(LayoutRect {
            x: layout.location.x,
            y: layout.location.y,
            width: layout.size.width,
            height: layout.size.height,
            padding: edges(layout.padding),
            margin: edges(layout.margin),
            border: edges(layout.border),
        })
    }
}

fn edges(rect: Rect<f32>) -> Edges<f32> {
    Edges::new(rect.top, rect.right, rect.bottom, rect.left)
}

/// Convert resolved inputs into a `taffy` style.
fn to_taffy_style(inputs: &LayoutInputs) -> Style {
    Style {
        display: match inputs.display {
            Display::Flex => TaffyDisplay::Flex,
            Display::None => TaffyDisplay::None,
        },
        position: match inputs.position {
            PositionMode::Relative => Position::Relative,
            PositionMode::Absolute => Position::Absolute,
        },
        overflow: Point {
            x: overflow(inputs.overflow_x),
            y: overflow(inputs.overflow_y),
        },
        inset: rect_of(&inputs.inset, length_percentage_auto),
        size: Size {
            width: dimension(inputs.width),
            height: dimension(inputs.height),
        },
        min_size: Size {
            width: dimension(inputs.min_width),
            height: dimension(inputs.min_height),
        },
        max_size: Size {
            width: dimension(inputs.max_width),
            height: dimension(inputs.max_height),
        },
        aspect_ratio: inputs.aspect_ratio,
        margin: rect_of(&inputs.margin, length_percentage_auto),
        padding: rect_of(&inputs.padding, length_percentage),
        border: Rect {
            top: LengthPercentage::length(inputs.border.top),
            right: LengthPercentage::length(inputs.border.right),
            bottom: LengthPercentage::length(inputs.border.bottom),
            left: LengthPercentage::length(inputs.border.left),
        },
        gap: Size {
            width: length_percentage(inputs.column_gap),
            height: length_percentage(inputs.row_gap),
        },
        align_items: inputs.align_items.and_then(align_items),
        align_self: inputs.align_self.and_then(align_items),
        align_content: inputs.align_content.and_then(align_content),
        justify_content: inputs.justify_content.map(justify_content),
        flex_direction: match inputs.flex_direction {
            FlexDirection::Row => TaffyDirection::Row,
            FlexDirection::RowReverse => TaffyDirection::RowReverse,
            FlexDirection::Column => TaffyDirection::Column,
            FlexDirection::ColumnReverse => TaffyDirection::ColumnReverse,
        },
        flex_wrap: match inputs.flex_wrap {
            FlexWrap::NoWrap => TaffyWrap::NoWrap,
            FlexWrap::Wrap => TaffyWrap::Wrap,
            FlexWrap::WrapReverse => TaffyWrap::WrapReverse,
        },
        flex_grow: inputs.flex_grow,
        flex_shrink: inputs.flex_shrink,
        flex_basis: dimension(inputs.flex_basis),
        ..Style::default()
    }
}

fn rect_of<T>(values: &Edges<LayoutValue>, convert: fn(LayoutValue) -> T) -> Rect<T> {
    Rect {
        top: convert(values.top),
        right: convert(values.right),
        bottom: convert(values.bottom),
        left: convert(values.left),
    }
}

fn dimension(value: LayoutValue) -> Dimension {
    match value {
        LayoutValue::Auto => Dimension::auto(),
        LayoutValue::Px(px) => Dimension::length(px),
        LayoutValue::Percent(fraction) => Dimension::percent(fraction),
    }
}

fn length_percentage_auto(value: LayoutValue) -> LengthPercentageAuto {
    match value {
        LayoutValue::Auto => LengthPercentageAuto::auto(),
        LayoutValue::Px(px) => LengthPercentageAuto::length(px),
        LayoutValue::Percent(fraction) => LengthPercentageAuto::percent(fraction),
    }
}

/// Padding and gaps have no auto; it collapses to zero.
fn length_percentage(value: LayoutValue) -> LengthPercentage {
    match value {
        LayoutValue::Auto => LengthPercentage::length(0.0),
        LayoutValue::Px(px) => LengthPercentage::length(px),
        LayoutValue::Percent(fraction) => LengthPercentage::percent(fraction),
    }
}

const fn overflow(mode: OverflowMode) -> Overflow {
    match mode {
        OverflowMode::Visible => Overflow::Visible,
        OverflowMode::Hidden => Overflow::Hidden,
        OverflowMode::Scroll => Overflow::Scroll,
    }
}

const fn align_items(align: Align) -> Option<AlignItems> {
    match align {
        Align::FlexStart => Some(AlignItems::FlexStart),
        Align::FlexEnd => Some(AlignItems::FlexEnd),
        Align::Center => Some(AlignItems::Center),
        Align::Stretch => Some(AlignItems::Stretch),
        Align::Baseline => Some(AlignItems::Baseline),
        Align::Auto | Align::SpaceBetween | Align::SpaceAround | Align::SpaceEvenly => None,
    }
}

const fn align_content(align: Align) -> Option<AlignContent> {
    match align {
        Align::FlexStart | Align::Baseline => Some(AlignContent::FlexStart),
        Align::FlexEnd => Some(AlignContent::FlexEnd),
        Align::Center => Some(AlignContent::Center),
        Align::Stretch => Some(AlignContent::Stretch),
        Align::SpaceBetween => Some(AlignContent::SpaceBetween),
        Align::SpaceAround => Some(AlignContent::SpaceAround),
        Align::SpaceEvenly => Some(AlignContent::SpaceEvenly),
        Align::Auto => None,
    }
}

const fn justify_content(justify: Justify) -> AlignContent {
    match justify {
        Justify::FlexStart => AlignContent::FlexStart,
        Justify::FlexEnd => AlignContent::FlexEnd,
        Justify::Center => AlignContent::Center,
        Justify::SpaceBetween => AlignContent::SpaceBetween,
        Justify::SpaceAround => AlignContent::SpaceAround,
        Justify::SpaceEvenly => AlignContent::SpaceEvenly,
    }
}
