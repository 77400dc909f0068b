//! The seam between panels and the layout algorithm.

use anyhow::Result;
use css_styles::Styles;
use tracing::trace_span;

use crate::inputs::{LayoutContext, LayoutInputs, resolve_layout_inputs};
use crate::rect::LayoutRect;

/// A flexbox layout engine treated as a black box: it accepts resolved
/// inputs per node and produces rectangles.
pub trait LayoutEngine {
    type Node: Copy + Eq;

    fn create_node(&mut self) -> Result<Self::Node>;

    fn remove_node(&mut self, node: Self::Node) -> Result<()>;

    /// Replace the ordered child list of `parent`.
    fn set_children(&mut self, parent: Self::Node, children: &[Self::Node]) -> Result<()>;

    fn set_inputs(&mut self, node: Self::Node, inputs: &LayoutInputs) -> Result<()>;

    /// Lay out the tree under `root` within the available size.
    fn compute(&mut self, root: Self::Node, width: f32, height: f32) -> Result<()>;

    /// Rectangle from the last [`LayoutEngine::compute`], relative to the parent.
    fn rect(&self, node: Self::Node) -> Result<LayoutRect>;
}

/// Resolve `styles` against `context` and push the result to `node`.
///
/// # Errors
/// Propagates the engine's error for an unknown node.
pub fn push_styles<E: LayoutEngine>(
    engine: &mut E,
    node: E::Node,
    styles: &Styles,
    context: &LayoutContext,
) -> Result<LayoutInputs> {
    let _span = trace_span!("push_styles").entered();
    let inputs = resolve_layout_inputs(styles, context);
    engine.set_inputs(node, &inputs)?;
    Ok(inputs)
}
