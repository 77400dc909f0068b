//! Style-to-layout bridge.
//!
//! Converts computed panel styles into the inputs of a flexbox layout engine
//! and reads the resulting rectangles back. The layout algorithm itself lives
//! behind [`LayoutEngine`]; [`TaffyLayout`] is the bundled implementation.

#![forbid(unsafe_code)]

mod engine;
mod inputs;
mod rect;
mod taffy_engine;

pub use engine::{LayoutEngine, push_styles};
pub use css_styles::Edges;
pub use inputs::{LayoutContext, LayoutInputs, LayoutValue, resolve_layout_inputs};
pub use rect::LayoutRect;
pub use taffy_engine::TaffyLayout;
