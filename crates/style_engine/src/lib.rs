//! Retained panel tree styling.
//!
//! Panels carry an element name, an id, classes and dynamic pseudo-class
//! flags, and may have stylesheets attached. Every [`StyleEngine::tick`]
//! recomputes, parents before children, the cascade for panels whose style
//! generation moved and pushes layout inputs for panels whose layout
//! generation moved, then lays out each root.

#![forbid(unsafe_code)]

mod capabilities;
mod config;
mod engine;
mod registry;
mod tree;

pub use capabilities::Capabilities;
pub use config::StyleConfig;
pub use engine::{PerfCounters, StyleEngine};
pub use registry::{SheetId, SheetRegistry};
pub use tree::{Generations, Panel, PanelId, PanelTree};
