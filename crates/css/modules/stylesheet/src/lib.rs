//! Panel stylesheets: the parsed sheet model and the SCSS-flavoured parser
//! that produces it.
//!
//! Supported:
//! - Rule blocks with comma separated selectors and `&` nesting
//! - `$variables` with `!default` and block-local scope
//! - `@mixin`/`@include` with positional, named and variadic parameters and
//!   `@content`
//! - `@keyframes` with `from`/`to` and percentage lists
//! - `@import` through a [`FileSystem`]

#![forbid(unsafe_code)]

mod fs;
mod keyframes;
mod mixin;
mod parser;
mod sheet;

pub use fs::{FileSystem, MemoryFileSystem, OsFileSystem, normalize_path};
pub use keyframes::{Keyframe, KeyframeBlock};
pub use mixin::{MixinArgument, MixinDefinition, MixinParameter};
pub use parser::{MAX_INCLUDE_DEPTH, StyleParser, parse_styles};
pub use sheet::{StyleBlock, StyleSheet};

pub use css_syntax::strip_comments;
