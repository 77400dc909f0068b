//! Stylesheet syntax primitives: the `Parse` cursor, comment stripping,
//! nesting-aware splitting and the structural `ParseError`.
//!
//! The stylesheet language is CSS with SCSS-style variables, mixins and
//! nesting, so the tokenizer is a hand-written cursor rather than a CSS
//! Syntax Level 3 tokenizer. Value-level grammars (lengths, numbers) are
//! parsed with `cssparser` in `css_values_units`.

#![forbid(unsafe_code)]

mod comments;
mod cursor;
mod error;
mod scan;

pub use comments::strip_comments;
pub use cursor::Parse;
pub use error::{ParseError, ParseErrorKind};
pub use scan::{
    find_top_level, function_call, split_declarations, split_top_level,
    split_whitespace_top_level, unquote,
};

/// Whether `character` may appear in an identifier (property, class, variable).
#[inline]
pub fn is_identifier_char(character: char) -> bool {
    character.is_alphanumeric() || character == '-' || character == '_'
}
