//! Structural parse errors shared by every stylesheet-facing crate.

use core::error::Error;
use core::fmt;

/// Category of a structural parse failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A `{` without its matching `}`.
    UnterminatedBlock,
    /// An `@rule` the parser does not understand.
    UnknownAtRule,
    /// Two keyframe blocks claim the same interval.
    DuplicateKeyframe,
    /// A block with no selector in front of it.
    MissingSelector,
    /// A selector that does not follow the selector grammar.
    InvalidSelector,
    /// A `$variable` referenced before it was bound.
    MissingVariable,
    /// A malformed `$variable: value;` statement.
    InvalidVariable,
    /// A malformed `@mixin` definition.
    InvalidMixin,
    /// `@include` arguments that cannot be bound to the mixin parameters.
    MixinArguments,
    /// `@include` of a mixin that was never defined.
    UnknownMixin,
    /// A declaration that is not `name: value`.
    InvalidDeclaration,
    /// An `@import` that could not be resolved.
    Import,
    /// `@include` nested deeper than the expansion limit.
    RecursionLimit,
    /// Any other unexpected input.
    Unexpected,
}

impl ParseErrorKind {
    /// Short human-readable label for the kind.
    pub const fn label(self) -> &'static str {
        match self {
            Self::UnterminatedBlock => "unterminated block",
            Self::UnknownAtRule => "unknown at-rule",
            Self::DuplicateKeyframe => "duplicate keyframe",
            Self::MissingSelector => "missing selector",
            Self::InvalidSelector => "invalid selector",
            Self::MissingVariable => "missing variable",
            Self::InvalidVariable => "invalid variable",
            Self::InvalidMixin => "invalid mixin",
            Self::MixinArguments => "mixin arguments",
            Self::UnknownMixin => "unknown mixin",
            Self::InvalidDeclaration => "invalid declaration",
            Self::Import => "import",
            Self::RecursionLimit => "recursion limit",
            Self::Unexpected => "unexpected input",
        }
    }
}

/// A structural stylesheet error with its source location.
///
/// `line` and `column` are 1-based; both are 0 when the error was raised
/// outside of any cursor (for example while binding mixin arguments).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    message: String,
    file: Option<String>,
    line: usize,
    column: usize,
}

impl ParseError {
    /// Build an error without location information.
    #[inline]
    pub fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            file: None,
            line: 0,
            column: 0,
        }
    }

    /// Attach a location unless one is already known.
    #[must_use]
    pub fn located(mut self, file: Option<&str>, line: usize, column: usize) -> Self {
        if self.line == 0 {
            self.line = line;
            self.column = column;
        }
        if self.file.is_none() {
            self.file = file.map(ToOwned::to_owned);
        }
        self
    }

    #[inline]
    pub const fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    #[inline]
    pub const fn line(&self) -> usize {
        self.line
    }

    #[inline]
    pub const fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(formatter, "{file}:")?;
        }
        if self.line > 0 {
            write!(formatter, "{}:{}: ", self.line, self.column)?;
        } else if self.file.is_some() {
            formatter.write_str(" ")?;
        }
        write!(formatter, "{}: {}", self.kind.label(), self.message)
    }
}

impl Error for ParseError {}
