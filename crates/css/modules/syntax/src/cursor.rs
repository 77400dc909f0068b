//! A byte cursor over stylesheet text.
//!
//! Child cursors created by [`Parse::read_block`] keep pointing into the same
//! source so error locations are always reported against the original text.

use crate::error::{ParseError, ParseErrorKind};
use crate::scan::find_top_level;

/// Cursor over a window of stylesheet source.
#[derive(Clone, Debug)]
pub struct Parse<'src> {
    /// Full source text; windows index into it.
    source: &'src str,
    /// Current byte offset into `source`.
    position: usize,
    /// Exclusive end of this cursor's window.
    end: usize,
    /// File name used for diagnostics.
    file: Option<&'src str>,
    /// Lines preceding `source` in the file it was cut from.
    line_offset: usize,
}

impl<'src> Parse<'src> {
    /// Cursor over the whole of `source`.
    #[inline]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            position: 0,
            end: source.len(),
            file: None,
            line_offset: 0,
        }
    }

    /// Attach a file name for diagnostics.
    #[inline]
    #[must_use]
    pub const fn with_file(mut self, file: Option<&'src str>) -> Self {
        self.file = file;
        self
    }

    /// Shift reported line numbers, for text cut out of a larger file.
    #[inline]
    #[must_use]
    pub const fn with_line_offset(mut self, lines: usize) -> Self {
        self.line_offset = lines;
        self
    }

    #[inline]
    pub const fn file(&self) -> Option<&'src str> {
        self.file
    }

    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Rewind or fast-forward within the window.
    #[inline]
    pub fn set_position(&mut self, position: usize) {
        self.position = position.min(self.end);
    }

    #[inline]
    pub const fn is_end(&self) -> bool {
        self.position >= self.end
    }

    /// Unconsumed text of this window.
    #[inline]
    pub fn remaining(&self) -> &'src str {
        self.source.get(self.position..self.end).unwrap_or_default()
    }

    #[inline]
    pub fn current(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.remaining().starts_with(prefix)
    }

    /// ASCII case-insensitive prefix test.
    pub fn starts_with_ignore_case(&self, prefix: &str) -> bool {
        self.remaining()
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    }

    /// Move forward by `bytes`, clamped to the window. Callers only pass
    /// lengths of text they have just inspected, so the result stays on a
    /// character boundary.
    #[inline]
    pub fn advance(&mut self, bytes: usize) {
        self.position = self.position.saturating_add(bytes).min(self.end);
    }

    /// Consume and return the next `bytes` of input.
    pub fn take(&mut self, bytes: usize) -> &'src str {
        let start = self.position;
        self.advance(bytes);
        self.source.get(start..self.position).unwrap_or_default()
    }

    /// Skip whitespace including newlines; returns whether anything was skipped.
    pub fn skip_whitespace(&mut self) -> bool {
        let before = self.position;
        let skipped = self
            .remaining()
            .chars()
            .take_while(|character| character.is_whitespace())
            .map(char::len_utf8)
            .sum::<usize>();
        self.advance(skipped);
        self.position != before
    }

    /// Consume the character `expected` or fail.
    ///
    /// # Errors
    /// Returns `ParseErrorKind::Unexpected` when the next character differs.
    pub fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.current() {
            Some(found) if found == expected => {
                self.advance(found.len_utf8());
                Ok(())
            }
            Some(found) => Err(self.error(
                ParseErrorKind::Unexpected,
                format!("expected '{expected}' but found '{found}'"),
            )),
            None => Err(self.error(
                ParseErrorKind::Unexpected,
                format!("expected '{expected}' but reached the end of input"),
            )),
        }
    }

    /// Consume an identifier made of alphanumerics, `-` and `_`.
    pub fn read_identifier(&mut self) -> &'src str {
        let length = self
            .remaining()
            .chars()
            .take_while(|character| {
                character.is_alphanumeric() || *character == '-' || *character == '_'
            })
            .map(char::len_utf8)
            .sum::<usize>();
        self.take(length)
    }

    /// Find where the statement starting at the cursor ends.
    ///
    /// Returns the byte length up to the first top-level `;`, `{` or `}` and
    /// that character, or `None` when the statement runs to the end of the
    /// window.
    pub fn find_statement_end(&self) -> Option<(usize, char)> {
        find_top_level(self.remaining(), &[';', '{', '}'])
    }

    /// Consume a `{ ... }` block and return a cursor over its contents.
    ///
    /// # Errors
    /// Returns `ParseErrorKind::UnterminatedBlock` when the closing brace is
    /// missing, or `Unexpected` when the cursor is not on `{`.
    pub fn read_block(&mut self) -> Result<Self, ParseError> {
        let open = self.position;
        self.expect('{')?;
        let mut depth = 1usize;
        let mut quote: Option<char> = None;
        let mut escaped = false;
        for (offset, character) in self.remaining().char_indices() {
            if let Some(open_quote) = quote {
                if escaped {
                    escaped = false;
                } else if character == '\\' {
                    escaped = true;
                } else if character == open_quote {
                    quote = None;
                }
                continue;
            }
            match character {
                '"' | '\'' => quote = Some(character),
                '{' => depth = depth.saturating_add(1),
                '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        let start = self.position;
                        let close = start.saturating_add(offset);
                        self.position = close.saturating_add(1);
                        return Ok(Self {
                            source: self.source,
                            position: start,
                            end: close,
                            file: self.file,
                            line_offset: self.line_offset,
                        });
                    }
                }
                _ => {}
            }
        }
        Err(self.error_at(
            open,
            ParseErrorKind::UnterminatedBlock,
            "missing closing '}'",
        ))
    }

    /// 1-based line and column of a byte offset into the source.
    pub fn location(&self, position: usize) -> (usize, usize) {
        let head = self.source.get(..position).unwrap_or(self.source);
        let line = head
            .chars()
            .filter(|character| *character == '\n')
            .count()
            .saturating_add(1)
            .saturating_add(self.line_offset);
        let column = head
            .rsplit('\n')
            .next()
            .map_or(0, |tail| tail.chars().count())
            .saturating_add(1);
        (line, column)
    }

    /// Line of the cursor, used to stamp blocks.
    #[inline]
    pub fn line(&self) -> usize {
        self.location(self.position).0
    }

    /// Lines consumed before `position`, suitable for [`Parse::with_line_offset`]
    /// on text that starts at `position`.
    pub fn lines_before(&self, position: usize) -> usize {
        self.location(position).0.saturating_sub(1)
    }

    /// Error at the cursor.
    pub fn error(&self, kind: ParseErrorKind, message: impl Into<String>) -> ParseError {
        self.error_at(self.position, kind, message)
    }

    /// Error at an explicit byte offset.
    pub fn error_at(
        &self,
        position: usize,
        kind: ParseErrorKind,
        message: impl Into<String>,
    ) -> ParseError {
        let (line, column) = self.location(position);
        ParseError::new(kind, message).located(self.file, line, column)
    }

    /// Attach this cursor's location to an error that was raised without one.
    pub fn locate(&self, position: usize, error: ParseError) -> ParseError {
        let (line, column) = self.location(position);
        error.located(self.file, line, column)
    }
}
