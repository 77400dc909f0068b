//! Bracket- and quote-aware scanning helpers.
//!
//! Stylesheet values nest freely (`rgba(mix(red, blue), 0.5)`, `url("a;b")`),
//! so every split in the parser goes through these helpers instead of a plain
//! `str::split`.

/// Tracks quote and bracket nesting while walking a string.
#[derive(Clone, Copy, Debug, Default)]
struct Nesting {
    /// Active quote character, if inside a string.
    quote: Option<char>,
    /// Whether the previous character was a backslash inside a string.
    escaped: bool,
    /// Parenthesis/bracket depth.
    depth: usize,
}

impl Nesting {
    /// Feed one character; returns `true` when the character sits at top level
    /// (outside quotes and brackets) and is not itself a bracket or quote.
    #[inline]
    fn feed(&mut self, character: char) -> bool {
        if let Some(open) = self.quote {
            if self.escaped {
                self.escaped = false;
            } else if character == '\\' {
                self.escaped = true;
            } else if character == open {
                self.quote = None;
            }
            return false;
        }
        match character {
            '"' | '\'' => {
                self.quote = Some(character);
                false
            }
            '(' | '[' => {
                self.depth = self.depth.saturating_add(1);
                false
            }
            ')' | ']' => {
                self.depth = self.depth.saturating_sub(1);
                false
            }
            _ => self.depth == 0,
        }
    }
}

/// Find the first top-level occurrence of any of `targets`.
///
/// Returns the byte offset and the character found.
pub fn find_top_level(text: &str, targets: &[char]) -> Option<(usize, char)> {
    let mut nesting = Nesting::default();
    for (offset, character) in text.char_indices() {
        if nesting.feed(character) && targets.contains(&character) {
            return Some((offset, character));
        }
    }
    None
}

/// Split `text` on a top-level delimiter; every piece is trimmed and empty
/// pieces are kept so callers can reject `a,,b`.
pub fn split_top_level(text: &str, delimiter: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut nesting = Nesting::default();
    let mut start = 0usize;
    for (offset, character) in text.char_indices() {
        if nesting.feed(character) && character == delimiter {
            pieces.push(text.get(start..offset).unwrap_or_default().trim());
            start = offset.saturating_add(character.len_utf8());
        }
    }
    pieces.push(text.get(start..).unwrap_or_default().trim());
    pieces
}

/// Split on top-level whitespace, dropping empty pieces.
///
/// `1px 2px rgba(0, 0, 0, 0.5)` yields three pieces.
pub fn split_whitespace_top_level(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut nesting = Nesting::default();
    let mut start: Option<usize> = None;
    for (offset, character) in text.char_indices() {
        let top_level = nesting.feed(character);
        if top_level && character.is_whitespace() {
            if let Some(begin) = start.take() {
                pieces.push(text.get(begin..offset).unwrap_or_default());
            }
        } else if start.is_none() {
            start = Some(offset);
        }
    }
    if let Some(begin) = start {
        pieces.push(text.get(begin..).unwrap_or_default());
    }
    pieces
}

/// Split flat declaration text (`width: 10px; color: red`) into trimmed
/// `(name, value)` pairs. Pieces without a top-level `:` are returned with an
/// empty name so the caller can report them.
pub fn split_declarations(text: &str) -> Vec<(&str, &str)> {
    split_top_level(text, ';')
        .into_iter()
        .filter(|piece| !piece.is_empty())
        .map(|piece| match find_top_level(piece, &[':']) {
            Some((offset, _)) => (
                piece.get(..offset).unwrap_or_default().trim(),
                piece.get(offset.saturating_add(1)..).unwrap_or_default().trim(),
            ),
            None => ("", piece),
        })
        .collect()
}

/// Remove one pair of matching surrounding quotes, if present.
pub fn unquote(text: &str) -> &str {
    let trimmed = text.trim();
    for quote in ['"', '\''] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return trimmed
                .get(1..trimmed.len().saturating_sub(1))
                .unwrap_or(trimmed);
        }
    }
    trimmed
}

/// If `text` is a single function call `name(args)`, return `(name, args)`.
///
/// The function name is returned as written; callers compare it
/// case-insensitively.
pub fn function_call(text: &str) -> Option<(&str, &str)> {
    let trimmed = text.trim();
    let open = trimmed.find('(')?;
    let name = trimmed.get(..open)?.trim();
    if name.is_empty()
        || !name
            .chars()
            .all(|character| character.is_alphanumeric() || character == '-' || character == '_')
    {
        return None;
    }
    let inner = trimmed.get(open..)?;
    // The opening paren must close exactly at the end of the text.
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (offset, character) in inner.char_indices() {
        if let Some(open_quote) = quote {
            if character == open_quote {
                quote = None;
            }
            continue;
        }
        match character {
            '"' | '\'' => quote = Some(character),
            '(' => depth = depth.saturating_add(1),
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return (offset.saturating_add(1) == inner.len())
                        .then(|| inner.get(1..offset).unwrap_or_default().trim())
                        .map(|args| (name, args));
                }
            }
            _ => {}
        }
    }
    None
}
