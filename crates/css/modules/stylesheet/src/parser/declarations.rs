//! Statements and flat declaration lists.

use css_styles::Styles;
use css_syntax::{Parse, ParseError, ParseErrorKind, find_top_level, is_identifier_char};
use log::warn;

/// Consume one statement up to a top-level `;`, `{` or `}`.
///
/// Returns the statement text and the terminator. A `;` is consumed; the
/// cursor is left on a `{` or `}`.
pub(super) fn read_statement<'src>(cursor: &mut Parse<'src>) -> (&'src str, Option<char>) {
    match cursor.find_statement_end() {
        Some((length, ';')) => {
            let text = cursor.take(length);
            cursor.advance(1);
            (text, Some(';'))
        }
        Some((length, terminator)) => (cursor.take(length), Some(terminator)),
        None => {
            let length = cursor.remaining().len();
            (cursor.take(length), None)
        }
    }
}

/// Split `name: value` and check the property name.
///
/// # Errors
/// Returns `ParseErrorKind::InvalidDeclaration` without location.
pub(super) fn split_declaration(text: &str) -> Result<(&str, &str), ParseError> {
    let Some((colon, _)) = find_top_level(text, &[':']) else {
        return Err(ParseError::new(
            ParseErrorKind::InvalidDeclaration,
            format!("expected 'name: value' but found '{}'", text.trim()),
        ));
    };
    let name = text.get(..colon).unwrap_or_default().trim();
    let value = text.get(colon.saturating_add(1)..).unwrap_or_default().trim();
    if name.is_empty() || !name.chars().all(is_identifier_char) {
        return Err(ParseError::new(
            ParseErrorKind::InvalidDeclaration,
            format!("invalid property name '{name}'"),
        ));
    }
    Ok((name, value))
}

/// Apply one declaration, logging values that do not parse.
pub(super) fn apply_declaration(
    styles: &mut Styles,
    name: &str,
    value: &str,
    file: Option<&str>,
    line: usize,
) {
    if !styles.set(name, value) {
        warn!(
            target: "css_stylesheet",
            "{}:{line}: ignoring '{name}: {value}'",
            file.unwrap_or("<inline>")
        );
    }
}

/// Parse flat `name: value;` declarations into `styles`.
///
/// Stops at the end of the cursor's window or before a closing `}`. Values
/// that do not parse are logged and skipped; variables and nested rules are
/// not understood here.
///
/// # Errors
/// Returns `ParseErrorKind::InvalidDeclaration` for statements that are not
/// declarations, and `Unexpected` for a nested `{` block.
pub fn parse_styles(cursor: &mut Parse<'_>, styles: &mut Styles) -> Result<(), ParseError> {
    loop {
        cursor.skip_whitespace();
        match cursor.current() {
            None | Some('}') => return Ok(()),
            Some(';') => {
                cursor.advance(1);
                continue;
            }
            Some(_) => {}
        }
        let start = cursor.position();
        let (text, terminator) = read_statement(cursor);
        if terminator == Some('{') {
            return Err(cursor.error_at(
                start,
                ParseErrorKind::Unexpected,
                "nested blocks are not allowed in a declaration list",
            ));
        }
        let (name, value) = split_declaration(text).map_err(|error| cursor.locate(start, error))?;
        let line = cursor.location(start).0;
        apply_declaration(styles, name, value, cursor.file(), line);
    }
}
