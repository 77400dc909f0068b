//! Stylesheet `$variables`: scoped tables, `!default` binding and textual
//! substitution.
//!
//! Variables are resolved while the sheet is parsed, so every stored value is
//! already substituted and lookups never recurse. Names are case-insensitive
//! and stored without the leading `$`; values keep their case.

#![forbid(unsafe_code)]

use core::mem;
use std::collections::HashMap;

use css_syntax::{ParseError, ParseErrorKind, is_identifier_char};

/// Variable name (normalized) to substituted value.
pub type VariableMap = HashMap<String, String>;

/// Normalize a variable name: trim, drop a leading `$`, ASCII lowercase.
#[inline]
pub fn normalize_name(name: &str) -> String {
    name.trim().trim_start_matches('$').to_ascii_lowercase()
}

/// Split a trailing `!default` flag off a variable value.
///
/// `"red !default"` gives `("red", true)`; anything else is returned trimmed
/// with `false`.
pub fn split_default_flag(value: &str) -> (&str, bool) {
    let trimmed = value.trim();
    let Some(bang) = trimmed.rfind('!') else {
        return (trimmed, false);
    };
    let flag = trimmed.get(bang.saturating_add(1)..).unwrap_or_default().trim();
    if flag.eq_ignore_ascii_case("default") {
        (trimmed.get(..bang).unwrap_or_default().trim(), true)
    } else {
        (trimmed, false)
    }
}

/// Replace every `$name` outside quoted strings using `lookup`.
///
/// `lookup` receives normalized names.
///
/// # Errors
/// Returns `ParseErrorKind::MissingVariable` for the first name `lookup`
/// does not know.
pub fn substitute<'vars, F>(text: &str, lookup: F) -> Result<String, ParseError>
where
    F: Fn(&str) -> Option<&'vars str>,
{
    if !text.contains('$') {
        return Ok(text.to_owned());
    }
    let mut out = String::with_capacity(text.len());
    let mut quote: Option<char> = None;
    let mut chars = text.char_indices().peekable();
    while let Some((offset, character)) = chars.next() {
        if let Some(open) = quote {
            if character == open {
                quote = None;
            }
            out.push(character);
            continue;
        }
        match character {
            '"' | '\'' => {
                quote = Some(character);
                out.push(character);
            }
            '$' if chars.peek().is_some_and(|&(_, next)| is_identifier_char(next)) => {
                let start = offset.saturating_add(1);
                let mut end = start;
                while let Some(&(next_offset, next)) = chars.peek() {
                    if !is_identifier_char(next) {
                        break;
                    }
                    end = next_offset.saturating_add(next.len_utf8());
                    chars.next();
                }
                let name = text.get(start..end).unwrap_or_default();
                let value = lookup(&name.to_ascii_lowercase()).ok_or_else(|| {
                    ParseError::new(
                        ParseErrorKind::MissingVariable,
                        format!("missing variable ${name}"),
                    )
                })?;
                out.push_str(value);
            }
            _ => out.push(character),
        }
    }
    Ok(out)
}

/// Stack of variable frames: the sheet's globals at the bottom, one frame
/// per nested block or mixin body above.
#[derive(Clone, Debug, Default)]
pub struct VariableScope {
    globals: VariableMap,
    locals: Vec<VariableMap>,
}

impl VariableScope {
    /// A scope with an empty global frame.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// A scope whose global frame starts as `globals`.
    #[inline]
    pub fn with_globals(globals: VariableMap) -> Self {
        Self {
            globals,
            locals: Vec::new(),
        }
    }

    /// Enter a block; bindings made until [`VariableScope::pop`] are local to it.
    #[inline]
    pub fn push(&mut self) {
        self.locals.push(VariableMap::new());
    }

    /// Leave a block. The global frame is never popped.
    #[inline]
    pub fn pop(&mut self) {
        self.locals.pop();
    }

    /// Innermost-first lookup by normalized key.
    fn lookup(&self, key: &str) -> Option<&str> {
        self.locals
            .iter()
            .rev()
            .find_map(|frame| frame.get(key))
            .or_else(|| self.globals.get(key))
            .map(String::as_str)
    }

    /// Look a name up innermost frame first.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.lookup(&normalize_name(name))
    }

    #[inline]
    pub fn is_bound(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Bind in the innermost frame, replacing any previous binding there.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let frame = self.locals.last_mut().unwrap_or(&mut self.globals);
        frame.insert(normalize_name(name), value.into());
    }

    /// Bind only when no visible binding exists; returns whether it bound.
    pub fn set_default(&mut self, name: &str, value: impl Into<String>) -> bool {
        if self.is_bound(name) {
            return false;
        }
        self.set(name, value);
        true
    }

    /// Bind with `!default` semantics when `is_default` is set.
    pub fn assign(&mut self, name: &str, value: impl Into<String>, is_default: bool) -> bool {
        if is_default {
            return self.set_default(name, value);
        }
        self.set(name, value);
        true
    }

    /// Substitute `$name` references in `text` against this scope.
    ///
    /// # Errors
    /// Returns `ParseErrorKind::MissingVariable` for an unbound name.
    pub fn substitute(&self, text: &str) -> Result<String, ParseError> {
        substitute(text, |name| self.lookup(name))
    }

    /// The global frame.
    #[inline]
    pub const fn globals(&self) -> &VariableMap {
        &self.globals
    }

    #[inline]
    pub fn globals_mut(&mut self) -> &mut VariableMap {
        &mut self.globals
    }

    /// Swap the local frames for `locals` and return the previous ones.
    ///
    /// Mixin bodies run with only the globals and their parameters visible;
    /// `@content` swaps the include site's frames back in.
    pub fn replace_locals(&mut self, locals: Vec<VariableMap>) -> Vec<VariableMap> {
        mem::replace(&mut self.locals, locals)
    }

    /// Consume the scope and return its global frame.
    #[inline]
    pub fn into_globals(self) -> VariableMap {
        self.globals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flag_is_split() {
        assert_eq!(split_default_flag("red !default"), ("red", true));
        assert_eq!(split_default_flag(" 10px  ! DEFAULT "), ("10px", true));
        assert_eq!(split_default_flag("red !important"), ("red !important", false));
        assert_eq!(split_default_flag("blue"), ("blue", false));
    }

    #[test]
    fn quoted_dollars_are_left_alone() {
        let out = substitute("\"$x\" $y", |name| (name == "y").then_some("1px"));
        assert_eq!(out, Ok("\"$x\" 1px".to_owned()));
    }
}
