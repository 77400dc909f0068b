//! Selector parsing.
//! See <https://www.w3.org/TR/selectors-4/#grammar>

use crate::{
    Combinator, ComplexSelector, CompoundSelector, NthChild, PseudoClass, RelativeSelector,
    SelectorList,
};
use css_syntax::{ParseError, ParseErrorKind, is_identifier_char, split_top_level};

/// Invalid-selector error with `message`.
fn invalid(message: impl Into<String>) -> ParseError {
    ParseError::new(ParseErrorKind::InvalidSelector, message)
}

/// Parse a comma separated selector list such as `.a, button:hover`.
///
/// # Errors
/// Returns `ParseErrorKind::InvalidSelector` when any entry is malformed or empty.
pub fn parse_selector_list(text: &str) -> Result<SelectorList, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(invalid("empty selector"));
    }
    let selectors = split_top_level(trimmed, ',')
        .into_iter()
        .map(|piece| {
            if piece.is_empty() {
                Err(invalid(format!("empty entry in selector list `{trimmed}`")))
            } else {
                parse_complex_selector(piece)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SelectorList { selectors })
}

/// Parse one complex selector; a leading combinator is rejected.
///
/// # Errors
/// Returns `ParseErrorKind::InvalidSelector` when the selector is malformed.
pub fn parse_complex_selector(text: &str) -> Result<ComplexSelector, ParseError> {
    let mut reader = SelectorReader::new(text);
    reader.skip_whitespace();
    if reader.combinator().is_some() {
        return Err(invalid(format!("selector `{}` starts with a combinator", text.trim())));
    }
    reader.complex()
}

/// Parse a `:has()` argument such as `> .child` or `.descendant`.
///
/// # Errors
/// Returns `ParseErrorKind::InvalidSelector` when the selector is malformed.
pub fn parse_relative_selector(text: &str) -> Result<RelativeSelector, ParseError> {
    let mut reader = SelectorReader::new(text);
    reader.skip_whitespace();
    let combinator = reader.combinator().unwrap_or(Combinator::Descendant);
    reader.skip_whitespace();
    let selector = reader.complex()?;
    Ok(RelativeSelector {
        combinator,
        selector,
    })
}

/// Character reader over one selector.
struct SelectorReader<'src> {
    text: &'src str,
    position: usize,
}

impl<'src> SelectorReader<'src> {
    const fn new(text: &'src str) -> Self {
        Self { text, position: 0 }
    }

    fn rest(&self) -> &'src str {
        self.text.get(self.position..).unwrap_or_default()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) {
        if let Some(character) = self.peek() {
            self.position = self.position.saturating_add(character.len_utf8());
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            return true;
        }
        false
    }

    fn skip_whitespace(&mut self) -> bool {
        let before = self.position;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.position != before
    }

    fn identifier(&mut self) -> &'src str {
        let start = self.position;
        while self.peek().is_some_and(is_identifier_char) {
            self.bump();
        }
        self.text.get(start..self.position).unwrap_or_default()
    }

    /// Consume an explicit combinator character.
    fn combinator(&mut self) -> Option<Combinator> {
        let combinator = match self.peek()? {
            '>' => Combinator::Child,
            '+' => Combinator::AdjacentSibling,
            '~' => Combinator::GeneralSibling,
            _ => return None,
        };
        self.bump();
        Some(combinator)
    }

    /// Contents of a `( ... )` group; the cursor is on the `(`.
    fn parenthesized(&mut self) -> Result<&'src str, ParseError> {
        self.bump();
        let start = self.position;
        let mut depth = 1usize;
        let mut quote: Option<char> = None;
        while let Some(character) = self.peek() {
            self.bump();
            if let Some(open) = quote {
                if character == open {
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
                        let end = self.position.saturating_sub(1);
                        return Ok(self.text.get(start..end).unwrap_or_default());
                    }
                }
                _ => {}
            }
        }
        Err(invalid(format!("unclosed '(' in selector `{}`", self.text.trim())))
    }

    fn complex(&mut self) -> Result<ComplexSelector, ParseError> {
        let first = self.compound()?;
        let mut rest = Vec::new();
        loop {
            let spaced = self.skip_whitespace();
            if self.peek().is_none() {
                break;
            }
            let combinator = match self.combinator() {
                Some(combinator) => {
                    self.skip_whitespace();
                    combinator
                }
                None if spaced => Combinator::Descendant,
                None => {
                    return Err(invalid(format!(
                        "unexpected '{}' in selector `{}`",
                        self.peek().unwrap_or_default(),
                        self.text.trim()
                    )));
                }
            };
            if self.peek().is_none() {
                return Err(invalid(format!(
                    "selector `{}` ends with a combinator",
                    self.text.trim()
                )));
            }
            rest.push((combinator, self.compound()?));
        }
        Ok(ComplexSelector { first, rest })
    }

    fn compound(&mut self) -> Result<CompoundSelector, ParseError> {
        let start = self.position;
        let mut compound = CompoundSelector::default();
        if self.eat('*') {
            compound.universal = true;
            if self.peek().is_some_and(is_identifier_char) {
                return Err(invalid(format!(
                    "universal selector followed by an identifier in `{}`",
                    self.text.trim()
                )));
            }
        } else if self.peek().is_some_and(is_identifier_char) {
            compound.element = Some(self.identifier().to_ascii_lowercase());
        }

        while let Some(character) = self.peek() {
            match character {
                '.' => {
                    self.bump();
                    let class = self.identifier();
                    if class.is_empty() {
                        return Err(invalid(format!(
                            "expected a class name after '.' in `{}`",
                            self.text.trim()
                        )));
                    }
                    compound.classes.push(class.to_owned());
                }
                '#' => {
                    self.bump();
                    let id = self.identifier();
                    if id.is_empty() {
                        return Err(invalid(format!(
                            "expected an id after '#' in `{}`",
                            self.text.trim()
                        )));
                    }
                    if compound.id.is_some() {
                        return Err(invalid(format!("two ids in one compound in `{}`", self.text.trim())));
                    }
                    compound.id = Some(id.to_owned());
                }
                ':' => {
                    self.bump();
                    self.eat(':');
                    self.pseudo(&mut compound)?;
                }
                '>' | '+' | '~' => break,
                other if other.is_whitespace() => break,
                '&' => {
                    return Err(invalid(format!(
                        "parent reference '&' outside a nested block in `{}`",
                        self.text.trim()
                    )));
                }
                other => {
                    return Err(invalid(format!(
                        "unexpected '{other}' in selector `{}`",
                        self.text.trim()
                    )));
                }
            }
        }

        if self.position == start {
            return Err(invalid(format!("expected a selector in `{}`", self.text.trim())));
        }
        compound.classes.sort_unstable();
        compound.classes.dedup();
        Ok(compound)
    }

    /// Pseudo-class or pseudo-element after its colons.
    fn pseudo(&mut self, compound: &mut CompoundSelector) -> Result<(), ParseError> {
        let name = self.identifier().to_ascii_lowercase();
        if name.is_empty() {
            return Err(invalid(format!(
                "expected a pseudo-class name after ':' in `{}`",
                self.text.trim()
            )));
        }
        let arguments = if self.peek() == Some('(') {
            Some(self.parenthesized()?)
        } else {
            None
        };
        match (name.as_str(), arguments) {
            ("nth-child", Some(arguments)) => {
                let rule = NthChild::parse(arguments).ok_or_else(|| {
                    invalid(format!("invalid :nth-child argument `{}`", arguments.trim()))
                })?;
                compound.nth_child = Some(rule);
            }
            ("not", Some(arguments)) => compound.not.push(parse_selector_list(arguments)?),
            ("has", Some(arguments)) => {
                let trimmed = arguments.trim();
                let relative = if trimmed.is_empty() {
                    Vec::new()
                } else {
                    split_top_level(trimmed, ',')
                        .into_iter()
                        .map(|piece| {
                            if piece.is_empty() {
                                Err(invalid(format!("empty entry in :has({trimmed})")))
                            } else {
                                parse_relative_selector(piece)
                            }
                        })
                        .collect::<Result<Vec<_>, _>>()?
                };
                compound.has.push(relative);
            }
            (flag_name, None) => {
                let flag = PseudoClass::from_name(flag_name)
                    .ok_or_else(|| invalid(format!("unknown pseudo-class ':{flag_name}'")))?;
                compound.pseudo.insert(flag);
            }
            (other, Some(_)) => {
                return Err(invalid(format!("':{other}' does not take arguments")));
            }
        }
        Ok(())
    }
}
