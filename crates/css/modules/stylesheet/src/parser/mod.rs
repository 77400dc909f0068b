//! The stylesheet parser.
//!
//! Parsing is a single pass over comment-stripped text. Variables are
//! substituted, mixins expanded and nested selectors flattened as they are
//! read, so the resulting [`StyleSheet`] holds plain blocks only.

mod at_rules;
mod declarations;

use std::collections::HashMap;
use std::sync::Arc;

use css_selectors::SelectorList;
use css_styles::Styles;
use css_syntax::{Parse, ParseError, ParseErrorKind, split_top_level, strip_comments};
use css_variables::{VariableMap, VariableScope, split_default_flag};
use log::debug;

use crate::fs::FileSystem;
use crate::keyframes::KeyframeBlock;
use crate::mixin::MixinDefinition;
use crate::sheet::{StyleBlock, StyleSheet};

pub use declarations::parse_styles;
use declarations::{apply_declaration, read_statement, split_declaration};

/// Deepest `@include` nesting before expansion is treated as runaway recursion.
pub const MAX_INCLUDE_DEPTH: usize = 32;

/// The rule being filled while its body is parsed.
struct RuleContext {
    /// Expanded selector texts; empty at the top level of a sheet.
    selectors: Vec<String>,
    list: SelectorList,
    styles: Styles,
    file: Option<String>,
    line: usize,
    /// Blocks produced inside this rule, in source order.
    blocks: Vec<StyleBlock>,
}

impl RuleContext {
    fn top_level() -> Self {
        Self {
            selectors: Vec::new(),
            list: SelectorList::default(),
            styles: Styles::new(),
            file: None,
            line: 0,
            blocks: Vec::new(),
        }
    }

    fn nested(selectors: Vec<String>, list: SelectorList, file: Option<String>, line: usize) -> Self {
        Self {
            selectors,
            list,
            styles: Styles::new(),
            file,
            line,
            blocks: Vec::new(),
        }
    }

    #[inline]
    fn is_top_level(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Append a finished child rule: its own block first (when it declared
    /// anything), then everything nested inside it.
    fn emit(&mut self, child: Self) {
        if !child.styles.is_empty() {
            let mut block = StyleBlock::new(child.list, child.selectors.join(", "), child.styles);
            block.file = child.file;
            block.line = child.line;
            self.blocks.push(block);
        }
        self.blocks.extend(child.blocks);
    }
}

/// The include site of a mixin that is currently being expanded.
struct ContentFrame {
    /// The `{ ... }` passed to `@include`, if any.
    body: Option<ContentBody>,
    /// Local variable frames of the include site.
    caller_locals: Vec<VariableMap>,
}

/// Text of an `@include` content block.
struct ContentBody {
    text: String,
    file: Option<String>,
    line_offset: usize,
}

/// SCSS-flavoured stylesheet parser.
///
/// One parser produces one sheet; imports are parsed by child parsers that
/// share the file system.
pub struct StyleParser<'fs> {
    files: Option<&'fs dyn FileSystem>,
    file: Option<String>,
    scope: VariableScope,
    mixins: HashMap<String, Arc<MixinDefinition>>,
    keyframes: HashMap<String, KeyframeBlock>,
    imports: Vec<String>,
    /// Files being imported above this parser, outermost first.
    import_stack: Vec<String>,
    content: Vec<ContentFrame>,
    include_depth: usize,
}

impl Default for StyleParser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'fs> StyleParser<'fs> {
    /// A parser without a file system; `@import` fails.
    pub fn new() -> Self {
        Self {
            files: None,
            file: None,
            scope: VariableScope::new(),
            mixins: HashMap::new(),
            keyframes: HashMap::new(),
            imports: Vec::new(),
            import_stack: Vec::new(),
            content: Vec::new(),
            include_depth: 0,
        }
    }

    /// A parser that resolves `@import` through `files`.
    pub fn with_file_system(files: &'fs dyn FileSystem) -> Self {
        Self {
            files: Some(files),
            ..Self::new()
        }
    }

    /// Name of the file being parsed, for diagnostics and relative imports.
    #[must_use]
    pub fn file_name(mut self, file: &str) -> Self {
        self.file = Some(file.to_owned());
        self
    }

    /// Start with `variables` already bound, as if declared before the sheet.
    #[must_use]
    pub fn with_variables(mut self, variables: VariableMap) -> Self {
        self.scope = VariableScope::with_globals(variables);
        self
    }

    /// Parse a whole sheet.
    ///
    /// # Errors
    /// Returns the first structural error, located in the file it occurred
    /// in. No partial sheet is produced.
    pub fn parse_sheet(mut self, text: &str) -> Result<StyleSheet, ParseError> {
        let stripped = strip_comments(text);
        let file = self.file.clone();
        let mut cursor = Parse::new(&stripped).with_file(file.as_deref());
        let mut top = RuleContext::top_level();
        self.parse_body(&mut cursor, &mut top)?;

        let mut blocks = top.blocks;
        for (order, block) in blocks.iter_mut().enumerate() {
            block.source_order = u32::try_from(order).unwrap_or(u32::MAX);
        }
        debug!(
            target: "css_stylesheet",
            "parsed {}: {} blocks, {} mixins, {} keyframes, {} imports",
            file.as_deref().unwrap_or("<inline>"),
            blocks.len(),
            self.mixins.len(),
            self.keyframes.len(),
            self.imports.len()
        );
        Ok(StyleSheet::from_parts(
            blocks,
            self.keyframes,
            self.mixins,
            self.scope.into_globals(),
            file,
            self.imports,
        ))
    }

    /// Parse the statements of one body: the sheet's top level, a rule
    /// block, a mixin body or include content.
    fn parse_body(&mut self, cursor: &mut Parse<'_>, context: &mut RuleContext) -> Result<(), ParseError> {
        loop {
            cursor.skip_whitespace();
            match cursor.current() {
                None => return Ok(()),
                Some(';') => cursor.advance(1),
                Some('}') => {
                    return Err(cursor.error(ParseErrorKind::Unexpected, "unexpected '}'"));
                }
                Some('$') => self.parse_variable(cursor)?,
                Some('@') => self.parse_at_rule(cursor, context)?,
                Some(_) => self.parse_rule_or_declaration(cursor, context)?,
            }
        }
    }

    /// `$name: value [!default];`
    fn parse_variable(&mut self, cursor: &mut Parse<'_>) -> Result<(), ParseError> {
        let start = cursor.position();
        let (text, terminator) = read_statement(cursor);
        if terminator == Some('{') {
            return Err(cursor.error_at(
                start,
                ParseErrorKind::InvalidVariable,
                "expected ';' after a variable declaration",
            ));
        }
        let declaration = split_declaration(text.trim_start_matches('$')).map_err(|_| {
            cursor.error_at(
                start,
                ParseErrorKind::InvalidVariable,
                format!("expected '$name: value' but found '{}'", text.trim()),
            )
        })?;
        let (name, raw_value) = declaration;
        let (value, is_default) = split_default_flag(raw_value);
        if value.is_empty() {
            return Err(cursor.error_at(
                start,
                ParseErrorKind::InvalidVariable,
                format!("variable ${name} has no value"),
            ));
        }
        if is_default && self.scope.is_bound(name) {
            return Ok(());
        }
        let resolved = self
            .scope
            .substitute(value)
            .map_err(|error| cursor.locate(start, error))?;
        self.scope.assign(name, resolved, is_default);
        Ok(())
    }

    /// A nested rule `selector { ... }` or a declaration `name: value;`.
    fn parse_rule_or_declaration(
        &mut self,
        cursor: &mut Parse<'_>,
        context: &mut RuleContext,
    ) -> Result<(), ParseError> {
        let start = cursor.position();
        let (text, terminator) = read_statement(cursor);
        if terminator == Some('{') {
            let prelude = text.trim();
            if prelude.is_empty() {
                return Err(cursor.error_at(
                    start,
                    ParseErrorKind::MissingSelector,
                    "block has no selector",
                ));
            }
            let (selectors, list) = expand_selectors(&context.selectors, prelude)
                .map_err(|error| cursor.locate(start, error))?;
            let line = cursor.location(start).0;
            let mut body = cursor.read_block()?;
            let mut child = RuleContext::nested(
                selectors,
                list,
                cursor.file().map(ToOwned::to_owned),
                line,
            );
            self.scope.push();
            let parsed = self.parse_body(&mut body, &mut child);
            self.scope.pop();
            parsed?;
            context.emit(child);
            return Ok(());
        }

        if context.is_top_level() {
            return Err(cursor.error_at(
                start,
                ParseErrorKind::InvalidDeclaration,
                format!("declaration '{}' outside of a block", text.trim()),
            ));
        }
        let (name, value) = split_declaration(text).map_err(|error| cursor.locate(start, error))?;
        let resolved = self
            .scope
            .substitute(value)
            .map_err(|error| cursor.locate(start, error))?;
        let line = cursor.location(start).0;
        apply_declaration(&mut context.styles, name, &resolved, cursor.file(), line);
        Ok(())
    }
}

/// Expand a (possibly `&`-nested) selector list against its parent rule and
/// validate the result.
///
/// Every parent/child combination is produced: `&` is replaced by the parent
/// selector, other children become descendants of it.
fn expand_selectors(
    parents: &[String],
    prelude: &str,
) -> Result<(Vec<String>, SelectorList), ParseError> {
    let children = split_top_level(prelude, ',');
    let mut expanded = Vec::with_capacity(children.len().saturating_mul(parents.len().max(1)));
    for child in children {
        if child.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::InvalidSelector,
                format!("empty selector in '{prelude}'"),
            ));
        }
        if parents.is_empty() {
            expanded.push(child.to_owned());
            continue;
        }
        for parent in parents {
            if child.contains('&') {
                expanded.push(child.replace('&', parent));
            } else {
                expanded.push(format!("{parent} {child}"));
            }
        }
    }
    let mut list = SelectorList::default();
    for selector in &expanded {
        list.selectors
            .extend(SelectorList::parse(selector)?.selectors);
    }
    Ok((expanded, list))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nesting_expands_every_combination() {
        let parents = vec![".a".to_owned(), ".b".to_owned()];
        let expanded = expand_selectors(&parents, "&:hover, .icon").map(|(texts, _)| texts);
        assert_eq!(
            expanded,
            Ok(vec![
                ".a:hover".to_owned(),
                ".b:hover".to_owned(),
                ".a .icon".to_owned(),
                ".b .icon".to_owned(),
            ])
        );
    }

    #[test]
    fn top_level_ampersand_is_rejected() {
        assert!(expand_selectors(&[], "&.x").is_err());
        assert!(expand_selectors(&[], ".a,,.b").is_err());
    }
}
