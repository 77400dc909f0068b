//! The parsed sheet model.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context as _, Result, bail};
use css_selectors::{ElementAdapter, SelectorList, Specificity};
use css_styles::Styles;
use css_syntax::ParseError;
use css_variables::{VariableMap, normalize_name};

use crate::fs::{FileSystem, normalize_path};
use crate::keyframes::KeyframeBlock;
use crate::mixin::MixinDefinition;
use crate::parser::StyleParser;

/// Selectors plus the declarations they share.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleBlock {
    selectors: SelectorList,
    selector_text: String,
    pub styles: Styles,
    /// Position among the sheet's blocks, counting from 0.
    pub source_order: u32,
    pub file: Option<String>,
    /// 1-based line of the selector.
    pub line: usize,
}

impl StyleBlock {
    /// A block for an already parsed selector list.
    pub fn new(selectors: SelectorList, selector_text: String, styles: Styles) -> Self {
        Self {
            selectors,
            selector_text,
            styles,
            source_order: 0,
            file: None,
            line: 0,
        }
    }

    /// Parse `selector` and build a block with empty styles.
    ///
    /// # Errors
    /// Returns `ParseErrorKind::InvalidSelector` for malformed selectors.
    pub fn parse(selector: &str) -> Result<Self, ParseError> {
        let mut block = Self::new(SelectorList::default(), String::new(), Styles::new());
        block.set_selector(selector)?;
        Ok(block)
    }

    #[inline]
    pub const fn selectors(&self) -> &SelectorList {
        &self.selectors
    }

    /// Selector text, comma separated, after nesting was expanded.
    #[inline]
    pub fn selector_text(&self) -> &str {
        &self.selector_text
    }

    /// Replace the selectors. On error the block keeps its old selectors.
    ///
    /// # Errors
    /// Returns `ParseErrorKind::InvalidSelector` for malformed selectors.
    pub fn set_selector(&mut self, text: &str) -> Result<(), ParseError> {
        self.selectors = SelectorList::parse(text)?;
        self.selector_text = text.trim().to_owned();
        Ok(())
    }

    #[inline]
    pub fn matches<A: ElementAdapter>(&self, adapter: &A, element: A::Handle) -> bool {
        self.selectors.matches(adapter, element)
    }

    /// Specificity of the most specific selector that matches `element`.
    #[inline]
    pub fn matching_specificity<A: ElementAdapter>(
        &self,
        adapter: &A,
        element: A::Handle,
    ) -> Option<Specificity> {
        self.selectors.matching_specificity(adapter, element)
    }
}

/// A parsed stylesheet.
///
/// Sheets are immutable once parsed except for whole-sheet replacement
/// through [`StyleSheet::update_from_string`] and [`StyleSheet::reload`],
/// which either swap every table or leave the sheet as it was.
#[derive(Clone, Debug, Default)]
pub struct StyleSheet {
    blocks: Vec<StyleBlock>,
    keyframes: HashMap<String, KeyframeBlock>,
    mixins: HashMap<String, Arc<MixinDefinition>>,
    variables: VariableMap,
    file_name: Option<String>,
    imports: Vec<String>,
    /// Some block selector contains `:has()`.
    uses_has: bool,
}

impl StyleSheet {
    pub(crate) fn from_parts(
        blocks: Vec<StyleBlock>,
        keyframes: HashMap<String, KeyframeBlock>,
        mixins: HashMap<String, Arc<MixinDefinition>>,
        variables: VariableMap,
        file_name: Option<String>,
        imports: Vec<String>,
    ) -> Self {
        let uses_has = blocks.iter().any(|block| block.selectors().uses_has());
        Self {
            blocks,
            keyframes,
            mixins,
            variables,
            file_name,
            imports,
            uses_has,
        }
    }

    /// Parse a sheet that has no file and cannot `@import`.
    ///
    /// # Errors
    /// Returns the first structural error; no partial sheet is produced.
    pub fn from_string(text: &str) -> Result<Self, ParseError> {
        StyleParser::new().parse_sheet(text)
    }

    /// Parse `path` from `files`, resolving imports against it.
    ///
    /// # Errors
    /// Fails when the file or one of its imports cannot be read or parsed.
    pub fn from_file(files: &dyn FileSystem, path: &str) -> Result<Self> {
        let text = files
            .read_all_text(path)
            .with_context(|| format!("loading stylesheet {path}"))?;
        let sheet = StyleParser::with_file_system(files)
            .file_name(path)
            .parse_sheet(&text)
            .with_context(|| format!("parsing stylesheet {path}"))?;
        Ok(sheet)
    }

    /// Re-parse from `text`, keeping the file name. On error the sheet is
    /// left untouched.
    ///
    /// # Errors
    /// Returns the first structural error of `text`.
    pub fn update_from_string(&mut self, text: &str) -> Result<(), ParseError> {
        let mut parser = StyleParser::new();
        if let Some(file) = &self.file_name {
            parser = parser.file_name(file);
        }
        let replacement = parser.parse_sheet(text)?;
        *self = replacement;
        Ok(())
    }

    /// Re-read the sheet's file and imports from `files`. On error the sheet
    /// is left untouched.
    ///
    /// # Errors
    /// Fails for sheets without a file name and for read or parse errors.
    pub fn reload(&mut self, files: &dyn FileSystem) -> Result<()> {
        let Some(path) = self.file_name.clone() else {
            bail!("stylesheet has no file to reload from");
        };
        *self = Self::from_file(files, &path)?;
        Ok(())
    }

    /// Blocks in source order.
    #[inline]
    pub fn blocks(&self) -> &[StyleBlock] {
        &self.blocks
    }

    #[inline]
    pub fn keyframes(&self) -> &HashMap<String, KeyframeBlock> {
        &self.keyframes
    }

    /// Keyframes by name; names are case-sensitive like CSS animation names.
    #[inline]
    pub fn keyframe(&self, name: &str) -> Option<&KeyframeBlock> {
        self.keyframes.get(name)
    }

    /// Mixin by case-insensitive name.
    pub fn mixin(&self, name: &str) -> Option<&MixinDefinition> {
        self.mixins.get(&normalize_name(name)).map(AsRef::as_ref)
    }

    #[inline]
    pub fn mixins(&self) -> &HashMap<String, Arc<MixinDefinition>> {
        &self.mixins
    }

    /// Top-level variable by case-insensitive name, `$` optional.
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(&normalize_name(name)).map(String::as_str)
    }

    #[inline]
    pub const fn variables(&self) -> &VariableMap {
        &self.variables
    }

    #[inline]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Every file reached through `@import`, in the order first imported.
    #[inline]
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Whether any block is selected through `:has()`, so that a change to a
    /// panel can restyle panels outside its parent's subtree.
    #[inline]
    pub const fn uses_has(&self) -> bool {
        self.uses_has
    }

    /// Whether `path` is this sheet's file or one of its imports.
    pub fn depends_on(&self, path: &str) -> bool {
        let wanted = normalize_path(path);
        self.file_name
            .as_deref()
            .is_some_and(|file| normalize_path(file) == wanted)
            || self.imports.iter().any(|import| *import == wanted)
    }
}
