//! Selectors Level 4 subset: panel selector model, matching and specificity.
//! See <https://www.w3.org/TR/selectors-4/>
//!
//! Supported:
//! - Universal, element, id and class selectors
//! - Pseudo-classes as a bit set (dynamic states plus structural ones)
//! - `:nth-child(An+B)`, `:not(list)`, `:has(relative list)`
//! - `::before`/`::after` pseudo-elements
//! - Combinators: descendant, child, adjacent sibling, general sibling
//!
//! Nesting with `&` is expanded by the stylesheet parser before selectors
//! reach this crate.

#![forbid(unsafe_code)]

mod matcher;
mod nth;
mod parser;
mod pseudo;
mod specificity;

pub use matcher::{matches_complex, matches_compound, matches_relative, matches_selector_list};
pub use nth::NthChild;
pub use parser::{parse_complex_selector, parse_relative_selector, parse_selector_list};
pub use pseudo::PseudoClass;
pub use specificity::{Specificity, specificity_of_complex, specificity_of_compound};

use css_syntax::ParseError;

/// An adapter that abstracts panel tree access for selector matching.
/// Implement this for your node storage.
pub trait ElementAdapter {
    type Handle: Copy + Eq;

    /// Parent element if any.
    fn parent(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Previous sibling element.
    fn previous_sibling_element(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Next sibling element.
    fn next_sibling_element(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// First child element.
    fn first_child_element(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Element name such as `label` or `button`.
    fn element_name(&self, element: Self::Handle) -> &str;

    /// Returns Some(id) if the element has an id, else None.
    fn element_id(&self, element: Self::Handle) -> Option<&str>;

    /// True if the element has the given class.
    fn has_class(&self, element: Self::Handle, class: &str) -> bool;

    /// Dynamic pseudo-class state (hover, active, focus, intro, outro) and
    /// the `BEFORE`/`AFTER` marker of pseudo-element nodes. Structural flags
    /// are computed by the matcher and need not be reported here.
    fn pseudo_state(&self, element: Self::Handle) -> PseudoClass;

    /// 1-based position among element siblings.
    fn sibling_index(&self, element: Self::Handle) -> usize {
        let mut index = 1usize;
        let mut current = self.previous_sibling_element(element);
        while let Some(sibling) = current {
            index = index.saturating_add(1);
            current = self.previous_sibling_element(sibling);
        }
        index
    }
}

/// A compound selector: everything between two combinators.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    /// `*` was written.
    pub universal: bool,
    /// Element name, ASCII lowercase.
    pub element: Option<String>,
    pub id: Option<String>,
    /// Sorted and deduplicated; order in the source is irrelevant.
    pub classes: Vec<String>,
    /// Required pseudo-class and pseudo-element flags.
    pub pseudo: PseudoClass,
    pub nth_child: Option<NthChild>,
    /// Each `:not(...)` argument list; none may match.
    pub not: Vec<SelectorList>,
    /// Each `:has(...)` argument list; every list needs one match. An empty
    /// list (`:has()`) always holds.
    pub has: Vec<Vec<RelativeSelector>>,
}

impl CompoundSelector {
    /// Whether a `:has()` appears here, directly or inside `:not()`.
    pub fn uses_has(&self) -> bool {
        !self.has.is_empty() || self.not.iter().any(SelectorList::uses_has)
    }
}

/// Combinators between compounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Combinator {
    Descendant,
    Child,
    AdjacentSibling,
    GeneralSibling,
}

/// A complex selector is one or more compounds separated by combinators.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ComplexSelector {
    pub first: CompoundSelector,
    pub rest: Vec<(Combinator, CompoundSelector)>,
}

impl ComplexSelector {
    /// The rightmost compound, which the matched element itself must satisfy.
    pub fn subject(&self) -> &CompoundSelector {
        self.rest.last().map_or(&self.first, |(_, compound)| compound)
    }

    /// Whether any compound of the selector uses `:has()`.
    pub fn uses_has(&self) -> bool {
        self.first.uses_has() || self.rest.iter().any(|(_, compound)| compound.uses_has())
    }
}

/// A `:has()` argument: a complex selector anchored to the element by a
/// leading combinator (descendant when none is written).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelativeSelector {
    pub combinator: Combinator,
    pub selector: ComplexSelector,
}

/// A selector list separated by commas.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    /// Parse a comma separated list.
    ///
    /// # Errors
    /// Returns `ParseErrorKind::InvalidSelector` for malformed selectors.
    #[inline]
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        parse_selector_list(text)
    }

    #[inline]
    pub fn matches<A: ElementAdapter>(&self, adapter: &A, element: A::Handle) -> bool {
        matches_selector_list(adapter, element, self)
    }

    /// Highest specificity among the selectors that match `element`.
    pub fn matching_specificity<A: ElementAdapter>(
        &self,
        adapter: &A,
        element: A::Handle,
    ) -> Option<Specificity> {
        self.selectors
            .iter()
            .filter(|selector| matches_complex(adapter, element, selector))
            .map(specificity_of_complex)
            .max()
    }

    /// Whether matching may depend on descendants or later siblings.
    pub fn uses_has(&self) -> bool {
        self.selectors.iter().any(ComplexSelector::uses_has)
    }

    /// Highest specificity of any selector in the list.
    pub fn max_specificity(&self) -> Specificity {
        self.selectors
            .iter()
            .map(specificity_of_complex)
            .max()
            .unwrap_or_default()
    }
}
