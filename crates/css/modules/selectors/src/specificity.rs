//! Selector specificity calculation.
//! See <https://www.w3.org/TR/selectors-4/#specificity-rules>

use crate::{ComplexSelector, CompoundSelector, PseudoClass, SelectorList};

/// Specificity triple (ids, classes, elements), compared lexicographically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Specificity(pub u16, pub u16, pub u16);

impl Specificity {
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(
            self.0.saturating_add(other.0),
            self.1.saturating_add(other.1),
            self.2.saturating_add(other.2),
        )
    }
}

/// Compute the specificity of a compound selector.
///
/// - ids count in the first field;
/// - classes, pseudo-classes and `:nth-child` in the second;
/// - the element name and `::before`/`::after` in the third;
/// - `:not()` and `:has()` add their most specific argument.
pub fn specificity_of_compound(compound: &CompoundSelector) -> Specificity {
    let id_count = u16::from(compound.id.is_some());
    let pseudo_classes = compound.pseudo.difference(PseudoClass::ELEMENTS).count();
    let class_count = u16::try_from(compound.classes.len())
        .unwrap_or(u16::MAX)
        .saturating_add(u16::try_from(pseudo_classes).unwrap_or(u16::MAX))
        .saturating_add(u16::from(compound.nth_child.is_some()));
    let pseudo_elements =
        u16::try_from(compound.pseudo.intersection(PseudoClass::ELEMENTS).count()).unwrap_or(u16::MAX);
    let type_count = u16::from(compound.element.is_some()).saturating_add(pseudo_elements);

    let mut total = Specificity(id_count, class_count, type_count);
    for list in &compound.not {
        total = total.saturating_add(list_specificity(list));
    }
    for relatives in &compound.has {
        let most = relatives
            .iter()
            .map(|relative| specificity_of_complex(&relative.selector))
            .max()
            .unwrap_or_default();
        total = total.saturating_add(most);
    }
    total
}

/// Compute the specificity of a complex selector (sum of its compounds).
pub fn specificity_of_complex(sel: &ComplexSelector) -> Specificity {
    sel.rest.iter().fold(
        specificity_of_compound(&sel.first),
        |spec_total, (_, compound)| spec_total.saturating_add(specificity_of_compound(compound)),
    )
}

fn list_specificity(list: &SelectorList) -> Specificity {
    list.selectors
        .iter()
        .map(specificity_of_complex)
        .max()
        .unwrap_or_default()
}
