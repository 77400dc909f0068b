//! Selector matching engine.
//! See <https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element>
//!
//! Compounds are matched right to left. Every combinator step backtracks, so
//! `.a > .b .c` still matches when the nearest `.b` ancestor is not a child
//! of an `.a` but a farther one is.

use crate::{
    Combinator, ComplexSelector, CompoundSelector, ElementAdapter, PseudoClass, RelativeSelector,
    SelectorList,
};

/// Extra condition on the element matched by the leftmost compound; used to
/// anchor `:has()` arguments to the element that carries them.
type Anchor<'check, H> = Option<&'check dyn Fn(H) -> bool>;

/// Match a selector list against an element.
pub fn matches_selector_list<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    list: &SelectorList,
) -> bool {
    list.selectors
        .iter()
        .any(|selector_item| matches_complex(adapter, element, selector_item))
}

/// Match a complex selector against an element.
pub fn matches_complex<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    sel: &ComplexSelector,
) -> bool {
    matches_from(adapter, sel, sel.rest.len(), element, None)
}

/// Whether `anchor` has an element related to it that matches `relative`.
pub fn matches_relative<A: ElementAdapter>(
    adapter: &A,
    anchor: A::Handle,
    relative: &RelativeSelector,
) -> bool {
    let is_related = |leftmost: A::Handle| match relative.combinator {
        Combinator::Child => adapter.parent(leftmost) == Some(anchor),
        Combinator::Descendant => is_ancestor(adapter, anchor, leftmost),
        Combinator::AdjacentSibling => adapter.previous_sibling_element(leftmost) == Some(anchor),
        Combinator::GeneralSibling => is_later_sibling(adapter, anchor, leftmost),
    };
    let related: &dyn Fn(A::Handle) -> bool = &is_related;
    let selector = &relative.selector;
    let check = |candidate: A::Handle| {
        matches_from(adapter, selector, selector.rest.len(), candidate, Some(related))
    };

    match relative.combinator {
        Combinator::Descendant | Combinator::Child => any_descendant(adapter, anchor, &check),
        Combinator::AdjacentSibling | Combinator::GeneralSibling => {
            let mut sibling = adapter.next_sibling_element(anchor);
            while let Some(current) = sibling {
                if check(current) || any_descendant(adapter, current, &check) {
                    return true;
                }
                sibling = adapter.next_sibling_element(current);
            }
            false
        }
    }
}

/// Match a compound selector against a single element.
pub fn matches_compound<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    compound: &CompoundSelector,
) -> bool {
    if let Some(name) = &compound.element {
        if !adapter.element_name(element).eq_ignore_ascii_case(name) {
            return false;
        }
    }
    if let Some(id_value) = &compound.id {
        if adapter
            .element_id(element)
            .is_none_or(|value| value != id_value.as_str())
        {
            return false;
        }
    }
    if !compound
        .classes
        .iter()
        .all(|class_name| adapter.has_class(element, class_name))
    {
        return false;
    }
    if !compound.pseudo.is_empty() {
        let mut state = adapter.pseudo_state(element);
        if compound.pseudo.intersects(PseudoClass::STRUCTURAL) {
            state.insert(structural_state(adapter, element));
        }
        if !state.contains(compound.pseudo) {
            return false;
        }
    }
    if let Some(rule) = compound.nth_child {
        if !rule.matches(adapter.sibling_index(element)) {
            return false;
        }
    }
    if compound
        .not
        .iter()
        .any(|list| matches_selector_list(adapter, element, list))
    {
        return false;
    }
    compound.has.iter().all(|relatives| {
        relatives.is_empty()
            || relatives
                .iter()
                .any(|relative| matches_relative(adapter, element, relative))
    })
}

/// Structural flags of `element` derived from its position in the tree.
fn structural_state<A: ElementAdapter>(adapter: &A, element: A::Handle) -> PseudoClass {
    let mut state = PseudoClass::NONE;
    let first = adapter.previous_sibling_element(element).is_none();
    let last = adapter.next_sibling_element(element).is_none();
    state.set(PseudoClass::FIRST_CHILD, first);
    state.set(PseudoClass::LAST_CHILD, last);
    state.set(PseudoClass::ONLY_CHILD, first && last);
    state.set(
        PseudoClass::EMPTY,
        adapter.first_child_element(element).is_none(),
    );
    state
}

/// Match compound number `position` (0 = `first`) and everything left of it
/// with `element` as the candidate for that compound.
fn matches_from<A: ElementAdapter>(
    adapter: &A,
    sel: &ComplexSelector,
    position: usize,
    element: A::Handle,
    anchor: Anchor<'_, A::Handle>,
) -> bool {
    let (compound, combinator) = match position.checked_sub(1) {
        None => (&sel.first, None),
        Some(index) => match sel.rest.get(index) {
            Some((combinator, compound)) => (compound, Some(*combinator)),
            None => return false,
        },
    };
    if !matches_compound(adapter, element, compound) {
        return false;
    }
    let Some(combinator) = combinator else {
        return anchor.is_none_or(|check| check(element));
    };
    let left = position.saturating_sub(1);
    match combinator {
        Combinator::Descendant => {
            let mut current_parent = adapter.parent(element);
            while let Some(ancestor_element) = current_parent {
                if matches_from(adapter, sel, left, ancestor_element, anchor) {
                    return true;
                }
                current_parent = adapter.parent(ancestor_element);
            }
            false
        }
        Combinator::Child => adapter
            .parent(element)
            .is_some_and(|parent_el| matches_from(adapter, sel, left, parent_el, anchor)),
        Combinator::AdjacentSibling => adapter
            .previous_sibling_element(element)
            .is_some_and(|prev_el| matches_from(adapter, sel, left, prev_el, anchor)),
        Combinator::GeneralSibling => {
            let mut current_sibling = adapter.previous_sibling_element(element);
            while let Some(sibling_element) = current_sibling {
                if matches_from(adapter, sel, left, sibling_element, anchor) {
                    return true;
                }
                current_sibling = adapter.previous_sibling_element(sibling_element);
            }
            false
        }
    }
}

/// Whether `ancestor` is a proper ancestor of `element`.
fn is_ancestor<A: ElementAdapter>(adapter: &A, ancestor: A::Handle, element: A::Handle) -> bool {
    let mut current = adapter.parent(element);
    while let Some(parent_el) = current {
        if parent_el == ancestor {
            return true;
        }
        current = adapter.parent(parent_el);
    }
    false
}

/// Whether `later` comes after `earlier` in the same sibling list.
fn is_later_sibling<A: ElementAdapter>(adapter: &A, earlier: A::Handle, later: A::Handle) -> bool {
    let mut current = adapter.previous_sibling_element(later);
    while let Some(sibling) = current {
        if sibling == earlier {
            return true;
        }
        current = adapter.previous_sibling_element(sibling);
    }
    false
}

/// Depth-first search of the proper descendants of `root`.
fn any_descendant<A: ElementAdapter>(
    adapter: &A,
    root: A::Handle,
    check: &dyn Fn(A::Handle) -> bool,
) -> bool {
    let mut stack: Vec<A::Handle> = adapter.first_child_element(root).into_iter().collect();
    while let Some(node) = stack.pop() {
        if check(node) {
            return true;
        }
        if let Some(sibling) = adapter.next_sibling_element(node) {
            stack.push(sibling);
        }
        if let Some(child) = adapter.first_child_element(node) {
            stack.push(child);
        }
    }
    false
}
