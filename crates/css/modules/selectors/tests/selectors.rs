#![cfg(test)]

use core::error::Error;
use css_selectors::{
    Combinator, ElementAdapter, PseudoClass, SelectorList, Specificity, parse_complex_selector,
    specificity_of_complex,
};
use css_syntax::ParseErrorKind;

#[derive(Default)]
struct TestNode {
    name: String,
    id: Option<String>,
    classes: Vec<String>,
    pseudo: PseudoClass,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Minimal arena tree for exercising the matcher.
#[derive(Default)]
struct TestTree {
    nodes: Vec<TestNode>,
}

impl TestTree {
    fn with_root(name: &str) -> Self {
        let mut tree = Self::default();
        tree.nodes.push(TestNode {
            name: name.to_owned(),
            ..TestNode::default()
        });
        tree
    }

    /// Append a child; `classes` is a space separated list.
    fn add(&mut self, parent: usize, name: &str, classes: &str) -> usize {
        let handle = self.nodes.len();
        self.nodes.push(TestNode {
            name: name.to_owned(),
            classes: classes.split_whitespace().map(ToOwned::to_owned).collect(),
            parent: Some(parent),
            ..TestNode::default()
        });
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(handle);
        }
        handle
    }

    fn node(&self, handle: usize) -> Option<&TestNode> {
        self.nodes.get(handle)
    }

    fn sibling(&self, element: usize, forward: bool) -> Option<usize> {
        let parent = self.node(element)?.parent?;
        let siblings = &self.node(parent)?.children;
        let index = siblings.iter().position(|&child| child == element)?;
        if forward {
            siblings.get(index.checked_add(1)?).copied()
        } else {
            siblings.get(index.checked_sub(1)?).copied()
        }
    }
}

impl ElementAdapter for TestTree {
    type Handle = usize;

    fn parent(&self, element: usize) -> Option<usize> {
        self.node(element)?.parent
    }

    fn previous_sibling_element(&self, element: usize) -> Option<usize> {
        self.sibling(element, false)
    }

    fn next_sibling_element(&self, element: usize) -> Option<usize> {
        self.sibling(element, true)
    }

    fn first_child_element(&self, element: usize) -> Option<usize> {
        self.node(element)?.children.first().copied()
    }

    fn element_name(&self, element: usize) -> &str {
        self.node(element).map_or("", |node| node.name.as_str())
    }

    fn element_id(&self, element: usize) -> Option<&str> {
        self.node(element)?.id.as_deref()
    }

    fn has_class(&self, element: usize, class: &str) -> bool {
        self.node(element)
            .is_some_and(|node| node.classes.iter().any(|name| name == class))
    }

    fn pseudo_state(&self, element: usize) -> PseudoClass {
        self.node(element).map_or(PseudoClass::NONE, |node| node.pseudo)
    }
}

/// Parse `selector` and match it against `element`.
///
/// # Errors
/// Returns an error when the selector does not parse.
fn matches(tree: &TestTree, selector: &str, element: usize) -> Result<bool, Box<dyn Error>> {
    Ok(SelectorList::parse(selector)?.matches(tree, element))
}

#[test]
fn element_id_and_classes() -> Result<(), Box<dyn Error>> {
    let mut tree = TestTree::with_root("root");
    let button = tree.add(0, "button", "primary large");
    if let Some(node) = tree.nodes.get_mut(button) {
        node.id = Some("ok".to_owned());
    }
    assert!(matches(&tree, "button", button)?);
    assert!(matches(&tree, "BUTTON.primary", button)?);
    assert!(matches(&tree, ".large.primary", button)?);
    assert!(matches(&tree, "#ok", button)?);
    assert!(matches(&tree, "*", button)?);
    assert!(matches(&tree, "*.primary", button)?);
    assert!(!matches(&tree, ".primary.small", button)?);
    assert!(!matches(&tree, "label", button)?);
    assert!(!matches(&tree, "#cancel", button)?);
    Ok(())
}

#[test]
fn classes_are_order_independent() -> Result<(), Box<dyn Error>> {
    let first = parse_complex_selector(".b.a.b")?;
    let second = parse_complex_selector(".a.b")?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn malformed_selectors_fail() {
    for text in [
        "..a", ".a.", "*div", ":hover(", ":unknown", ".a >", "> .a", ".a,,.b", "", "a:",
        ".a & .b", ":nth-child(x)",
    ] {
        assert!(
            SelectorList::parse(text)
                .is_err_and(|error| error.kind() == ParseErrorKind::InvalidSelector),
            "`{text}` should not parse"
        );
    }
}

#[test]
fn dynamic_pseudo_classes_are_subset_tests() -> Result<(), Box<dyn Error>> {
    let mut tree = TestTree::with_root("root");
    let button = tree.add(0, "button", "");
    assert!(!matches(&tree, "button:hover", button)?);
    if let Some(node) = tree.nodes.get_mut(button) {
        node.pseudo = PseudoClass::HOVER | PseudoClass::ACTIVE;
    }
    assert!(matches(&tree, "button:hover", button)?);
    assert!(matches(&tree, ":active:hover", button)?);
    assert!(!matches(&tree, ":hover:focus", button)?);
    Ok(())
}

#[test]
fn structural_pseudo_classes() -> Result<(), Box<dyn Error>> {
    let mut tree = TestTree::with_root("root");
    let first = tree.add(0, "item", "");
    let middle = tree.add(0, "item", "");
    let last = tree.add(0, "item", "");
    let lonely = tree.add(middle, "item", "");
    assert!(matches(&tree, ":first-child", first)?);
    assert!(!matches(&tree, ":first-child", middle)?);
    assert!(matches(&tree, ":last-child", last)?);
    assert!(matches(&tree, ":only-child", lonely)?);
    assert!(!matches(&tree, ":only-child", first)?);
    assert!(matches(&tree, ":empty", first)?);
    assert!(!matches(&tree, ":empty", middle)?);
    Ok(())
}

#[test]
fn nth_child_over_ten_siblings() -> Result<(), Box<dyn Error>> {
    let mut tree = TestTree::with_root("root");
    let children: Vec<usize> = (0..10).map(|_| tree.add(0, "cell", "")).collect();
    let second = SelectorList::parse(":nth-child(2)")?;
    let hits: Vec<usize> = children
        .iter()
        .enumerate()
        .filter(|&(_, &child)| second.matches(&tree, child))
        .map(|(index, _)| index)
        .collect();
    assert_eq!(hits, vec![1]);

    let odd = SelectorList::parse("cell:nth-child(odd)")?;
    let odd_hits = children
        .iter()
        .filter(|&&child| odd.matches(&tree, child))
        .count();
    assert_eq!(odd_hits, 5);
    Ok(())
}

#[test]
fn combinators_backtrack() -> Result<(), Box<dyn Error>> {
    // root > a.outer > b > b > c.inner > d.target
    let mut tree = TestTree::with_root("root");
    let outer = tree.add(0, "a", "outer");
    let upper = tree.add(outer, "b", "");
    let lower = tree.add(upper, "b", "");
    let inner = tree.add(lower, "c", "inner");
    let target = tree.add(inner, "d", "target");
    assert!(matches(&tree, ".outer .target", target)?);
    assert!(matches(&tree, ".inner > .target", target)?);
    assert!(!matches(&tree, ".outer > .target", target)?);
    // The nearest `b` ancestor's parent is another `b`; only the farther one
    // sits directly under `a`.
    assert!(matches(&tree, "a > b .target", target)?);
    assert!(!matches(&tree, "c > b .target", target)?);
    Ok(())
}

#[test]
fn sibling_combinators() -> Result<(), Box<dyn Error>> {
    let mut tree = TestTree::with_root("root");
    let first = tree.add(0, "x", "first");
    let second = tree.add(0, "y", "second");
    let third = tree.add(0, "z", "third");
    assert!(matches(&tree, ".first + .second", second)?);
    assert!(!matches(&tree, ".first + .third", third)?);
    assert!(matches(&tree, ".first ~ .third", third)?);
    assert!(!matches(&tree, ".third ~ .first", first)?);
    Ok(())
}

#[test]
fn not_excludes() -> Result<(), Box<dyn Error>> {
    let mut tree = TestTree::with_root("root");
    let plain = tree.add(0, "button", "");
    let disabled = tree.add(0, "button", "disabled");
    assert!(matches(&tree, "button:not(.disabled)", plain)?);
    assert!(!matches(&tree, "button:not(.disabled)", disabled)?);
    assert!(!matches(&tree, "button:not(.x, .disabled)", disabled)?);
    Ok(())
}

#[test]
fn has_child_only_for_direct_children() -> Result<(), Box<dyn Error>> {
    let mut tree = TestTree::with_root("root");
    let direct = tree.add(0, "panel", "");
    tree.add(direct, "item", "child");
    let nested = tree.add(0, "panel", "");
    let wrapper = tree.add(nested, "item", "wrapper");
    tree.add(wrapper, "item", "child");

    assert!(matches(&tree, "panel:has(> .child)", direct)?);
    assert!(!matches(&tree, "panel:has(> .child)", nested)?);
    assert!(matches(&tree, "panel:has(.child)", nested)?);
    assert!(matches(&tree, "panel:has(> .wrapper .child)", nested)?);
    Ok(())
}

#[test]
fn has_sibling_forms() -> Result<(), Box<dyn Error>> {
    let mut tree = TestTree::with_root("root");
    let label = tree.add(0, "label", "");
    tree.add(0, "spacer", "");
    tree.add(0, "input", "");
    assert!(matches(&tree, "label:has(~ input)", label)?);
    assert!(!matches(&tree, "label:has(+ input)", label)?);
    assert!(matches(&tree, "label:has(+ spacer)", label)?);
    Ok(())
}

#[test]
fn empty_has_matches_everything() -> Result<(), Box<dyn Error>> {
    let mut tree = TestTree::with_root("root");
    let leaf = tree.add(0, "leaf", "");
    assert!(matches(&tree, "leaf:has()", leaf)?);
    Ok(())
}

#[test]
fn before_and_after_are_pseudo_elements() -> Result<(), Box<dyn Error>> {
    let mut tree = TestTree::with_root("root");
    let host = tree.add(0, "button", "");
    let before = tree.add(host, "button", "");
    if let Some(node) = tree.nodes.get_mut(before) {
        node.pseudo = PseudoClass::BEFORE;
    }
    assert!(matches(&tree, "button::before", before)?);
    assert!(matches(&tree, "button:before", before)?);
    assert!(!matches(&tree, "button::before", host)?);
    assert_eq!(
        specificity_of_complex(&parse_complex_selector("button::before")?),
        Specificity(0, 0, 2)
    );
    Ok(())
}

#[test]
fn specificity_triples() -> Result<(), Box<dyn Error>> {
    let weight = |text: &str| parse_complex_selector(text).map(|sel| specificity_of_complex(&sel));
    assert_eq!(weight("*")?, Specificity(0, 0, 0));
    assert_eq!(weight("button")?, Specificity(0, 0, 1));
    assert_eq!(weight(".a.b:hover")?, Specificity(0, 3, 0));
    assert_eq!(weight("#id .a > b")?, Specificity(1, 1, 1));
    assert_eq!(weight(":nth-child(2n)")?, Specificity(0, 1, 0));
    assert_eq!(weight("a:not(#x, .y)")?, Specificity(1, 0, 1));
    assert_eq!(weight("a:has(> .b .c)")?, Specificity(0, 2, 1));
    assert!(weight("#a")? > weight(".a.b.c.d")?);
    Ok(())
}

#[test]
fn relative_selectors_keep_their_combinator() -> Result<(), Box<dyn Error>> {
    let selector = parse_complex_selector("panel:has(+ .next, .deep)")?;
    let relatives = selector.first.has.first().ok_or("missing :has")?;
    let combinators: Vec<Combinator> = relatives.iter().map(|relative| relative.combinator).collect();
    assert_eq!(
        combinators,
        vec![Combinator::AdjacentSibling, Combinator::Descendant]
    );
    Ok(())
}

#[test]
fn has_usage_is_detected_through_not() -> Result<(), Box<dyn Error>> {
    assert!(SelectorList::parse(".a:has(.b) .c")?.uses_has());
    assert!(SelectorList::parse(".x, .c:not(:has(> .d))")?.uses_has());
    assert!(!SelectorList::parse(".a > .b, .c:not(.d) + .e")?.uses_has());
    Ok(())
}
