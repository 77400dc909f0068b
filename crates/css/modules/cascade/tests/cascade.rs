#![cfg(test)]

use core::error::Error;
use css_cascade::{
    CascadePriority, ComputedStyle, Origin, ScopedSheet, compare_priority, compute_style,
    is_inherited, matched_blocks,
};
use css_color::Color;
use css_selectors::{ElementAdapter, PseudoClass, Specificity};
use css_stylesheet::StyleSheet;
use css_values_units::Length;

#[derive(Default)]
struct TestNode {
    name: String,
    id: Option<String>,
    classes: Vec<String>,
    pseudo: PseudoClass,
    parent: Option<usize>,
    children: Vec<usize>,
}

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

fn cascade(tree: &TestTree, element: usize, sheet: &StyleSheet) -> ComputedStyle {
    compute_style(tree, element, &[ScopedSheet::author(sheet)], None)
}

#[test]
fn specificity_beats_source_order() -> Result<(), Box<dyn Error>> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut tree = TestTree::with_root("root");
    let button = tree.add(0, "button", "primary");

    for text in [
        "button.primary { width: 20px; } button { width: 10px; }",
        "button { width: 10px; } button.primary { width: 20px; }",
    ] {
        let sheet = StyleSheet::from_string(text)?;
        let computed = cascade(&tree, button, &sheet);
        assert_eq!(computed.styles.width, Some(Length::px(20.0)), "{text}");
        assert_eq!(computed.matched, 2);
    }
    Ok(())
}

#[test]
fn later_block_wins_on_equal_specificity() -> Result<(), Box<dyn Error>> {
    let mut tree = TestTree::with_root("root");
    let label = tree.add(0, "label", "a b");
    let sheet = StyleSheet::from_string(".a { color: red; } .b { color: blue; }")?;
    assert_eq!(cascade(&tree, label, &sheet).styles.color, Color::parse("blue"));
    Ok(())
}

#[test]
fn unset_properties_never_clear_lower_blocks() -> Result<(), Box<dyn Error>> {
    let mut tree = TestTree::with_root("root");
    let panel = tree.add(0, "panel", "card");
    let sheet = StyleSheet::from_string(
        "panel { width: 10px; height: 4px; } panel.card { width: 30px; }",
    )?;
    let computed = cascade(&tree, panel, &sheet);
    assert_eq!(computed.styles.width, Some(Length::px(30.0)));
    assert_eq!(computed.styles.height, Some(Length::px(4.0)));
    Ok(())
}

#[test]
fn inherited_properties_come_from_parent() -> Result<(), Box<dyn Error>> {
    let mut tree = TestTree::with_root("root");
    let outer = tree.add(0, "panel", "outer");
    let inner = tree.add(outer, "label", "");
    let sheet = StyleSheet::from_string(
        ".outer { color: red; font-size: 20px; width: 50px; } label { font-size: 12px; }",
    )?;
    let scoped = [ScopedSheet::author(&sheet)];
    let parent = compute_style(&tree, outer, &scoped, None);
    let child = compute_style(&tree, inner, &scoped, Some(&parent));
    assert_eq!(child.styles.color, Color::parse("red"));
    assert_eq!(child.styles.font_size, Some(Length::px(12.0)));
    assert_eq!(child.styles.width, None);
    assert!(is_inherited("color"));
    assert!(!is_inherited("width"));
    Ok(())
}

#[test]
fn nth_child_styles_one_of_ten() -> Result<(), Box<dyn Error>> {
    let mut tree = TestTree::with_root("root");
    let cells: Vec<usize> = (0..10).map(|_| tree.add(0, "cell", "")).collect();
    let sheet = StyleSheet::from_string("cell:nth-child(2) { background-color: red; }")?;
    let with_background: Vec<usize> = cells
        .iter()
        .enumerate()
        .filter(|&(_, &cell)| cascade(&tree, cell, &sheet).has_background)
        .map(|(index, _)| index)
        .collect();
    assert_eq!(with_background, vec![1]);
    Ok(())
}

#[test]
fn pseudo_state_selects_blocks() -> Result<(), Box<dyn Error>> {
    let mut tree = TestTree::with_root("root");
    let button = tree.add(0, "button", "");
    let sheet = StyleSheet::from_string("button { opacity: 0.5; } button:hover { opacity: 1; }")?;
    assert_eq!(cascade(&tree, button, &sheet).styles.opacity, Some(0.5));
    if let Some(node) = tree.nodes.get_mut(button) {
        node.pseudo = PseudoClass::HOVER;
    }
    assert_eq!(cascade(&tree, button, &sheet).styles.opacity, Some(1.0));
    Ok(())
}

#[test]
fn cascade_is_idempotent() -> Result<(), Box<dyn Error>> {
    let mut tree = TestTree::with_root("root");
    let button = tree.add(0, "button", "primary");
    let sheet = StyleSheet::from_string(
        "button { width: 1px; filter: blur(2px); } .primary { overflow: scroll; }",
    )?;
    let first = cascade(&tree, button, &sheet);
    let second = cascade(&tree, button, &sheet);
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn later_sheets_beat_earlier_sheets() -> Result<(), Box<dyn Error>> {
    let mut tree = TestTree::with_root("root");
    let button = tree.add(0, "button", "");
    let ancestor = StyleSheet::from_string("button { width: 1px; height: 1px; }")?;
    let own = StyleSheet::from_string("button { width: 2px; }")?;
    let computed = compute_style(
        &tree,
        button,
        &[ScopedSheet::author(&ancestor), ScopedSheet::author(&own)],
        None,
    );
    assert_eq!(computed.styles.width, Some(Length::px(2.0)));
    assert_eq!(computed.styles.height, Some(Length::px(1.0)));
    Ok(())
}

#[test]
fn author_origin_beats_user_agent() -> Result<(), Box<dyn Error>> {
    let mut tree = TestTree::with_root("root");
    let button = tree.add(0, "button", "primary");
    let defaults = StyleSheet::from_string("button.primary { width: 5px; }")?;
    let author = StyleSheet::from_string("button { width: 9px; }")?;
    let sheets = [
        ScopedSheet::author(&author),
        ScopedSheet {
            sheet: &defaults,
            origin: Origin::UserAgent,
        },
    ];
    let computed = compute_style(&tree, button, &sheets, None);
    assert_eq!(computed.styles.width, Some(Length::px(9.0)));

    let order: Vec<Origin> = matched_blocks(&tree, button, &sheets)
        .iter()
        .map(|entry| entry.priority.origin)
        .collect();
    assert_eq!(order, vec![Origin::UserAgent, Origin::Author]);
    Ok(())
}

#[test]
fn priority_ordering() {
    let low = CascadePriority::new(Origin::Author, Specificity(0, 1, 0), 0, 5);
    let later = CascadePriority::new(Origin::Author, Specificity(0, 1, 0), 0, 6);
    let other_sheet = CascadePriority::new(Origin::Author, Specificity(0, 1, 0), 1, 0);
    let specific = CascadePriority::new(Origin::Author, Specificity(1, 0, 0), 0, 0);
    assert!(compare_priority(&later, &low).is_gt());
    assert!(other_sheet > later);
    assert!(specific > other_sheet);
    assert!(CascadePriority::new(Origin::User, Specificity(9, 9, 9), 9, 9) < low);
}

#[test]
fn derived_flags() -> Result<(), Box<dyn Error>> {
    let mut tree = TestTree::with_root("root");
    let panel = tree.add(0, "panel", "");
    let sheet = StyleSheet::from_string(
        "panel { background-color: transparent; filter: blur(2px); \
         backdrop-filter: blur(4px); overflow-y: scroll; }",
    )?;
    let computed = cascade(&tree, panel, &sheet);
    assert!(!computed.has_background);
    assert!(computed.has_filter);
    assert!(computed.has_backdrop_filter);
    assert!(computed.is_scrollable());
    Ok(())
}
