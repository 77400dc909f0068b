#![cfg(test)]

use core::error::Error;
use std::collections::HashMap;
use std::fs;

use css_color::Color;
use css_selectors::PseudoClass;
use css_stylesheet::{MemoryFileSystem, OsFileSystem, StyleSheet};
use css_values_units::Length;
use style_engine::{PanelId, StyleConfig, StyleEngine};

const EPSILON: f32 = 1e-3;

fn engine() -> StyleEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    StyleEngine::new(StyleConfig::new(16.0, 16.0, 800.0, 600.0, false))
}

/// A root panel with `sheet` attached and `count` children named `element`.
fn populated(
    engine: &mut StyleEngine,
    sheet: &str,
    element: &str,
    count: usize,
) -> Result<(PanelId, Vec<PanelId>), Box<dyn Error>> {
    let id = engine.add_sheet(StyleSheet::from_string(sheet)?);
    let tree = engine.tree_mut();
    let root = tree.create("root");
    tree.attach_sheet(root, id)?;
    let mut children = Vec::new();
    for _ in 0..count {
        let child = tree.create(element);
        tree.append_child(root, child)?;
        children.push(child);
    }
    Ok((root, children))
}

fn width_of(engine: &StyleEngine, id: PanelId) -> Option<f32> {
    engine.rect(id).map(|rect| rect.width)
}

#[test]
fn tick_cascades_inherits_and_lays_out() -> Result<(), Box<dyn Error>> {
    let mut engine = engine();
    let (root, children) = populated(
        &mut engine,
        "root { width: 100vw; height: 100vh; font-size: 20px; color: red; } \
         label { width: 2em; height: 1rem; }",
        "label",
        1,
    )?;
    let label = *children.first().ok_or("no label")?;
    engine.tick()?;

    let computed = engine.computed(label).ok_or("label not styled")?;
    assert_eq!(computed.styles.color, Color::parse("red"));
    assert_eq!(computed.styles.font_size, Some(Length::px(20.0)));
    assert!((width_of(&engine, root).ok_or("no root rect")? - 800.0).abs() < EPSILON);
    assert!((width_of(&engine, label).ok_or("no label rect")? - 40.0).abs() < EPSILON);
    let height = engine.rect(label).ok_or("no label rect")?.height;
    assert!((height - 16.0).abs() < EPSILON);
    Ok(())
}

#[test]
fn relative_font_sizes_compound_once_per_level() -> Result<(), Box<dyn Error>> {
    let mut engine = engine();
    let (root, children) = populated(&mut engine, "root { font-size: 2em; }", "label", 1)?;
    let label = *children.first().ok_or("no label")?;
    engine.tick()?;
    let root_size = engine.tree().panel(root)?.font_size();
    let label_size = engine.tree().panel(label)?.font_size();
    assert!((root_size - 32.0).abs() < EPSILON);
    assert!((label_size - 32.0).abs() < EPSILON);
    Ok(())
}

#[test]
fn unchanged_tree_does_no_work() -> Result<(), Box<dyn Error>> {
    let mut engine = engine();
    populated(&mut engine, ".x { color: red; }", "item", 2)?;
    engine.tick()?;
    assert_eq!(engine.perf().last_style_recomputes, 3);
    engine.tick()?;
    assert_eq!(engine.perf().last_style_recomputes, 0);
    assert_eq!(engine.perf().last_layout_pushes, 0);
    assert_eq!(engine.perf().total_style_recomputes, 3);
    assert_eq!(engine.perf().ticks, 2);
    Ok(())
}

#[test]
fn class_change_restyles_parent_subtree() -> Result<(), Box<dyn Error>> {
    let mut engine = engine();
    let (_, children) = populated(&mut engine, ".x { color: red; }", "item", 2)?;
    let first = *children.first().ok_or("no child")?;
    engine.tick()?;

    assert!(engine.tree_mut().add_class(first, "x")?);
    assert!(!engine.tree_mut().add_class(first, "x")?);
    engine.tick()?;
    assert_eq!(engine.perf().last_style_recomputes, 3);
    let computed = engine.computed(first).ok_or("not styled")?;
    assert_eq!(computed.styles.color, Color::parse("red"));
    Ok(())
}

#[test]
fn nth_child_follows_insertions() -> Result<(), Box<dyn Error>> {
    let mut engine = engine();
    let (root, cells) = populated(
        &mut engine,
        "cell:nth-child(2) { background-color: red; }",
        "cell",
        10,
    )?;
    engine.tick()?;
    let painted = |engine: &StyleEngine, cells: &[PanelId]| -> Vec<usize> {
        cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| engine.tree().get(cell).is_some_and(|panel| panel.capabilities().background))
            .map(|(index, _)| index)
            .collect()
    };
    assert_eq!(painted(&engine, &cells), vec![1]);

    let fresh = engine.tree_mut().create("cell");
    engine.tree_mut().insert_child(root, 0, fresh)?;
    engine.tick()?;
    assert_eq!(painted(&engine, &cells), vec![0]);
    assert!(!engine.tree().panel(fresh)?.capabilities().background);
    Ok(())
}

#[test]
fn has_selector_tracks_descendant_changes() -> Result<(), Box<dyn Error>> {
    let mut engine = engine();
    let (root, children) = populated(
        &mut engine,
        "group:has(> .selected) { opacity: 0.5; }",
        "group",
        1,
    )?;
    let group = *children.first().ok_or("no group")?;
    let item = engine.tree_mut().create("item");
    engine.tree_mut().append_child(group, item)?;
    engine.tick()?;
    assert_eq!(engine.computed(group).and_then(|computed| computed.styles.opacity), None);

    engine.tree_mut().add_class(item, "selected")?;
    engine.tick()?;
    assert_eq!(engine.computed(group).and_then(|computed| computed.styles.opacity), Some(0.5));
    assert_eq!(engine.computed(root).and_then(|computed| computed.styles.opacity), None);
    Ok(())
}

/// Width assigned by the cascade, as a length.
fn styled_width(engine: &StyleEngine, id: PanelId) -> Option<Length> {
    engine.computed(id).and_then(|computed| computed.styles.width.clone())
}

/// Create `element` with `classes` under `parent`.
fn child_of(
    engine: &mut StyleEngine,
    parent: PanelId,
    element: &str,
    classes: &str,
) -> Result<PanelId, Box<dyn Error>> {
    let tree = engine.tree_mut();
    let child = tree.create(element);
    tree.set_classes(child, classes)?;
    tree.append_child(parent, child)?;
    Ok(child)
}

#[test]
fn has_match_restyles_cousins() -> Result<(), Box<dyn Error>> {
    let mut engine = engine();
    let (root, _) = populated(&mut engine, ".a:has(.b) .c { width: 10px; }", "item", 0)?;
    let anchor = child_of(&mut engine, root, "a", "a")?;
    let upper = child_of(&mut engine, anchor, "x", "")?;
    let target = child_of(&mut engine, upper, "target", "")?;
    let lower = child_of(&mut engine, anchor, "y", "")?;
    let cousin = child_of(&mut engine, lower, "c", "c")?;
    engine.tick()?;
    assert_eq!(styled_width(&engine, cousin), None);

    engine.tree_mut().add_class(target, "b")?;
    engine.tick()?;
    assert_eq!(styled_width(&engine, cousin), Some(Length::px(10.0)));

    engine.tree_mut().remove_class(target, "b")?;
    engine.tick()?;
    assert_eq!(styled_width(&engine, cousin), None);
    Ok(())
}

#[test]
fn has_match_restyles_adjacent_sibling() -> Result<(), Box<dyn Error>> {
    let mut engine = engine();
    let (root, _) = populated(&mut engine, ".a:has(.b) + .c { width: 10px; }", "item", 0)?;
    let anchor = child_of(&mut engine, root, "a", "a")?;
    let middle = child_of(&mut engine, anchor, "x", "")?;
    let target = child_of(&mut engine, middle, "target", "")?;
    let sibling = child_of(&mut engine, root, "c", "c")?;
    engine.tick()?;
    assert_eq!(styled_width(&engine, sibling), None);

    engine.tree_mut().add_class(target, "b")?;
    engine.tick()?;
    assert_eq!(styled_width(&engine, sibling), Some(Length::px(10.0)));
    Ok(())
}

#[test]
fn has_match_restyles_general_siblings() -> Result<(), Box<dyn Error>> {
    let mut engine = engine();
    let (root, _) = populated(
        &mut engine,
        ".a:has(.b) ~ .c { width: 10px; } .x:has(~ .y .z) { height: 5px; }",
        "item",
        0,
    )?;
    let anchor = child_of(&mut engine, root, "a", "a")?;
    let target = child_of(&mut engine, anchor, "target", "")?;
    child_of(&mut engine, root, "spacer", "")?;
    let later = child_of(&mut engine, root, "c", "c")?;
    let leader = child_of(&mut engine, root, "lead", "x")?;
    let holder = child_of(&mut engine, root, "box", "y")?;
    let deep = child_of(&mut engine, holder, "leaf", "")?;
    engine.tick()?;
    assert_eq!(styled_width(&engine, later), None);
    assert_eq!(engine.computed(leader).and_then(|computed| computed.styles.height.clone()), None);

    engine.tree_mut().add_class(target, "b")?;
    engine.tree_mut().add_class(deep, "z")?;
    engine.tick()?;
    assert_eq!(styled_width(&engine, later), Some(Length::px(10.0)));
    assert_eq!(
        engine.computed(leader).and_then(|computed| computed.styles.height.clone()),
        Some(Length::px(5.0))
    );
    Ok(())
}

#[test]
fn sheets_without_has_keep_narrow_invalidation() -> Result<(), Box<dyn Error>> {
    let mut engine = engine();
    let (root, _) = populated(&mut engine, ".a .c { width: 10px; }", "item", 0)?;
    let anchor = child_of(&mut engine, root, "a", "a")?;
    let upper = child_of(&mut engine, anchor, "x", "")?;
    let target = child_of(&mut engine, upper, "target", "")?;
    child_of(&mut engine, anchor, "c", "c")?;
    engine.tick()?;

    engine.tree_mut().add_class(target, "b")?;
    engine.tick()?;
    // `target`'s parent subtree plus `anchor` and `root`.
    assert_eq!(engine.perf().last_style_recomputes, 4);
    Ok(())
}

#[test]
fn removing_a_sheet_detaches_it() -> Result<(), Box<dyn Error>> {
    let mut engine = engine();
    let (root, children) = populated(&mut engine, "item { width: 5px; }", "item", 1)?;
    let item = *children.first().ok_or("no item")?;
    let sheet = *engine.tree().panel(root)?.sheets().first().ok_or("no sheet")?;
    engine.tick()?;
    assert_eq!(styled_width(&engine, item), Some(Length::px(5.0)));

    engine.remove_sheet(sheet)?;
    assert!(engine.tree().panel(root)?.sheets().is_empty());
    assert!(engine.sheets().is_empty());
    engine.tick()?;
    assert_eq!(styled_width(&engine, item), None);
    assert!(engine.remove_sheet(sheet).is_err());
    Ok(())
}

#[test]
fn pseudo_state_toggles() -> Result<(), Box<dyn Error>> {
    let mut engine = engine();
    let (_, children) = populated(
        &mut engine,
        "button { opacity: 0.5; } button:hover { opacity: 1; }",
        "button",
        1,
    )?;
    let button = *children.first().ok_or("no button")?;
    engine.tick()?;
    engine.tree_mut().set_pseudo(button, PseudoClass::HOVER, true)?;
    engine.tick()?;
    assert_eq!(engine.computed(button).and_then(|computed| computed.styles.opacity), Some(1.0));
    engine.tree_mut().set_pseudo(button, PseudoClass::HOVER, false)?;
    engine.tick()?;
    assert_eq!(engine.computed(button).and_then(|computed| computed.styles.opacity), Some(0.5));
    Ok(())
}

#[test]
fn sheets_apply_to_their_subtree_only() -> Result<(), Box<dyn Error>> {
    let mut engine = engine();
    let (_, children) = populated(&mut engine, "item { width: 5px; }", "item", 2)?;
    let (first, second) = match children.as_slice() {
        [first, second] => (*first, *second),
        _ => return Err("expected two items".into()),
    };
    let local = engine.add_sheet(StyleSheet::from_string("item { width: 9px; }")?);
    engine.tree_mut().attach_sheet(second, local)?;
    engine.tick()?;
    assert_eq!(
        engine.computed(first).and_then(|computed| computed.styles.width.clone()),
        Some(Length::px(5.0))
    );
    assert_eq!(
        engine.computed(second).and_then(|computed| computed.styles.width.clone()),
        Some(Length::px(9.0))
    );
    Ok(())
}

#[test]
fn replacing_a_sheet_restyles_its_holders() -> Result<(), Box<dyn Error>> {
    let mut engine = engine();
    let sheet = engine.add_sheet(StyleSheet::from_string("item { color: red; }")?);
    let root = engine.tree_mut().create("item");
    engine.tree_mut().attach_sheet(root, sheet)?;
    engine.tick()?;
    engine.replace_sheet(sheet, StyleSheet::from_string("item { color: blue; }")?)?;
    engine.tick()?;
    assert_eq!(
        engine.computed(root).and_then(|computed| computed.styles.color),
        Color::parse("blue")
    );
    assert_eq!(engine.perf().last_style_recomputes, 1);
    Ok(())
}

#[test]
fn hot_reload_swaps_sheets_and_keeps_them_on_failure() -> Result<(), Box<dyn Error>> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut files = MemoryFileSystem::new()
        .with_file("ui/theme.scss", "$accent: red;")
        .with_file("ui/hud.scss", "@import \"theme.scss\";\nlabel { color: $accent; }");
    let mut engine = StyleEngine::new(StyleConfig::new(16.0, 16.0, 800.0, 600.0, true));
    let sheet = engine.load_sheet(&files, "ui/hud.scss")?;
    let label = engine.tree_mut().create("label");
    engine.tree_mut().attach_sheet(label, sheet)?;
    engine.tick()?;
    assert_eq!(engine.computed(label).and_then(|computed| computed.styles.color), Color::parse("red"));

    files.insert("ui/theme.scss", "$accent: blue;");
    assert_eq!(engine.reload_changed(&files, "ui/other.scss"), 0);
    assert_eq!(engine.reload_changed(&files, "ui/theme.scss"), 1);
    engine.tick()?;
    assert_eq!(engine.computed(label).and_then(|computed| computed.styles.color), Color::parse("blue"));

    files.insert("ui/hud.scss", "label { color: green;");
    assert_eq!(engine.reload_changed(&files, "ui/hud.scss"), 0);
    engine.tick()?;
    assert_eq!(engine.computed(label).and_then(|computed| computed.styles.color), Color::parse("blue"));
    Ok(())
}

#[test]
fn hot_reload_off_ignores_changes() -> Result<(), Box<dyn Error>> {
    let files = MemoryFileSystem::new().with_file("a.scss", "a { width: 1px; }");
    let mut engine = engine();
    engine.load_sheet(&files, "a.scss")?;
    assert_eq!(engine.reload_changed(&files, "a.scss"), 0);
    Ok(())
}

#[test]
fn hot_reload_from_disk() -> Result<(), Box<dyn Error>> {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("panel.scss"), "panel { width: 10px; height: 10px; }")?;
    let files = OsFileSystem::new(dir.path());
    let mut engine = StyleEngine::new(StyleConfig::new(16.0, 16.0, 800.0, 600.0, true));
    let sheet = engine.load_sheet(&files, "panel.scss")?;
    let panel = engine.tree_mut().create("panel");
    engine.tree_mut().attach_sheet(panel, sheet)?;
    engine.tick()?;
    assert!((width_of(&engine, panel).ok_or("no rect")? - 10.0).abs() < EPSILON);

    fs::write(dir.path().join("panel.scss"), "panel { width: 30px; height: 10px; }")?;
    assert_eq!(engine.reload_changed(&files, "./panel.scss"), 1);
    engine.tick()?;
    assert!((width_of(&engine, panel).ok_or("no rect")? - 30.0).abs() < EPSILON);
    Ok(())
}

#[test]
fn render_generation_tracks_visual_changes() -> Result<(), Box<dyn Error>> {
    let mut engine = engine();
    let (root, children) = populated(
        &mut engine,
        "item { width: 10px; height: 10px; } .wide { width: 20px; }",
        "item",
        1,
    )?;
    let item = *children.first().ok_or("no item")?;
    engine.tick()?;
    assert!(engine.needs_render(item));
    engine.mark_rendered(item);
    engine.mark_rendered(root);
    engine.tick()?;
    assert!(!engine.needs_render(item));

    engine.tree_mut().add_class(item, "wide")?;
    engine.tick()?;
    assert!(engine.needs_render(item));
    assert!((width_of(&engine, item).ok_or("no rect")? - 20.0).abs() < EPSILON);
    Ok(())
}

#[test]
fn hit_testing_prefers_the_topmost_receiver() -> Result<(), Box<dyn Error>> {
    let mut engine = engine();
    let (root, children) = populated(
        &mut engine,
        "root { width: 100vw; height: 100vh; } \
         cell { width: 50px; height: 50px; } \
         .ghost { pointer-events: none; } \
         .gone { display: none; }",
        "cell",
        2,
    )?;
    let (first, second) = match children.as_slice() {
        [first, second] => (*first, *second),
        _ => return Err("expected two cells".into()),
    };
    engine.tick()?;
    assert_eq!(engine.hit_test(10.0, 10.0), Some(first));
    assert_eq!(engine.hit_test(60.0, 10.0), Some(second));
    assert_eq!(engine.hit_test(500.0, 500.0), Some(root));
    assert_eq!(engine.hit_test(900.0, 10.0), None);

    engine.tree_mut().add_class(second, "ghost")?;
    engine.tick()?;
    assert_eq!(engine.hit_test(60.0, 10.0), Some(root));

    engine.tree_mut().add_class(first, "gone")?;
    engine.tick()?;
    assert_eq!(engine.hit_test(10.0, 10.0), Some(root));
    Ok(())
}

#[test]
fn removal_releases_layout_nodes() -> Result<(), Box<dyn Error>> {
    let mut engine = engine();
    let (_, children) = populated(&mut engine, "", "item", 3)?;
    engine.tick()?;
    assert_eq!(engine.layout_engine().node_count(), 4);

    let first = *children.first().ok_or("no item")?;
    let leaf = engine.tree_mut().create("leaf");
    engine.tree_mut().append_child(first, leaf)?;
    let removed = engine.tree_mut().remove(first)?;
    assert_eq!(removed, vec![first, leaf]);
    engine.tick()?;
    assert_eq!(engine.tree().len(), 3);
    assert_eq!(engine.layout_engine().node_count(), 3);
    assert!(engine.computed(first).is_none());
    Ok(())
}

#[test]
fn viewport_change_relays_viewport_units() -> Result<(), Box<dyn Error>> {
    let mut engine = engine();
    let (root, _) = populated(&mut engine, "root { width: 50vw; height: 10px; }", "item", 0)?;
    engine.tick()?;
    assert!((width_of(&engine, root).ok_or("no rect")? - 400.0).abs() < EPSILON);
    engine.set_viewport(1000.0, 600.0);
    engine.tick()?;
    assert!((width_of(&engine, root).ok_or("no rect")? - 500.0).abs() < EPSILON);
    Ok(())
}

#[test]
fn config_reads_variables_and_clamps() {
    let variables = HashMap::from([
        ("PANEL_STYLE_FONT_SIZE", "12"),
        ("PANEL_STYLE_VIEWPORT", "1280x720"),
        ("PANEL_STYLE_HOT_RELOAD", "true"),
    ]);
    let config = StyleConfig::from_lookup(|name| variables.get(name).map(|value| (*value).to_owned()));
    assert!((config.default_font_size - 12.0).abs() < EPSILON);
    assert!((config.root_font_size - 12.0).abs() < EPSILON);
    assert!((config.viewport_width - 1280.0).abs() < EPSILON);
    assert!((config.viewport_height - 720.0).abs() < EPSILON);
    assert!(config.hot_reload);

    let broken = StyleConfig::from_lookup(|name| {
        (name == "PANEL_STYLE_FONT_SIZE").then(|| "big".to_owned())
    });
    assert!((broken.default_font_size - 16.0).abs() < EPSILON);
    assert!(!broken.hot_reload);

    let clamped = StyleConfig::new(0.0, -4.0, -10.0, 20.0, false);
    assert!((clamped.default_font_size - 16.0).abs() < EPSILON);
    assert!((clamped.root_font_size - 16.0).abs() < EPSILON);
    assert!(clamped.viewport_width.abs() < EPSILON);
}
