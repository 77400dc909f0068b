//! The per-tick pipeline: cascade, then the layout bridge, parents first.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use css_cascade::{ComputedStyle, ScopedSheet, compute_style};
use css_styles::{Display, PointerEvents, Styles};
use css_stylesheet::{FileSystem, StyleSheet};
use css_values_units::Length;
use layout_bridge::{LayoutContext, LayoutEngine, LayoutRect, TaffyLayout, push_styles};
use log::{debug, info, warn};
use rustc_hash::FxHashMap;
use tracing::info_span;

use crate::config::StyleConfig;
use crate::registry::{SheetId, SheetRegistry};
use crate::tree::{PanelId, PanelTree};

/// Work counters for the last and all ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerfCounters {
    pub ticks: u64,
    /// Panels whose cascade ran in the last tick.
    pub last_style_recomputes: u64,
    pub total_style_recomputes: u64,
    /// Panels whose layout inputs were pushed in the last tick.
    pub last_layout_pushes: u64,
    pub total_layout_pushes: u64,
}

/// Panel tree, shared sheets and a layout engine kept in sync.
pub struct StyleEngine<E: LayoutEngine = TaffyLayout> {
    tree: PanelTree,
    sheets: SheetRegistry,
    config: StyleConfig,
    layout: E,
    layout_nodes: FxHashMap<PanelId, E::Node>,
    perf: PerfCounters,
}

impl StyleEngine<TaffyLayout> {
    pub fn new(config: StyleConfig) -> Self {
        Self::with_layout_engine(config, TaffyLayout::new())
    }
}

impl Default for StyleEngine<TaffyLayout> {
    fn default() -> Self {
        Self::new(StyleConfig::default())
    }
}

impl<E: LayoutEngine> StyleEngine<E> {
    pub fn with_layout_engine(config: StyleConfig, layout: E) -> Self {
        Self {
            tree: PanelTree::new(),
            sheets: SheetRegistry::new(),
            config,
            layout,
            layout_nodes: FxHashMap::default(),
            perf: PerfCounters::default(),
        }
    }

    #[inline]
    pub const fn tree(&self) -> &PanelTree {
        &self.tree
    }

    /// Mutations through the tree bump the generations the next tick reads.
    #[inline]
    pub const fn tree_mut(&mut self) -> &mut PanelTree {
        &mut self.tree
    }

    #[inline]
    pub const fn sheets(&self) -> &SheetRegistry {
        &self.sheets
    }

    #[inline]
    pub const fn config(&self) -> &StyleConfig {
        &self.config
    }

    #[inline]
    pub const fn layout_engine(&self) -> &E {
        &self.layout
    }

    #[inline]
    pub const fn perf(&self) -> PerfCounters {
        self.perf
    }

    /// Change the viewport; every panel is restyled and relaid on the next tick.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        let config = StyleConfig::new(
            self.config.default_font_size,
            self.config.root_font_size,
            width,
            height,
            self.config.hot_reload,
        );
        if config != self.config {
            self.config = config;
            self.tree.invalidate_all();
        }
    }

    pub fn add_sheet(&mut self, sheet: StyleSheet) -> SheetId {
        let uses_has = sheet.uses_has();
        let id = self.sheets.insert(sheet);
        self.tree.set_sheet_uses_has(id, uses_has);
        id
    }

    /// Unregister `id`, detaching it from every panel it was attached to.
    ///
    /// # Errors
    /// Fails when `id` is not registered.
    pub fn remove_sheet(&mut self, id: SheetId) -> Result<()> {
        self.sheets
            .remove(id)
            .with_context(|| format!("removing unknown {id}"))?;
        let holders = self.tree.forget_sheet(id);
        debug!(target: "style_engine", "removed {id}; {holders} attached subtrees restyle");
        Ok(())
    }

    /// Parse `path` from `files` and register it.
    ///
    /// # Errors
    /// Fails when the sheet or one of its imports cannot be read or parsed.
    pub fn load_sheet(&mut self, files: &dyn FileSystem, path: &str) -> Result<SheetId> {
        let sheet = StyleSheet::from_file(files, path)?;
        info!(target: "style_engine", "loaded {path}: {} blocks", sheet.blocks().len());
        Ok(self.add_sheet(sheet))
    }

    /// Swap the registered sheet `id` for `sheet` and restyle every subtree
    /// it is attached to.
    ///
    /// # Errors
    /// Fails when `id` is not registered.
    pub fn replace_sheet(&mut self, id: SheetId, sheet: StyleSheet) -> Result<()> {
        let uses_has = sheet.uses_has();
        self.sheets
            .replace(id, sheet)
            .with_context(|| format!("replacing unknown {id}"))?;
        self.tree.set_sheet_uses_has(id, uses_has);
        let holders = self.tree.invalidate_sheet(id);
        debug!(target: "style_engine", "replaced {id}; {holders} attached subtrees restyle");
        Ok(())
    }

    /// Re-read sheet `id` from its file. On failure the previous sheet stays
    /// in place.
    ///
    /// # Errors
    /// Fails for unknown ids, sheets without a file name and read or parse
    /// errors.
    pub fn reload_sheet(&mut self, id: SheetId, files: &dyn FileSystem) -> Result<()> {
        let current = self
            .sheets
            .get(id)
            .with_context(|| format!("reloading unknown {id}"))?;
        let path = current
            .file_name()
            .with_context(|| format!("{id} was not loaded from a file"))?
            .to_owned();
        let sheet = StyleSheet::from_file(files, &path)?;
        self.replace_sheet(id, sheet)?;
        info!(target: "style_engine", "reloaded {path}");
        Ok(())
    }

    /// Reload every sheet that reads `path`, directly or through an import.
    /// Returns how many were reloaded; does nothing unless hot reload is on.
    /// Sheets that fail to reload are kept and logged.
    pub fn reload_changed(&mut self, files: &dyn FileSystem, path: &str) -> usize {
        if !self.config.hot_reload {
            debug!(target: "style_engine", "hot reload disabled; ignoring change to {path}");
            return 0;
        }
        let affected: Vec<SheetId> = self
            .sheets
            .ids()
            .into_iter()
            .filter(|&id| {
                self.sheets
                    .get(id)
                    .is_some_and(|sheet| sheet.depends_on(path))
            })
            .collect();
        let mut reloaded = 0;
        for id in affected {
            match self.reload_sheet(id, files) {
                Ok(()) => reloaded += 1,
                Err(error) => {
                    warn!(target: "style_engine", "keeping previous {id}: {error:#}");
                }
            }
        }
        reloaded
    }

    /// Computed style of `id` as of the last tick.
    pub fn computed(&self, id: PanelId) -> Option<&ComputedStyle> {
        self.tree.get(id)?.computed()
    }

    /// Border box of `id` in viewport coordinates as of the last tick.
    pub fn rect(&self, id: PanelId) -> Option<LayoutRect> {
        self.tree.get(id)?.rect().copied()
    }

    /// Whether `id` changed visually since [`StyleEngine::mark_rendered`].
    pub fn needs_render(&self, id: PanelId) -> bool {
        self.tree
            .get(id)
            .is_some_and(|panel| panel.current.render != panel.seen.render)
    }

    pub fn mark_rendered(&mut self, id: PanelId) {
        if let Some(panel) = self.tree.get_mut(id) {
            panel.seen.render = panel.current.render;
        }
    }

    /// Recompute what is stale: the cascade for every panel whose style
    /// generation moved, then layout inputs for every panel whose layout
    /// generation moved, then one layout pass per root.
    ///
    /// # Errors
    /// Propagates layout engine failures.
    pub fn tick(&mut self) -> Result<()> {
        self.sync_layout_nodes()?;
        let order = self.tree.preorder();
        let restyled = self.recompute_styles(&order);
        let pushed = self.push_layout(&order)?;
        if pushed > 0 {
            self.compute_layout(&order)?;
        }
        self.perf.ticks = self.perf.ticks.saturating_add(1);
        self.perf.last_style_recomputes = restyled;
        self.perf.total_style_recomputes = self.perf.total_style_recomputes.saturating_add(restyled);
        self.perf.last_layout_pushes = pushed;
        self.perf.total_layout_pushes = self.perf.total_layout_pushes.saturating_add(pushed);
        debug!(
            target: "style_engine",
            "tick {}: restyled {restyled}, relaid {pushed}",
            self.perf.ticks
        );
        Ok(())
    }

    /// Drop engine nodes of removed panels and create nodes for new ones.
    fn sync_layout_nodes(&mut self) -> Result<()> {
        for removed in self.tree.take_removed() {
            if let Some(node) = self.layout_nodes.remove(&removed) {
                self.layout.remove_node(node)?;
            }
        }
        for id in self.tree.preorder() {
            if !self.layout_nodes.contains_key(&id) {
                let node = self.layout.create_node()?;
                self.layout_nodes.insert(id, node);
            }
        }
        Ok(())
    }

    fn scoped_sheets(&self, id: PanelId) -> Vec<Arc<StyleSheet>> {
        self.tree
            .sheets_in_scope(id)
            .into_iter()
            .filter_map(|sheet| self.sheets.get(sheet).map(Arc::clone))
            .collect()
    }

    fn recompute_styles(&mut self, order: &[PanelId]) -> u64 {
        let _span = info_span!("style_recompute", panels = order.len()).entered();
        let mut restyled = 0;
        for &id in order {
            if !self.tree.needs_restyle(id) {
                continue;
            }
            let snapshot = self.scoped_sheets(id);
            let scoped: Vec<ScopedSheet<'_>> =
                snapshot.iter().map(|sheet| ScopedSheet::author(sheet)).collect();
            let parent = self.tree.get(id).and_then(|panel| panel.parent());
            let parent_computed = parent
                .and_then(|parent_id| self.tree.get(parent_id))
                .and_then(|panel| panel.computed());
            let parent_font = parent
                .and_then(|parent_id| self.tree.get(parent_id))
                .map_or(self.config.default_font_size, |panel| panel.font_size());

            let mut computed = compute_style(&self.tree, id, &scoped, parent_computed);
            let font_size = self.resolve_font_size(computed.styles.font_size.as_ref(), parent_font);
            // Children inherit the resolved size, not the specified one.
            computed.styles.font_size = Some(Length::px(font_size));

            let Some(panel) = self.tree.get_mut(id) else {
                continue;
            };
            panel.seen.style = panel.current.style;
            panel.font_size_px = font_size;
            restyled += 1;
            if panel.computed.as_ref() == Some(&computed) {
                continue;
            }
            panel.computed = Some(computed);
            panel.bump_layout();
            panel.bump_render();
            let children = panel.children().to_vec();
            for child in children {
                self.tree.invalidate_subtree(child);
            }
        }
        restyled
    }

    fn resolve_font_size(&self, specified: Option<&Length>, parent_font: f32) -> f32 {
        specified
            .and_then(|length| {
                length.to_pixels(&self.config.length_context(parent_font), Some(parent_font))
            })
            .filter(|size| *size > 0.0)
            .unwrap_or(parent_font)
    }

    fn push_layout(&mut self, order: &[PanelId]) -> Result<u64> {
        let _span = info_span!("layout_push").entered();
        let unstyled = Styles::new();
        let mut pushed = 0;
        for &id in order {
            let Some(panel) = self.tree.get(id) else {
                continue;
            };
            if panel.current.layout == panel.seen.layout {
                continue;
            }
            let Some(&node) = self.layout_nodes.get(&id) else {
                continue;
            };
            let (block_width, block_height) = panel
                .parent()
                .and_then(|parent| self.tree.get(parent))
                .and_then(|parent| parent.rect())
                .map_or(
                    (self.config.viewport_width, self.config.viewport_height),
                    |rect| {
                        let (_, _, width, height) = rect.content_box();
                        (width, height)
                    },
                );
            let context = LayoutContext::new(self.config.length_context(panel.font_size()))
                .with_containing_block(block_width, block_height);
            let styles = panel.computed().map_or(&unstyled, |computed| &computed.styles);
            push_styles(&mut self.layout, node, styles, &context)
                .with_context(|| format!("pushing layout inputs of {id}"))?;
            let children: Vec<E::Node> = panel
                .children()
                .iter()
                .filter_map(|child| self.layout_nodes.get(child).copied())
                .collect();
            self.layout.set_children(node, &children)?;
            if let Some(panel) = self.tree.get_mut(id) {
                panel.seen.layout = panel.current.layout;
            }
            pushed += 1;
        }
        Ok(pushed)
    }

    fn compute_layout(&mut self, order: &[PanelId]) -> Result<()> {
        let _span = info_span!("layout_pass").entered();
        for root in self.tree.roots() {
            if let Some(&node) = self.layout_nodes.get(&root) {
                self.layout
                    .compute(node, self.config.viewport_width, self.config.viewport_height)
                    .with_context(|| format!("laying out {root}"))?;
            }
        }
        for &id in order {
            let Some(&node) = self.layout_nodes.get(&id) else {
                continue;
            };
            let origin = self
                .tree
                .get(id)
                .and_then(|panel| panel.parent())
                .and_then(|parent| self.tree.get(parent))
                .and_then(|parent| parent.rect())
                .map_or((0.0, 0.0), |rect| (rect.x, rect.y));
            let rect = self.layout.rect(node)?.offset(origin.0, origin.1);
            if let Some(panel) = self.tree.get_mut(id)
                && panel.rect != Some(rect)
            {
                panel.rect = Some(rect);
                panel.bump_render();
            }
        }
        Ok(())
    }

    /// Topmost visible panel whose border box contains the point. Later
    /// siblings are on top; `display: none` subtrees and panels with
    /// `pointer-events: none` are skipped.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<PanelId> {
        self.tree
            .roots()
            .into_iter()
            .rev()
            .find_map(|root| self.hit_test_from(root, x, y))
    }

    fn hit_test_from(&self, id: PanelId, x: f32, y: f32) -> Option<PanelId> {
        let panel = self.tree.get(id)?;
        let styles = panel.computed().map(|computed| &computed.styles);
        if styles.is_some_and(|styles| styles.display == Some(Display::None)) {
            return None;
        }
        if let Some(hit) = panel
            .children()
            .iter()
            .rev()
            .find_map(|&child| self.hit_test_from(child, x, y))
        {
            return Some(hit);
        }
        let receives = styles.is_none_or(|styles| styles.pointer_events != Some(PointerEvents::None));
        (receives && panel.rect().is_some_and(|rect| rect.contains(x, y))).then_some(id)
    }
}
