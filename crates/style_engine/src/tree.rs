//! The retained panel hierarchy and its invalidation bookkeeping.

use core::{fmt, mem};

use anyhow::{Result, anyhow, bail};
use css_cascade::ComputedStyle;
use css_selectors::{ElementAdapter, PseudoClass};
use layout_bridge::LayoutRect;

use crate::capabilities::Capabilities;
use crate::registry::SheetId;

/// Handle of a panel in a [`PanelTree`]. Handles are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(usize);

impl fmt::Display for PanelId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "panel#{}", self.0)
    }
}

/// Version counters for the three things a panel can be stale in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Generations {
    pub style: u64,
    pub layout: u64,
    pub render: u64,
}

/// One node of the panel tree.
#[derive(Debug)]
pub struct Panel {
    element: String,
    id: Option<String>,
    classes: Vec<String>,
    pseudo: PseudoClass,
    parent: Option<PanelId>,
    children: Vec<PanelId>,
    sheets: Vec<SheetId>,
    /// Bumped by mutations.
    pub(crate) current: Generations,
    /// Stamped when the matching pass last ran.
    pub(crate) seen: Generations,
    pub(crate) computed: Option<ComputedStyle>,
    /// Resolved font size, what `em` refers to for this panel.
    pub(crate) font_size_px: f32,
    /// Border box in viewport coordinates.
    pub(crate) rect: Option<LayoutRect>,
}

impl Panel {
    fn new(element: &str) -> Self {
        let fresh = Generations {
            style: 1,
            layout: 1,
            render: 1,
        };
        Self {
            element: element.to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            pseudo: PseudoClass::NONE,
            parent: None,
            children: Vec::new(),
            sheets: Vec::new(),
            current: fresh,
            seen: Generations::default(),
            computed: None,
            font_size_px: 0.0,
            rect: None,
        }
    }

    #[inline]
    pub fn element(&self) -> &str {
        &self.element
    }

    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[inline]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|name| name == class)
    }

    #[inline]
    pub const fn pseudo(&self) -> PseudoClass {
        self.pseudo
    }

    #[inline]
    pub const fn parent(&self) -> Option<PanelId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[PanelId] {
        &self.children
    }

    /// Sheets attached directly to this panel.
    #[inline]
    pub fn sheets(&self) -> &[SheetId] {
        &self.sheets
    }

    /// Result of the last cascade; `None` before the first tick.
    #[inline]
    pub const fn computed(&self) -> Option<&ComputedStyle> {
        self.computed.as_ref()
    }

    #[inline]
    pub const fn rect(&self) -> Option<&LayoutRect> {
        self.rect.as_ref()
    }

    #[inline]
    pub const fn font_size(&self) -> f32 {
        self.font_size_px
    }

    #[inline]
    pub const fn generations(&self) -> Generations {
        self.current
    }

    pub fn capabilities(&self) -> Capabilities {
        self.computed
            .as_ref()
            .map(Capabilities::from_computed)
            .unwrap_or_default()
    }

    fn is_style_stale(&self) -> bool {
        self.current.style != self.seen.style
    }

    fn bump_style(&mut self) {
        self.current.style = self.current.style.wrapping_add(1);
    }

    pub(crate) fn bump_layout(&mut self) {
        self.current.layout = self.current.layout.wrapping_add(1);
    }

    pub(crate) fn bump_render(&mut self) {
        self.current.render = self.current.render.wrapping_add(1);
    }
}

/// Arena of panels. Several roots may coexist; detached panels are roots.
#[derive(Debug, Default)]
pub struct PanelTree {
    nodes: Vec<Option<Panel>>,
    /// Panels removed since the engine last synced its layout nodes.
    removed: Vec<PanelId>,
    /// Registered sheets with a `:has()` selector.
    has_sheets: Vec<SheetId>,
}

impl PanelTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached panel for `element`.
    pub fn create(&mut self, element: &str) -> PanelId {
        let id = PanelId(self.nodes.len());
        self.nodes.push(Some(Panel::new(element)));
        id
    }

    #[inline]
    pub fn get(&self, id: PanelId) -> Option<&Panel> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// # Errors
    /// Fails when `id` is not a live panel.
    pub fn panel(&self, id: PanelId) -> Result<&Panel> {
        self.get(id).ok_or_else(|| anyhow!("unknown {id}"))
    }

    fn panel_mut(&mut self, id: PanelId) -> Result<&mut Panel> {
        self.get_mut(id).ok_or_else(|| anyhow!("unknown {id}"))
    }

    #[inline]
    pub fn contains(&self, id: PanelId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live panels.
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Panels without a parent, in creation order.
    pub fn roots(&self) -> Vec<PanelId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.as_ref().is_some_and(|panel| panel.parent.is_none()))
            .map(|(index, _)| PanelId(index))
            .collect()
    }

    /// `id` and its descendants, parents before children.
    pub fn subtree(&self, id: PanelId) -> Vec<PanelId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(panel) = self.get(current) else {
                continue;
            };
            order.push(current);
            stack.extend(panel.children.iter().rev().copied());
        }
        order
    }

    /// Every live panel, each root's subtree in turn.
    pub fn preorder(&self) -> Vec<PanelId> {
        self.roots()
            .into_iter()
            .flat_map(|root| self.subtree(root))
            .collect()
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: PanelId) -> Vec<PanelId> {
        let mut chain = Vec::new();
        let mut current = self.get(id).and_then(Panel::parent);
        while let Some(ancestor) = current {
            chain.push(ancestor);
            current = self.get(ancestor).and_then(Panel::parent);
        }
        chain
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    ///
    /// # Errors
    /// Fails for unknown panels and when `child` is `parent` or one of its
    /// ancestors.
    pub fn append_child(&mut self, parent: PanelId, child: PanelId) -> Result<()> {
        let index = self.panel(parent)?.children.len();
        self.insert_child(parent, index, child)
    }

    /// Insert `child` at `index` (clamped) among `parent`'s children.
    ///
    /// # Errors
    /// As [`PanelTree::append_child`].
    pub fn insert_child(&mut self, parent: PanelId, index: usize, child: PanelId) -> Result<()> {
        self.panel(child)?;
        self.panel(parent)?;
        if child == parent || self.ancestors(parent).contains(&child) {
            bail!("inserting {child} under {parent} would create a cycle");
        }
        self.detach(child)?;
        let siblings = &mut self.panel_mut(parent)?.children;
        let at = index.min(siblings.len());
        siblings.insert(at, child);
        self.panel_mut(child)?.parent = Some(parent);
        self.invalidate_structure(parent);
        Ok(())
    }

    /// Detach `child` from its parent; a no-op for roots.
    ///
    /// # Errors
    /// Fails when `child` is unknown.
    pub fn detach(&mut self, child: PanelId) -> Result<()> {
        let Some(parent) = self.panel_mut(child)?.parent.take() else {
            return Ok(());
        };
        if let Some(panel) = self.get_mut(parent) {
            panel.children.retain(|&existing| existing != child);
        }
        self.invalidate_structure(parent);
        self.invalidate_subtree(child);
        Ok(())
    }

    /// Remove `id` and its descendants; returns every removed handle.
    ///
    /// # Errors
    /// Fails when `id` is unknown.
    pub fn remove(&mut self, id: PanelId) -> Result<Vec<PanelId>> {
        self.detach(id)?;
        let removed = self.subtree(id);
        for &panel in &removed {
            if let Some(slot) = self.nodes.get_mut(panel.0) {
                *slot = None;
            }
        }
        self.removed.extend(removed.iter().copied());
        Ok(removed)
    }

    pub(crate) fn take_removed(&mut self) -> Vec<PanelId> {
        mem::take(&mut self.removed)
    }

    /// # Errors
    /// Fails when `id` is unknown.
    pub fn set_element(&mut self, id: PanelId, element: &str) -> Result<()> {
        let lower = element.to_ascii_lowercase();
        let panel = self.panel_mut(id)?;
        if panel.element != lower {
            panel.element = lower;
            self.invalidate_selector_scope(id);
        }
        Ok(())
    }

    /// # Errors
    /// Fails when `id` is unknown.
    pub fn set_id(&mut self, id: PanelId, element_id: Option<&str>) -> Result<()> {
        let value = element_id.filter(|text| !text.is_empty()).map(ToOwned::to_owned);
        let panel = self.panel_mut(id)?;
        if panel.id != value {
            panel.id = value;
            self.invalidate_selector_scope(id);
        }
        Ok(())
    }

    /// Returns whether the class was added.
    ///
    /// # Errors
    /// Fails when `id` is unknown.
    pub fn add_class(&mut self, id: PanelId, class: &str) -> Result<bool> {
        let panel = self.panel_mut(id)?;
        if class.is_empty() || panel.has_class(class) {
            return Ok(false);
        }
        panel.classes.push(class.to_owned());
        self.invalidate_selector_scope(id);
        Ok(true)
    }

    /// Returns whether the class was present.
    ///
    /// # Errors
    /// Fails when `id` is unknown.
    pub fn remove_class(&mut self, id: PanelId, class: &str) -> Result<bool> {
        let panel = self.panel_mut(id)?;
        let before = panel.classes.len();
        panel.classes.retain(|name| name != class);
        let removed = panel.classes.len() != before;
        if removed {
            self.invalidate_selector_scope(id);
        }
        Ok(removed)
    }

    /// Add or remove `class`; returns whether it is now present.
    ///
    /// # Errors
    /// Fails when `id` is unknown.
    pub fn toggle_class(&mut self, id: PanelId, class: &str) -> Result<bool> {
        if self.remove_class(id, class)? {
            return Ok(false);
        }
        self.add_class(id, class)
    }

    /// Replace every class with the whitespace separated `classes`.
    ///
    /// # Errors
    /// Fails when `id` is unknown.
    pub fn set_classes(&mut self, id: PanelId, classes: &str) -> Result<()> {
        let mut names: Vec<String> = Vec::new();
        for name in classes.split_whitespace() {
            if !names.iter().any(|existing| existing == name) {
                names.push(name.to_owned());
            }
        }
        let panel = self.panel_mut(id)?;
        if panel.classes != names {
            panel.classes = names;
            self.invalidate_selector_scope(id);
        }
        Ok(())
    }

    /// Turn the dynamic pseudo-class `flags` on or off.
    ///
    /// # Errors
    /// Fails when `id` is unknown.
    pub fn set_pseudo(&mut self, id: PanelId, flags: PseudoClass, enabled: bool) -> Result<()> {
        let panel = self.panel_mut(id)?;
        let updated = if enabled {
            panel.pseudo.union(flags)
        } else {
            panel.pseudo.difference(flags)
        };
        if updated != panel.pseudo {
            panel.pseudo = updated;
            self.invalidate_selector_scope(id);
        }
        Ok(())
    }

    /// # Errors
    /// Fails when `id` is unknown.
    pub fn attach_sheet(&mut self, id: PanelId, sheet: SheetId) -> Result<()> {
        let panel = self.panel_mut(id)?;
        if !panel.sheets.contains(&sheet) {
            panel.sheets.push(sheet);
            self.invalidate_subtree(id);
        }
        Ok(())
    }

    /// # Errors
    /// Fails when `id` is unknown.
    pub fn detach_sheet(&mut self, id: PanelId, sheet: SheetId) -> Result<()> {
        let panel = self.panel_mut(id)?;
        let before = panel.sheets.len();
        panel.sheets.retain(|&attached| attached != sheet);
        if panel.sheets.len() != before {
            self.invalidate_subtree(id);
        }
        Ok(())
    }

    /// Sheets visible to `id`: ancestors' root-most first, then its own.
    /// A sheet attached at several levels counts at its outermost one.
    pub fn sheets_in_scope(&self, id: PanelId) -> Vec<SheetId> {
        let mut chain = self.ancestors(id);
        chain.reverse();
        chain.push(id);
        let mut scope = Vec::new();
        for panel in chain.iter().filter_map(|&member| self.get(member)) {
            for &sheet in &panel.sheets {
                if !scope.contains(&sheet) {
                    scope.push(sheet);
                }
            }
        }
        scope
    }

    /// Whether the cascade has to run for `id`.
    pub fn needs_restyle(&self, id: PanelId) -> bool {
        self.get(id).is_some_and(Panel::is_style_stale)
    }

    /// Mark `id` and every descendant as needing a cascade.
    pub fn invalidate_subtree(&mut self, id: PanelId) {
        for panel in self.subtree(id) {
            if let Some(node) = self.get_mut(panel) {
                node.bump_style();
            }
        }
    }

    /// Every panel whose matching may change when `id`'s element, id,
    /// classes or pseudo state change: its parent's subtree (siblings for
    /// `+`, `~` and `:nth-child`) and its ancestors (for `:has`). When a
    /// `:has()` sheet is attached anywhere in the tree, an ancestor's match
    /// can also restyle its other descendants and later siblings, so the
    /// whole tree is restyled.
    pub fn invalidate_selector_scope(&mut self, id: PanelId) {
        let ancestors = self.ancestors(id);
        let top = ancestors.last().copied().unwrap_or(id);
        if self.subtree_uses_has(top) {
            self.invalidate_subtree(top);
            return;
        }
        self.invalidate_subtree(ancestors.first().copied().unwrap_or(id));
        for ancestor in ancestors {
            if let Some(node) = self.get_mut(ancestor) {
                node.bump_style();
            }
        }
    }

    fn subtree_uses_has(&self, id: PanelId) -> bool {
        if self.has_sheets.is_empty() {
            return false;
        }
        self.subtree(id).into_iter().any(|member| {
            self.get(member).is_some_and(|panel| {
                panel
                    .sheets
                    .iter()
                    .any(|sheet| self.has_sheets.contains(sheet))
            })
        })
    }

    /// Record whether registered `sheet` has a `:has()` selector.
    pub(crate) fn set_sheet_uses_has(&mut self, sheet: SheetId, uses_has: bool) {
        self.has_sheets.retain(|&known| known != sheet);
        if uses_has {
            self.has_sheets.push(sheet);
        }
    }

    /// Children of `parent` changed.
    fn invalidate_structure(&mut self, parent: PanelId) {
        self.invalidate_selector_scope(parent);
        self.invalidate_subtree(parent);
        if let Some(panel) = self.get_mut(parent) {
            panel.bump_layout();
        }
    }

    /// Every panel that has `sheet` attached, with its subtree.
    pub(crate) fn invalidate_sheet(&mut self, sheet: SheetId) -> usize {
        let holders: Vec<PanelId> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, slot)| {
                slot.as_ref()
                    .is_some_and(|panel| panel.sheets.contains(&sheet))
            })
            .map(|(index, _)| PanelId(index))
            .collect();
        for &holder in &holders {
            self.invalidate_subtree(holder);
        }
        holders.len()
    }

    /// Restyle the holders of `sheet` and detach it from them.
    pub(crate) fn forget_sheet(&mut self, sheet: SheetId) -> usize {
        let holders = self.invalidate_sheet(sheet);
        for panel in self.nodes.iter_mut().flatten() {
            panel.sheets.retain(|&attached| attached != sheet);
        }
        self.set_sheet_uses_has(sheet, false);
        holders
    }

    /// Mark every live panel stale, for viewport or font changes.
    pub(crate) fn invalidate_all(&mut self) {
        for panel in self.nodes.iter_mut().flatten() {
            panel.bump_style();
            panel.bump_layout();
        }
    }

    fn sibling(&self, element: PanelId, forward: bool) -> Option<PanelId> {
        let parent = self.get(element)?.parent?;
        let siblings = &self.get(parent)?.children;
        let index = siblings.iter().position(|&child| child == element)?;
        if forward {
            siblings.get(index.checked_add(1)?).copied()
        } else {
            siblings.get(index.checked_sub(1)?).copied()
        }
    }
}

impl ElementAdapter for PanelTree {
    type Handle = PanelId;

    fn parent(&self, element: PanelId) -> Option<PanelId> {
        self.get(element)?.parent
    }

    fn previous_sibling_element(&self, element: PanelId) -> Option<PanelId> {
        self.sibling(element, false)
    }

    fn next_sibling_element(&self, element: PanelId) -> Option<PanelId> {
        self.sibling(element, true)
    }

    fn first_child_element(&self, element: PanelId) -> Option<PanelId> {
        self.get(element)?.children.first().copied()
    }

    fn element_name(&self, element: PanelId) -> &str {
        self.get(element).map_or("", Panel::element)
    }

    fn element_id(&self, element: PanelId) -> Option<&str> {
        self.get(element)?.id()
    }

    fn has_class(&self, element: PanelId, class: &str) -> bool {
        self.get(element).is_some_and(|panel| panel.has_class(class))
    }

    fn pseudo_state(&self, element: PanelId) -> PseudoClass {
        self.get(element).map_or(PseudoClass::NONE, Panel::pseudo)
    }
}
