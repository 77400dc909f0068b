//! Shared stylesheet storage.

use core::{fmt, mem};
use std::sync::Arc;

use css_stylesheet::StyleSheet;
use rustc_hash::FxHashMap;

/// Handle of a registered stylesheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SheetId(u32);

impl fmt::Display for SheetId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "sheet#{}", self.0)
    }
}

/// Stylesheets shared read-only between panels.
///
/// Entries are `Arc`s: a replacement is a single assignment of a fully
/// parsed sheet, so a reader holding the previous `Arc` keeps a consistent
/// snapshot and later readers see only the new one.
#[derive(Debug, Default)]
pub struct SheetRegistry {
    sheets: FxHashMap<SheetId, Arc<StyleSheet>>,
    next: u32,
}

impl SheetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sheet: StyleSheet) -> SheetId {
        let id = SheetId(self.next);
        self.next = self.next.wrapping_add(1);
        self.sheets.insert(id, Arc::new(sheet));
        id
    }

    #[inline]
    pub fn get(&self, id: SheetId) -> Option<&Arc<StyleSheet>> {
        self.sheets.get(&id)
    }

    /// Swap in `sheet`; returns the previous snapshot, or `None` (and
    /// stores nothing) when `id` is unknown.
    pub fn replace(&mut self, id: SheetId, sheet: StyleSheet) -> Option<Arc<StyleSheet>> {
        let slot = self.sheets.get_mut(&id)?;
        Some(mem::replace(slot, Arc::new(sheet)))
    }

    pub fn remove(&mut self, id: SheetId) -> Option<Arc<StyleSheet>> {
        self.sheets.remove(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Registered sheets in id order.
    pub fn ids(&self) -> Vec<SheetId> {
        let mut ids: Vec<SheetId> = self.sheets.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
