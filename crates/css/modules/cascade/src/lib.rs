//! CSS Cascading and Inheritance Level 4 subset: ordering matched blocks,
//! merging them into one computed style and inheriting from the parent.
//! See <https://www.w3.org/TR/css-cascade-4/>

#![forbid(unsafe_code)]

use core::cmp::Ordering;

use css_selectors::{ElementAdapter, Specificity};
use css_styles::Styles;
use css_stylesheet::{StyleBlock, StyleSheet};
use log::trace;

pub use css_styles::is_inherited;

/// Where a sheet comes from.
/// CSS Cascade 4 §6.2: Cascading origins
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Origin {
    /// Built-in defaults shipped with the host.
    UserAgent,
    User,
    #[default]
    Author,
}

/// A sheet in scope for one element, with its origin.
#[derive(Clone, Copy, Debug)]
pub struct ScopedSheet<'sheet> {
    pub sheet: &'sheet StyleSheet,
    pub origin: Origin,
}

impl<'sheet> ScopedSheet<'sheet> {
    #[inline]
    pub const fn author(sheet: &'sheet StyleSheet) -> Self {
        Self {
            sheet,
            origin: Origin::Author,
        }
    }
}

/// Priority tuple used to order matched blocks in the cascade.
/// CSS Cascade 4 §6: Cascade sorting order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CascadePriority {
    /// CSS Cascade 4 §6.2: Origins
    pub origin: Origin,
    /// CSS Cascade 4 §6.4: Specificity
    pub specificity: Specificity,
    /// Position of the sheet in scope: ancestors' sheets first, root-most
    /// lowest, the element's own sheets last.
    pub sheet_order: u32,
    /// Position of the block in its sheet.
    /// CSS Cascade 4 §6.5: Order of appearance
    pub source_order: u32,
}

impl CascadePriority {
    #[inline]
    pub const fn new(
        origin: Origin,
        specificity: Specificity,
        sheet_order: u32,
        source_order: u32,
    ) -> Self {
        Self {
            origin,
            specificity,
            sheet_order,
            source_order,
        }
    }
}

impl Ord for CascadePriority {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_priority(self, other)
    }
}

impl PartialOrd for CascadePriority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two priorities; `Ordering::Greater` means `left` wins.
/// CSS Cascade 4 §6: Sorting the cascade
pub fn compare_priority(left: &CascadePriority, right: &CascadePriority) -> Ordering {
    // Origin order: UA < User < Author. Higher origin wins.
    let left_rank = origin_rank(left.origin);
    let right_rank = origin_rank(right.origin);
    if left_rank != right_rank {
        return left_rank.cmp(&right_rank);
    }

    // Specificity: higher wins
    if left.specificity != right.specificity {
        return left.specificity.cmp(&right.specificity);
    }

    // Order of appearance: later sheet, then later block, wins
    left.sheet_order
        .cmp(&right.sheet_order)
        .then(left.source_order.cmp(&right.source_order))
}

/// Rank origins: UA < User < Author.
const fn origin_rank(origin: Origin) -> u8 {
    match origin {
        Origin::UserAgent => 0,
        Origin::User => 1,
        Origin::Author => 2,
    }
}

/// A block that matched, with the priority it applies at.
#[derive(Clone, Copy, Debug)]
pub struct MatchedBlock<'sheet> {
    pub priority: CascadePriority,
    pub block: &'sheet StyleBlock,
}

/// Every block of `sheets` that matches `element`, lowest priority first.
pub fn matched_blocks<'sheet, A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    sheets: &[ScopedSheet<'sheet>],
) -> Vec<MatchedBlock<'sheet>> {
    let mut matched = Vec::new();
    for (sheet_order, scoped) in sheets.iter().enumerate() {
        let sheet_order = u32::try_from(sheet_order).unwrap_or(u32::MAX);
        for block in scoped.sheet.blocks() {
            if let Some(specificity) = block.matching_specificity(adapter, element) {
                matched.push(MatchedBlock {
                    priority: CascadePriority::new(
                        scoped.origin,
                        specificity,
                        sheet_order,
                        block.source_order,
                    ),
                    block,
                });
            }
        }
    }
    matched.sort_by(|left, right| compare_priority(&left.priority, &right.priority));
    matched
}

/// The cascade result for one element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComputedStyle {
    pub styles: Styles,
    pub has_background: bool,
    pub has_filter: bool,
    pub has_backdrop_filter: bool,
    /// Number of blocks that contributed.
    pub matched: usize,
}

impl ComputedStyle {
    /// Derive the flags from merged styles.
    pub fn from_styles(styles: Styles) -> Self {
        Self {
            has_background: styles.has_background(),
            has_filter: styles.has_filter(),
            has_backdrop_filter: styles.has_backdrop_filter(),
            matched: 0,
            styles,
        }
    }

    #[inline]
    pub fn is_scrollable(&self) -> bool {
        self.styles.is_scrollable()
    }
}

/// Cascade `element` against `sheets` and inherit from `parent`.
///
/// `sheets` must be in scope order: ancestors' sheets root-most first, then
/// the element's own. Blocks are applied from lowest to highest priority one
/// property at a time, so a property a winning block leaves unset keeps the
/// value of a losing block. Inherited properties still unset afterwards
/// take the parent's computed value.
pub fn compute_style<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    sheets: &[ScopedSheet<'_>],
    parent: Option<&ComputedStyle>,
) -> ComputedStyle {
    let matched = matched_blocks(adapter, element, sheets);
    let mut styles = Styles::new();
    for entry in &matched {
        styles.apply(&entry.block.styles);
    }
    if let Some(parent_style) = parent {
        styles.inherit_from(&parent_style.styles);
    }
    trace!(
        target: "css_cascade",
        "{} blocks matched <{}>",
        matched.len(),
        adapter.element_name(element)
    );
    ComputedStyle {
        matched: matched.len(),
        ..ComputedStyle::from_styles(styles)
    }
}
