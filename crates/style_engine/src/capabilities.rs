//! What a panel needs from the renderer, derived from its computed style.

use css_cascade::ComputedStyle;

/// Capability bag read by renderers in place of per-panel hooks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub background: bool,
    pub filter: bool,
    pub backdrop_filter: bool,
    pub scrollable: bool,
}

impl Capabilities {
    pub fn from_computed(computed: &ComputedStyle) -> Self {
        Self {
            background: computed.has_background,
            filter: computed.has_filter,
            backdrop_filter: computed.has_backdrop_filter,
            scrollable: computed.is_scrollable(),
        }
    }

    /// Nothing to draw beyond children and text.
    #[inline]
    pub const fn is_plain(&self) -> bool {
        !(self.background || self.filter || self.backdrop_filter || self.scrollable)
    }
}
