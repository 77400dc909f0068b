//! Pseudo-class flags.

use core::ops::{BitOr, BitOrAssign};

/// Bit set of pseudo-classes and the two pseudo-elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct PseudoClass(u32);

impl PseudoClass {
    pub const NONE: Self = Self(0);
    pub const HOVER: Self = Self(1 << 0);
    pub const ACTIVE: Self = Self(1 << 1);
    pub const FOCUS: Self = Self(1 << 2);
    /// First frame after the node appears; drives enter transitions.
    pub const INTRO: Self = Self(1 << 3);
    /// Set while the node is being removed; drives exit transitions.
    pub const OUTRO: Self = Self(1 << 4);
    pub const EMPTY: Self = Self(1 << 5);
    pub const FIRST_CHILD: Self = Self(1 << 6);
    pub const LAST_CHILD: Self = Self(1 << 7);
    pub const ONLY_CHILD: Self = Self(1 << 8);
    pub const BEFORE: Self = Self(1 << 9);
    pub const AFTER: Self = Self(1 << 10);

    /// Flags the matcher derives from tree shape.
    pub const STRUCTURAL: Self = Self(
        Self::EMPTY.0 | Self::FIRST_CHILD.0 | Self::LAST_CHILD.0 | Self::ONLY_CHILD.0,
    );
    /// Pseudo-elements; counted as element specificity.
    pub const ELEMENTS: Self = Self(Self::BEFORE.0 | Self::AFTER.0);

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Every flag of `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[inline]
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    #[inline]
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Set or clear `other`.
    #[inline]
    pub fn set(&mut self, other: Self, enabled: bool) {
        if enabled {
            self.insert(other);
        } else {
            self.remove(other);
        }
    }

    /// Number of flags set.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Flag for a selector name (without colons).
    pub fn from_name(name: &str) -> Option<Self> {
        let flag = match name.to_ascii_lowercase().as_str() {
            "hover" => Self::HOVER,
            "active" => Self::ACTIVE,
            "focus" => Self::FOCUS,
            "intro" => Self::INTRO,
            "outro" => Self::OUTRO,
            "empty" => Self::EMPTY,
            "first-child" => Self::FIRST_CHILD,
            "last-child" => Self::LAST_CHILD,
            "only-child" => Self::ONLY_CHILD,
            "before" => Self::BEFORE,
            "after" => Self::AFTER,
            _ => return None,
        };
        Some(flag)
    }
}

impl BitOr for PseudoClass {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for PseudoClass {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs);
    }
}
