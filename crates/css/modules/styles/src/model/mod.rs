//! Composite property values.

mod border_image;
mod filter;
mod shadow;
mod transform;
mod transition;

pub use border_image::BorderImage;
pub use filter::{Filter, FilterList};
pub use shadow::{Shadow, ShadowList};
pub use transform::{Transform, TransformList};
pub use transition::{TimingFunction, Transition, TransitionList};

/// Four per-side values in CSS order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Edges<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T> Edges<T> {
    #[inline]
    pub const fn new(top: T, right: T, bottom: T, left: T) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn map<U>(self, mut convert: impl FnMut(T) -> U) -> Edges<U> {
        Edges {
            top: convert(self.top),
            right: convert(self.right),
            bottom: convert(self.bottom),
            left: convert(self.left),
        }
    }
}

impl Edges<f32> {
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl<T: Clone> Edges<T> {
    #[inline]
    pub fn uniform(value: T) -> Self {
        Self {
            top: value.clone(),
            right: value.clone(),
            bottom: value.clone(),
            left: value,
        }
    }

    /// Expand one to four values the way `margin` does.
    pub fn from_slice(values: &[T]) -> Option<Self> {
        let edges = match values {
            [all] => Self::uniform(all.clone()),
            [vertical, horizontal] => Self {
                top: vertical.clone(),
                right: horizontal.clone(),
                bottom: vertical.clone(),
                left: horizontal.clone(),
            },
            [top, horizontal, bottom] => Self {
                top: top.clone(),
                right: horizontal.clone(),
                bottom: bottom.clone(),
                left: horizontal.clone(),
            },
            [top, right, bottom, left] => Self {
                top: top.clone(),
                right: right.clone(),
                bottom: bottom.clone(),
                left: left.clone(),
            },
            _ => return None,
        };
        Some(edges)
    }
}
