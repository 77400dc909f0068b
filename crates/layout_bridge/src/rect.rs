//! Layout results read back from the engine.

use css_styles::Edges;

/// The box the engine computed for one node.
///
/// `x`/`y` are relative to the parent's border box until [`LayoutRect::offset`]
/// moves them into another space. `width`/`height` are the border box.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LayoutRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub padding: Edges<f32>,
    pub margin: Edges<f32>,
    pub border: Edges<f32>,
}

impl LayoutRect {
    /// The same box moved by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn offset(mut self, dx: f32, dy: f32) -> Self {
        self.x += dx;
        self.y += dy;
        self
    }

    /// Inside of the border: `(x, y, width, height)`.
    pub fn padding_box(&self) -> (f32, f32, f32, f32) {
        (
            self.x + self.border.left,
            self.y + self.border.top,
            (self.width - self.border.horizontal()).max(0.0),
            (self.height - self.border.vertical()).max(0.0),
        )
    }

    /// Inside of border and padding: `(x, y, width, height)`.
    pub fn content_box(&self) -> (f32, f32, f32, f32) {
        let (x, y, width, height) = self.padding_box();
        (
            x + self.padding.left,
            y + self.padding.top,
            (width - self.padding.horizontal()).max(0.0),
            (height - self.padding.vertical()).max(0.0),
        )
    }

    /// Outside of the margin: `(x, y, width, height)`.
    pub fn margin_box(&self) -> (f32, f32, f32, f32) {
        (
            self.x - self.margin.left,
            self.y - self.margin.top,
            self.width + self.margin.horizontal(),
            self.height + self.margin.vertical(),
        )
    }

    /// Whether the point lies in the border box. Right and bottom edges are
    /// exclusive so adjacent boxes never both claim a point.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && py >= self.y && px < self.x + self.width && py < self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxes_shrink_inwards() {
        let rect = LayoutRect {
            x: 10.0,
            y: 20.0,
            width: 100.0,
            height: 50.0,
            padding: Edges::uniform(5.0),
            margin: Edges::uniform(2.0),
            border: Edges::new(1.0, 2.0, 3.0, 4.0),
        };
        assert_eq!(rect.padding_box(), (14.0, 21.0, 94.0, 46.0));
        assert_eq!(rect.content_box(), (19.0, 26.0, 84.0, 36.0));
        assert_eq!(rect.margin_box(), (8.0, 18.0, 104.0, 54.0));
    }
}
