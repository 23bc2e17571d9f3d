use super::{Expanse, Padding, Point};

/// A rectangle described by inclusive corner coordinates.
///
/// A rectangle whose right edge lies left of its left edge has zero width;
/// width and height are never negative.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left column.
    pub x1: i32,
    /// Top row.
    pub y1: i32,
    /// Right column, inclusive.
    pub x2: i32,
    /// Bottom row, inclusive.
    pub y2: i32,
}

impl Rect {
    /// A rectangle at `(x, y)` with the given size.
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + w as i32 - 1,
            y2: y + h as i32 - 1,
        }
    }

    /// A rectangle from inclusive corner coordinates.
    pub fn from_coords(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// A rectangle spanning two corner points.
    pub fn from_points(tl: Point, br: Point) -> Self {
        Self::from_coords(tl.x, tl.y, br.x, br.y)
    }

    /// Left column.
    pub fn x(&self) -> i32 {
        self.x1
    }

    /// Top row.
    pub fn y(&self) -> i32 {
        self.y1
    }

    /// Width in cells, never negative.
    pub fn width(&self) -> u32 {
        (self.x2 - self.x1 + 1).max(0) as u32
    }

    /// Height in cells, never negative.
    pub fn height(&self) -> u32 {
        (self.y2 - self.y1 + 1).max(0) as u32
    }

    /// Top-left corner.
    pub fn pos(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// Bottom-right corner.
    pub fn bottom_right(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// The size of this rectangle.
    pub fn size(&self) -> Expanse {
        Expanse::new(self.width(), self.height())
    }

    /// Is the area of this rectangle zero?
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Move the top-left corner to `(x, y)`, keeping the size.
    pub fn set_pos(&mut self, x: i32, y: i32) {
        let (w, h) = (self.width(), self.height());
        *self = Self::new(x, y, w, h);
    }

    /// Set the width, keeping the left edge.
    pub fn set_width(&mut self, w: u32) {
        self.x2 = self.x1 + w as i32 - 1;
    }

    /// Set the height, keeping the top edge.
    pub fn set_height(&mut self, h: u32) {
        self.y2 = self.y1 + h as i32 - 1;
    }

    /// Set the size, keeping the top-left corner.
    pub fn set_size(&mut self, w: u32, h: u32) {
        self.set_width(w);
        self.set_height(h);
    }

    /// Shift the rectangle by a relative offset.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x1 += dx;
        self.x2 += dx;
        self.y1 += dy;
        self.y2 += dy;
    }

    /// Does the rectangle contain the point?
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }

    /// Does this rectangle fully enclose `other`?
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.x1 >= self.x1 && other.x2 <= self.x2 && other.y1 >= self.y1 && other.y2 <= self.y2
    }

    /// Do the two rectangles share at least one cell?
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x1 <= other.x2 && other.x1 <= self.x2 && self.y1 <= other.y2 && other.y1 <= self.y2
    }

    /// The rectangle with the padding removed from each side.
    pub fn shrink(&self, p: Padding) -> Self {
        Self {
            x1: self.x1 + p.left,
            y1: self.y1 + p.top,
            x2: self.x2 - p.right,
            y2: self.y2 - p.bottom,
        }
    }

    /// The rectangle with the padding added to each side.
    pub fn grow(&self, p: Padding) -> Self {
        Self {
            x1: self.x1 - p.left,
            y1: self.y1 - p.top,
            x2: self.x2 + p.right,
            y2: self.y2 + p.bottom,
        }
    }
}
