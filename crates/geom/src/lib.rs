//! Geometry primitives used across thicket.
//!
//! Terminal coordinates are signed: widget positions are 1-based and
//! parent-relative, while buffer and offset rectangles are 0-based. Rectangles
//! store inclusive corners, so a `Rect` with `x1 == x2` is one cell wide.

/// Error types for geometry operations.
mod error;
/// Width/height size type.
mod expanse;
/// Min/max size constraints.
mod hints;
/// Four-sided padding.
mod padding;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;

pub use error::{Error, Result};
pub use expanse::Expanse;
pub use hints::SizeHints;
pub use padding::Padding;
pub use point::Point;
pub use rect::Rect;

/// The four sides of a rectangle.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Side {
    /// Top edge.
    Top,
    /// Right edge.
    Right,
    /// Bottom edge.
    Bottom,
    /// Left edge.
    Left,
}

impl Side {
    /// All sides in clockwise order, starting at the top.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Is this a horizontal edge (top or bottom)?
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}
