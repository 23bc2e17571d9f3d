/// Padding on the four sides of a widget, in cells.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Padding {
    /// Rows reserved at the top.
    pub top: i32,
    /// Columns reserved at the left.
    pub left: i32,
    /// Rows reserved at the bottom.
    pub bottom: i32,
    /// Columns reserved at the right.
    pub right: i32,
}

impl Padding {
    /// Construct padding in top, left, bottom, right order.
    pub fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// The same padding on every side.
    pub fn uniform(n: i32) -> Self {
        Self::new(n, n, n, n)
    }

    /// Is every side zero?
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Combined left and right padding.
    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Combined top and bottom padding.
    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}
