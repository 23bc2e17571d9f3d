use super::Rect;

/// An `Expanse` has a width and height but no location. Buffers are
/// allocated by expanse, and widget sizes are compared as expanses.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Expanse {
    /// Width in cells.
    pub w: u32,
    /// Height in cells.
    pub h: u32,
}

impl Expanse {
    /// Construct an expanse.
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// The area of this expanse.
    pub fn area(&self) -> u32 {
        self.w * self.h
    }

    /// Does this expanse have zero area?
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Grow the expanse by the given amounts.
    pub fn grow(&self, w: u32, h: u32) -> Self {
        Self {
            w: self.w.saturating_add(w),
            h: self.h.saturating_add(h),
        }
    }

    /// A rectangle of this size anchored at the 0-based origin.
    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.w, self.h)
    }

    /// True if this expanse can completely enclose `other`.
    pub fn contains(&self, other: &Self) -> bool {
        self.w >= other.w && self.h >= other.h
    }
}

impl From<Rect> for Expanse {
    fn from(r: Rect) -> Self {
        r.size()
    }
}

impl From<(u32, u32)> for Expanse {
    fn from(v: (u32, u32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basics() {
        let e = Expanse::new(4, 3);
        assert_eq!(e.area(), 12);
        assert!(!e.is_empty());
        assert!(Expanse::new(0, 3).is_empty());
        assert_eq!(e.grow(2, 1), Expanse::new(6, 4));
        assert!(e.contains(&Expanse::new(4, 2)));
        assert!(!e.contains(&Expanse::new(5, 2)));
        assert_eq!(e.rect(), Rect::from_coords(0, 0, 3, 2));
    }
}
