use super::{Error, Result};

/// Minimum and maximum size constraints for a widget.
///
/// Widths and heights stored on a widget are always clamped into
/// `[min, max]` for the relevant dimension.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct SizeHints {
    /// Minimum width.
    pub min_width: u32,
    /// Minimum height.
    pub min_height: u32,
    /// Maximum width.
    pub max_width: u32,
    /// Maximum height.
    pub max_height: u32,
}

impl Default for SizeHints {
    /// Unconstrained, apart from the one-cell floor.
    fn default() -> Self {
        Self {
            min_width: 1,
            min_height: 1,
            max_width: u32::MAX,
            max_height: u32::MAX,
        }
    }
}

impl SizeHints {
    /// Construct size hints, rejecting inverted ranges. Zero minimums are
    /// raised to one, since no widget may have an empty dimension.
    pub fn new(min_width: u32, min_height: u32, max_width: u32, max_height: u32) -> Result<Self> {
        let min_width = min_width.max(1);
        let min_height = min_height.max(1);
        if min_width > max_width || min_height > max_height {
            return Err(Error::Geometry(format!(
                "inverted size hints: {min_width}x{min_height} > {max_width}x{max_height}"
            )));
        }
        Ok(Self {
            min_width,
            min_height,
            max_width,
            max_height,
        })
    }

    /// Hints with a minimum and no maximum.
    pub fn minimum(min_width: u32, min_height: u32) -> Self {
        Self {
            min_width: min_width.max(1),
            min_height: min_height.max(1),
            ..Self::default()
        }
    }

    /// Clamp a width into range.
    pub fn clamp_width(&self, w: u32) -> u32 {
        w.clamp(self.min_width, self.max_width)
    }

    /// Clamp a height into range.
    pub fn clamp_height(&self, h: u32) -> u32 {
        h.clamp(self.min_height, self.max_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamping() -> Result<()> {
        let h = SizeHints::new(3, 2, 10, 5)?;
        assert_eq!(h.clamp_width(1), 3);
        assert_eq!(h.clamp_width(20), 10);
        assert_eq!(h.clamp_height(4), 4);
        assert_eq!(h.clamp_height(0), 2);
        Ok(())
    }

    #[test]
    fn floors_and_inversion() -> Result<()> {
        let h = SizeHints::new(0, 0, 5, 5)?;
        assert_eq!(h.min_width, 1);
        assert_eq!(h.min_height, 1);
        assert!(SizeHints::new(6, 1, 5, 5).is_err());
        assert_eq!(SizeHints::minimum(0, 4).clamp_height(1), 4);
        Ok(())
    }
}
