/// Color helpers.
mod color;
/// Semantic widget colors.
pub mod theme;

pub use color::Color;
pub use theme::{ThemeChoice, WidgetColors};

/// A set of active cell attributes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct AttrSet {
    /// Swap foreground and background.
    pub reverse: bool,
    /// The cell shows whatever lies beneath it.
    pub transparent: bool,
    /// The cell tints whatever lies beneath it with the shadow colors.
    pub trans_shadow: bool,
    /// The cell keeps the background of whatever lies beneath it.
    pub inherit_background: bool,
}

impl AttrSet {
    /// Is this attribute set empty?
    pub fn is_empty(&self) -> bool {
        !(self.reverse || self.transparent || self.trans_shadow || self.inherit_background)
    }
}

/// Foreground, background and attributes applied to printed cells.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Style {
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Cell attributes.
    pub attrs: AttrSet,
}

impl Style {
    /// A style with the given colors and no attributes.
    pub fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            attrs: AttrSet::default(),
        }
    }

    /// Toggle reverse video.
    pub fn reverse(mut self, on: bool) -> Self {
        self.attrs.reverse = on;
        self
    }

    /// Mark cells as fully transparent.
    pub fn transparent(mut self) -> Self {
        self.attrs.transparent = true;
        self
    }

    /// Mark cells as shadow-tinted.
    pub fn trans_shadow(mut self) -> Self {
        self.attrs.trans_shadow = true;
        self
    }

    /// Keep the background of the underlying cell.
    pub fn inherit_background(mut self) -> Self {
        self.attrs.inherit_background = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders() {
        let s = Style::new(Color::Black, Color::White);
        assert!(s.attrs.is_empty());
        let t = s.transparent().reverse(true);
        assert!(t.attrs.transparent);
        assert!(t.attrs.reverse);
        assert!(!t.attrs.is_empty());
        assert!(s.inherit_background().attrs.inherit_background);
        assert!(s.trans_shadow().attrs.trans_shadow);
    }
}
