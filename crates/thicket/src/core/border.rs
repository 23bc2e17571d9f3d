//! Flat borders, box borders and shadows.

use bitvec::vec::BitVec;

use crate::{
    core::{id::WidgetId, world::Core},
    error::Result,
    geom::{Expanse, Point, Rect, Side},
    style::Style,
};

/// Per-edge double-line flags. The top and bottom sequences track the
/// widget's width, the left and right sequences its height.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BorderMask {
    /// One bit per column along the top edge.
    top: BitVec,
    /// One bit per row along the right edge.
    right: BitVec,
    /// One bit per column along the bottom edge.
    bottom: BitVec,
    /// One bit per row along the left edge.
    left: BitVec,
}

impl BorderMask {
    /// An all-single mask for a widget of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        let mut m = Self::default();
        m.resize(width, height);
        m
    }

    /// Resize all four sequences. New cells are single-line.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.top.resize(width, false);
        self.bottom.resize(width, false);
        self.right.resize(height, false);
        self.left.resize(height, false);
    }

    /// The sequence for one side.
    fn side(&self, side: Side) -> &BitVec {
        match side {
            Side::Top => &self.top,
            Side::Right => &self.right,
            Side::Bottom => &self.bottom,
            Side::Left => &self.left,
        }
    }

    /// The mutable sequence for one side.
    fn side_mut(&mut self, side: Side) -> &mut BitVec {
        match side {
            Side::Top => &mut self.top,
            Side::Right => &mut self.right,
            Side::Bottom => &mut self.bottom,
            Side::Left => &mut self.left,
        }
    }

    /// Length of one side's sequence.
    pub fn len(&self, side: Side) -> usize {
        self.side(side).len()
    }

    /// Is the mask empty on every side?
    pub fn is_empty(&self) -> bool {
        Side::ALL.iter().all(|s| self.side(*s).is_empty())
    }

    /// Set every cell of one side.
    pub fn set_all(&mut self, side: Side, double: bool) {
        self.side_mut(side).fill(double);
    }

    /// Set a single cell, 1-based. Positions outside the edge are ignored.
    pub fn set(&mut self, side: Side, pos: usize, double: bool) {
        let Some(index) = pos.checked_sub(1) else {
            return;
        };
        if let Some(mut bit) = self.side_mut(side).get_mut(index) {
            *bit = double;
        }
    }

    /// Is the cell at a 0-based index double-lined? Out-of-range reads are
    /// single-lined.
    pub fn get(&self, side: Side, index: usize) -> bool {
        self.side(side).get(index).is_some_and(|b| *b)
    }
}

/// Flat border glyph for an edge cell.
fn flat_glyph(side: Side, double: bool) -> char {
    match (side, double) {
        (Side::Left, false) => '▕',
        (Side::Right, false) => '▏',
        (Side::Top, false) => '▁',
        (Side::Bottom, false) => '▔',
        (Side::Left | Side::Right, true) => '║',
        (Side::Top | Side::Bottom, true) => '═',
    }
}

/// Glyph left behind when a flat border is cleared next to a double line.
fn cleared_glyph(side: Side, double: bool) -> char {
    match (side, double) {
        (_, false) => ' ',
        (Side::Left, true) => '▏',
        (Side::Right, true) => '▕',
        (Side::Top, true) => '▔',
        (Side::Bottom, true) => '▁',
    }
}

/// Widget-relative position of the `i`th cell along a flat border.
fn flat_position(side: Side, i: i32, w: i32, h: i32) -> Point {
    match side {
        Side::Left => Point::new(0, i + 1),
        Side::Right => Point::new(w + 1, i + 1),
        Side::Top => Point::new(i + 1, 0),
        Side::Bottom => Point::new(i + 1, h + 1),
    }
}

impl Core {
    /// The style for flat borders: dialog foreground on the parent's
    /// background.
    fn flat_border_style(&self, id: WidgetId) -> Result<Style> {
        let node = self.node(id)?;
        let bg = match node.parent {
            Some(p) => self.node(p)?.bg,
            None => self.colors.dialog_bg,
        };
        Ok(Style::new(self.colors.dialog_fg, bg))
    }

    /// Walk every flat border cell, printing the glyph chosen by `glyph`.
    fn paint_flat_border(&mut self, id: WidgetId, glyph: fn(Side, bool) -> char) -> Result<()> {
        if !self.caps.new_font {
            return Ok(());
        }
        let style = self.flat_border_style(id)?;
        let node = self.node(id)?;
        let (w, h) = (node.adjusted.width() as i32, node.adjusted.height() as i32);
        let mask = node.mask.clone();
        for side in Side::ALL {
            let n = if side.is_horizontal() { w } else { h };
            for i in 0..n {
                let ch = glyph(side, mask.get(side, i as usize));
                let at = flat_position(side, i, w, h);
                self.print(id, at, ch.encode_utf8(&mut [0; 4]), style)?;
            }
        }
        Ok(())
    }

    /// Draw a flat border just outside the widget, choosing a double-line
    /// glyph wherever the mask bit is set. Only the graphical font has the
    /// glyphs for this.
    pub fn draw_flat_border(&mut self, id: WidgetId) -> Result<()> {
        self.paint_flat_border(id, flat_glyph)
    }

    /// Erase a flat border, leaving the neighbour's half of any shared
    /// double line.
    pub fn clear_flat_border(&mut self, id: WidgetId) -> Result<()> {
        self.paint_flat_border(id, cleared_glyph)
    }

    /// Set every cell of one mask edge.
    pub fn set_double_flat_line(&mut self, id: WidgetId, side: Side, double: bool) -> Result<()> {
        self.node_mut(id)?.mask.set_all(side, double);
        Ok(())
    }

    /// Set one 1-based cell of a mask edge. Positions past the edge are
    /// ignored.
    pub fn set_double_flat_line_at(
        &mut self,
        id: WidgetId,
        side: Side,
        pos: usize,
        double: bool,
    ) -> Result<()> {
        self.node_mut(id)?.mask.set(side, pos, double);
        Ok(())
    }

    /// The widget's border mask.
    pub fn border_mask(&self, id: WidgetId) -> Result<&BorderMask> {
        Ok(&self.node(id)?.mask)
    }

    /// Draw a box border along `rect`, given in widget-relative 1-based
    /// coordinates and clamped to the widget.
    pub fn draw_border(&mut self, id: WidgetId, rect: Rect) -> Result<()> {
        let node = self.node(id)?;
        let style = Style::new(node.fg, node.bg);
        let (w, h) = (node.adjusted.width() as i32, node.adjusted.height() as i32);
        let r = Rect::from_coords(
            rect.x1.min(rect.x2).max(1),
            rect.y1.min(rect.y2).max(1),
            rect.x1.max(rect.x2).min(w),
            rect.y1.max(rect.y2).min(h),
        );
        let (vl, vr) = if self.caps.new_font {
            ('⎸', '⎹')
        } else {
            ('│', '│')
        };
        let inner = r.x2 - r.x1 - 1;
        let horizontal = "─".repeat(inner.max(0) as usize);
        self.print(id, r.pos(), &format!("┌{horizontal}┐"), style)?;
        for y in r.y1 + 1..r.y2 {
            self.print(id, Point::new(r.x1, y), vl.encode_utf8(&mut [0; 4]), style)?;
            self.print(id, Point::new(r.x2, y), vr.encode_utf8(&mut [0; 4]), style)?;
        }
        self.print(id, Point::new(r.x1, r.y2), &format!("└{horizontal}┘"), style)
    }

    /// Draw the widget's shadow. Monochrome terminals get no block shadow,
    /// and terminals without block glyphs get the shadow area cleared.
    pub fn draw_shadow(&mut self, id: WidgetId) -> Result<()> {
        let trans = self.node(id)?.flags.trans_shadow;
        if self.caps.monochrome && !trans {
            return Ok(());
        }
        if !self.caps.encoding.has_block_glyphs() && !trans {
            return self.clear_shadow(id);
        }
        if trans {
            self.draw_transparent_shadow(id)
        } else {
            self.draw_block_shadow(id)
        }
    }

    /// The style shadows are painted in.
    fn shadow_style(&self, id: WidgetId) -> Result<Style> {
        let node = self.node(id)?;
        if node.kind.is_window() {
            return Ok(Style::new(self.colors.shadow_fg, self.colors.shadow_bg).inherit_background());
        }
        let bg = match node.parent {
            Some(p) => self.node(p)?.bg,
            None => self.colors.shadow_bg,
        };
        Ok(Style::new(self.colors.shadow_fg, bg))
    }

    /// Blank the cells a shadow would occupy.
    pub fn clear_shadow(&mut self, id: WidgetId) -> Result<()> {
        if self.caps.monochrome {
            return Ok(());
        }
        let style = self.shadow_style(id)?;
        let node = self.node(id)?;
        let (w, h) = (node.adjusted.width() as i32, node.adjusted.height() as i32);
        let offset = node.offset;
        if w <= offset.x2 {
            for y in 1..=h {
                self.print(id, Point::new(w + 1, y), " ", style)?;
            }
        }
        if h <= offset.y2 {
            self.print(id, Point::new(2, h + 1), &" ".repeat(w as usize), style)?;
        }
        Ok(())
    }

    /// A shadow the compositor blends with whatever lies beneath.
    fn draw_transparent_shadow(&mut self, id: WidgetId) -> Result<()> {
        let node = self.node(id)?;
        let (w, h) = (node.adjusted.width() as i32, node.adjusted.height() as i32);
        let clear = Style::default().transparent();
        let tint = Style::new(self.colors.shadow_bg, self.colors.shadow_fg).trans_shadow();
        self.print(id, Point::new(w + 1, 1), "  ", clear)?;
        for y in 2..=h {
            self.print(id, Point::new(w + 1, y), "  ", tint)?;
        }
        self.print(id, Point::new(1, h + 1), "  ", clear)?;
        self.print(id, Point::new(3, h + 1), &" ".repeat(w as usize), tint)
    }

    /// A solid shadow of half and full blocks.
    fn draw_block_shadow(&mut self, id: WidgetId) -> Result<()> {
        let style = self.shadow_style(id)?;
        let node = self.node(id)?;
        let (w, h) = (node.adjusted.width() as i32, node.adjusted.height() as i32);
        self.print(id, Point::new(w + 1, 1), "▄", style)?;
        for y in 2..=h {
            self.print(id, Point::new(w + 1, y), "█", style)?;
        }
        self.print(id, Point::new(2, h + 1), &"▀".repeat(w as usize), style)
    }

    /// Blank a `size` area from the widget's top-left corner using the
    /// parent's colors, then flush.
    pub fn hide_area(&mut self, id: WidgetId, size: Expanse) -> Result<()> {
        if size.is_empty() {
            return Ok(());
        }
        let node = self.node(id)?;
        let style = match node.parent {
            Some(p) => {
                let p = self.node(p)?;
                Style::new(p.fg, p.bg)
            }
            None => Style::new(self.colors.dialog_fg, self.colors.dialog_bg),
        };
        let blank = " ".repeat(size.w as usize);
        for y in 0..size.h as i32 {
            self.print(id, Point::new(1, 1 + y), &blank, style)?;
        }
        self.renderer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_resize_tracks_size() {
        let mut m = BorderMask::new(3, 2);
        assert_eq!(m.len(Side::Top), 3);
        assert_eq!(m.len(Side::Left), 2);
        m.set_all(Side::Top, true);
        m.resize(5, 1);
        assert_eq!(m.len(Side::Bottom), 5);
        assert_eq!(m.len(Side::Right), 1);
        assert!(m.get(Side::Top, 2));
        assert!(!m.get(Side::Top, 3));
        assert!(!m.is_empty());
    }

    #[test]
    fn mask_out_of_range_is_ignored() {
        let mut m = BorderMask::new(2, 2);
        m.set(Side::Left, 0, true);
        m.set(Side::Left, 9, true);
        assert!(!m.get(Side::Left, 0));
        assert!(!m.get(Side::Left, 8));
        m.set(Side::Left, 2, true);
        assert!(m.get(Side::Left, 1));
    }

    #[test]
    fn glyphs() {
        assert_eq!(flat_glyph(Side::Top, true), '═');
        assert_eq!(flat_glyph(Side::Left, false), '▕');
        assert_eq!(cleared_glyph(Side::Right, false), ' ');
        assert_eq!(cleared_glyph(Side::Bottom, true), '▁');
        assert_eq!(flat_position(Side::Right, 0, 4, 2), Point::new(5, 1));
        assert_eq!(flat_position(Side::Bottom, 3, 4, 2), Point::new(4, 3));
    }
}
