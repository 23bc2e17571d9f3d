//! Position, size and padding setters.
//!
//! Every setter clamps sizes into the widget's hints, floors them at one
//! cell, and returns early without side effects when nothing changes. After
//! a change the derived state (client offset, border mask, buffers) is
//! refreshed, and with `adjust` set the layout pass runs immediately.

use tracing::trace;

use crate::{
    core::{id::WidgetId, world::Core},
    error::Result,
    geom::{Expanse, Padding, Point, Rect, SizeHints},
};

impl Core {
    /// Move the widget, relative to its parent's client area. Non-window
    /// widgets can't move above or left of column and row 1.
    pub fn set_pos(&mut self, id: WidgetId, pos: Point, adjust: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        let pos = node.clamp_pos(pos);
        if node.adjusted.pos() == pos && node.wsize.pos() == pos {
            return Ok(());
        }
        node.wsize.set_pos(pos.x, pos.y);
        node.adjusted.set_pos(pos.x, pos.y);
        self.geometry_changed(id, adjust)
    }

    /// Set the column.
    pub fn set_x(&mut self, id: WidgetId, x: i32, adjust: bool) -> Result<()> {
        let y = self.node(id)?.wsize.y1;
        self.set_pos(id, Point::new(x, y), adjust)
    }

    /// Set the row.
    pub fn set_y(&mut self, id: WidgetId, y: i32, adjust: bool) -> Result<()> {
        let x = self.node(id)?.wsize.x1;
        self.set_pos(id, Point::new(x, y), adjust)
    }

    /// Shift the widget by a relative amount.
    pub fn move_by(&mut self, id: WidgetId, dx: i32, dy: i32) -> Result<()> {
        let pos = self.node(id)?.wsize.pos().shift(dx, dy);
        self.set_pos(id, pos, true)
    }

    /// Resize the widget.
    pub fn set_size(&mut self, id: WidgetId, size: Expanse, adjust: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        let w = node.hints.clamp_width(size.w).max(1);
        let h = node.hints.clamp_height(size.h).max(1);
        let want = Expanse::new(w, h);
        if node.adjusted.size() == want && node.wsize.size() == want {
            return Ok(());
        }
        node.wsize.set_size(w, h);
        node.adjusted.set_size(w, h);
        self.geometry_changed(id, adjust)
    }

    /// Set the width, keeping the height.
    pub fn set_width(&mut self, id: WidgetId, w: u32, adjust: bool) -> Result<()> {
        let h = self.node(id)?.wsize.height();
        self.set_size(id, Expanse::new(w, h), adjust)
    }

    /// Set the height, keeping the width.
    pub fn set_height(&mut self, id: WidgetId, h: u32, adjust: bool) -> Result<()> {
        let w = self.node(id)?.wsize.width();
        self.set_size(id, Expanse::new(w, h), adjust)
    }

    /// Set position and size together. The adjusted rectangle is reset to the
    /// requested one.
    pub fn set_geometry(
        &mut self,
        id: WidgetId,
        pos: Point,
        size: Expanse,
        adjust: bool,
    ) -> Result<()> {
        let node = self.node_mut(id)?;
        let w = node.hints.clamp_width(size.w).max(1);
        let h = node.hints.clamp_height(size.h).max(1);
        let pos = node.clamp_pos(pos);
        if node.adjusted.pos() == pos && node.adjusted.size() == Expanse::new(w, h) {
            return Ok(());
        }
        node.wsize = Rect::new(pos.x, pos.y, w, h);
        node.adjusted = node.wsize;
        self.geometry_changed(id, adjust)
    }

    /// Set the widget's padding. Changing the root's padding re-lays out
    /// every window when `adjust` is set.
    pub fn set_padding(&mut self, id: WidgetId, padding: Padding, adjust: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.padding == padding {
            return Ok(());
        }
        node.padding = padding;
        self.refresh_derived(id)?;
        if adjust {
            if id == self.root {
                self.adjust_size_global()?;
            } else {
                self.adjust_size(id)?;
            }
        }
        Ok(())
    }

    /// Lay the widget out against its parent's outer rectangle instead of
    /// the parent's client area.
    pub fn set_ignore_padding(&mut self, id: WidgetId, on: bool) -> Result<()> {
        self.node_mut(id)?.ignore_padding = on;
        Ok(())
    }

    /// Replace the size hints and re-clamp the requested size.
    pub fn set_size_hints(&mut self, id: WidgetId, hints: SizeHints) -> Result<()> {
        self.node_mut(id)?.hints = hints;
        let size = self.node(id)?.wsize.size();
        self.set_size(id, size, true)
    }

    /// Common tail of every successful geometry change.
    fn geometry_changed(&mut self, id: WidgetId, adjust: bool) -> Result<()> {
        self.refresh_derived(id)?;
        if adjust {
            self.adjust_size(id)?;
        }
        Ok(())
    }

    /// Recompute everything derived from the adjusted rectangle: the client
    /// offset, the border mask length and the sizes of owned buffers.
    pub(crate) fn refresh_derived(&mut self, id: WidgetId) -> Result<()> {
        let node = self.node_mut(id)?;
        node.client_offset = node.derive_client_offset();
        let (w, h) = (node.adjusted.width(), node.adjusted.height());
        node.mask.resize(w as usize, h as usize);
        trace!(?id, adjusted = ?node.adjusted, client = ?node.client_offset, "geometry");
        self.sync_buffers(id)
    }

    /// Bring the sizes and placement of the widget's own buffers in line with
    /// its geometry.
    pub(crate) fn sync_buffers(&mut self, id: WidgetId) -> Result<()> {
        let node = self.node(id)?;
        let (vwin, child_area) = (node.vwin, node.child_area);
        let (buffer_size, client_size) = (node.buffer_size(), node.client_offset.size());
        if let Some(buf) = vwin {
            self.renderer.resize_buffer(buf, buffer_size)?;
        }
        if let Some(buf) = child_area {
            self.renderer.resize_buffer(buf, client_size)?;
        }
        self.place_window(id)?;
        self.place_child_area(id)
    }

    /// Tell the renderer where a window buffer sits and whether to show it.
    pub(crate) fn place_window(&mut self, id: WidgetId) -> Result<()> {
        let node = self.node(id)?;
        if let Some(buf) = node.vwin {
            let origin = Point::new(node.term_x() - 1, node.term_y() - 1);
            let shown = node.flags.shown;
            self.renderer.place_buffer(buf, origin, shown)?;
        }
        Ok(())
    }

    // Getters.

    /// The adjusted rectangle, relative to the parent's client area.
    pub fn geometry(&self, id: WidgetId) -> Result<Rect> {
        Ok(self.node(id)?.adjusted)
    }

    /// The rectangle as last requested, before space adjustment.
    pub fn requested_geometry(&self, id: WidgetId) -> Result<Rect> {
        Ok(self.node(id)?.wsize)
    }

    /// The adjusted rectangle in 1-based terminal coordinates.
    pub fn term_geometry(&self, id: WidgetId) -> Result<Rect> {
        Ok(self.node(id)?.term_geometry())
    }

    /// Top-left corner in 1-based terminal coordinates.
    pub fn term_pos(&self, id: WidgetId) -> Result<Point> {
        let node = self.node(id)?;
        Ok(Point::new(node.term_x(), node.term_y()))
    }

    /// The content rectangle in 0-based terminal coordinates.
    pub fn client_offset(&self, id: WidgetId) -> Result<Rect> {
        Ok(self.node(id)?.client_offset)
    }

    /// The area the widget is laid out within, in 0-based terminal
    /// coordinates.
    pub fn offset(&self, id: WidgetId) -> Result<Rect> {
        Ok(self.node(id)?.offset)
    }

    /// Adjusted size.
    pub fn size(&self, id: WidgetId) -> Result<Expanse> {
        Ok(self.node(id)?.adjusted.size())
    }

    /// Padding.
    pub fn padding(&self, id: WidgetId) -> Result<Padding> {
        Ok(self.node(id)?.padding)
    }

    /// Size hints.
    pub fn size_hints(&self, id: WidgetId) -> Result<SizeHints> {
        Ok(self.node(id)?.hints)
    }

    /// Shadow extent.
    pub fn shadow_size(&self, id: WidgetId) -> Result<Expanse> {
        Ok(self.node(id)?.shadow)
    }
}
