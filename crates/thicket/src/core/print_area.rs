//! Resolving which buffer a widget draws into.
//!
//! A widget prints into the nearest buffer found walking up from itself: a
//! window's private buffer, or a child print area that a plain widget opted
//! to own. With neither on the path the widget draws straight into the
//! desktop. Buffer-owned resolutions are cached on the widget until an
//! ancestor gains or loses a child print area.

use tracing::{debug, error};

use crate::{
    core::{
        id::{BufferId, WidgetId},
        tree::{Direction, Walk},
        world::Core,
    },
    error::{Error, Result},
    geom::Point,
    style::Style,
};

/// A resolved print area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintArea {
    /// The buffer to draw into.
    pub buffer: BufferId,
    /// The widget owning the buffer, or `None` for the desktop.
    pub owner: Option<WidgetId>,
}

impl Core {
    /// The buffer `id` must draw into.
    pub fn print_area(&mut self, id: WidgetId) -> Result<PrintArea> {
        if let Some(area) = self.node(id)?.print_area {
            return Ok(area);
        }
        let mut cur = id;
        loop {
            let node = self.node(cur)?;
            if let Some(buffer) = node.vwin.or(node.child_area) {
                let area = PrintArea {
                    buffer,
                    owner: Some(cur),
                };
                self.node_mut(id)?.print_area = Some(area);
                return Ok(area);
            }
            match node.parent {
                Some(p) => cur = p,
                None => {
                    return Ok(PrintArea {
                        buffer: self.desktop,
                        owner: None,
                    });
                }
            }
        }
    }

    /// The private buffer of a window.
    pub fn window_buffer(&self, id: WidgetId) -> Result<BufferId> {
        self.node(id)?
            .vwin
            .ok_or_else(|| Error::Structure(format!("{id:?} is not a window")))
    }

    /// Has a print area been resolved and cached for `id`?
    pub fn has_print_area(&self, id: WidgetId) -> Result<bool> {
        Ok(self.node(id)?.print_area.is_some())
    }

    /// Does `id` draw into a child print area owned by an ancestor?
    pub fn is_child_print_area(&mut self, id: WidgetId) -> Result<bool> {
        let area = self.print_area(id)?;
        Ok(match area.owner {
            Some(owner) if owner != id => self.node(owner)?.child_area == Some(area.buffer),
            _ => false,
        })
    }

    /// Does `id` own a child print area?
    pub fn has_child_print_area(&self, id: WidgetId) -> Result<bool> {
        Ok(self.node(id)?.child_area.is_some())
    }

    /// Give a plain widget its own buffer, shared by its descendants and
    /// covering its client area.
    pub fn create_child_print_area(&mut self, id: WidgetId) -> Result<BufferId> {
        let node = self.node(id)?;
        if node.kind.is_window() {
            return Err(Error::Structure(
                "windows draw into their own buffer and can't own a child print area".into(),
            ));
        }
        if let Some(buf) = node.child_area {
            return Ok(buf);
        }
        let size = node.client_offset.size();
        let buf = self
            .renderer
            .allocate_buffer(size)
            .inspect_err(|e| error!("child print area allocation failed: {e}"))?;
        self.node_mut(id)?.child_area = Some(buf);
        self.invalidate_print_areas(id)?;
        self.place_child_area(id)?;
        debug!(?id, "child print area created");
        Ok(buf)
    }

    /// Release a widget's child print area. Its subtree falls back to the
    /// next buffer up the tree.
    pub fn release_child_print_area(&mut self, id: WidgetId) -> Result<()> {
        if let Some(buf) = self.node_mut(id)?.child_area.take() {
            self.renderer.release_buffer(buf);
            self.invalidate_print_areas(id)?;
        }
        Ok(())
    }

    /// Drop cached resolutions in the subtree under `id`. Subtrees below
    /// another buffer owner resolve to that owner and keep their caches.
    fn invalidate_print_areas(&mut self, id: WidgetId) -> Result<()> {
        self.preorder::<()>(id, Direction::Forward, &mut |core, w| {
            let Some(n) = core.nodes.get_mut(w) else {
                return Ok(Walk::Skip);
            };
            n.print_area = None;
            if w != id && (n.vwin.is_some() || n.child_area.is_some()) {
                return Ok(Walk::Skip);
            }
            Ok(Walk::Continue)
        })?;
        Ok(())
    }

    /// Tell the renderer where a child print area sits.
    pub(crate) fn place_child_area(&mut self, id: WidgetId) -> Result<()> {
        let node = self.node(id)?;
        if let Some(buf) = node.child_area {
            let origin = node.client_offset.pos();
            let shown = node.flags.shown;
            self.renderer.place_buffer(buf, origin, shown)?;
        }
        Ok(())
    }

    /// The 1-based terminal position of cell (0, 0) of a print area.
    fn area_origin(&self, area: PrintArea) -> Result<Point> {
        let Some(owner) = area.owner else {
            return Ok(Point::new(1, 1));
        };
        let node = self.node(owner)?;
        let origin = Point::new(node.term_x(), node.term_y());
        if node.child_area == Some(area.buffer) {
            // Child areas start at the owner's client area.
            Ok(origin.shift(node.padding.left, node.padding.top))
        } else {
            Ok(origin)
        }
    }

    /// Translate a 1-based widget-relative position into the widget's print
    /// area.
    fn to_area(&mut self, id: WidgetId, at: Point) -> Result<(PrintArea, Point)> {
        let area = self.print_area(id)?;
        let origin = self.area_origin(area)?;
        let node = self.node(id)?;
        let pos = Point::new(
            node.term_x() + at.x - 1 - origin.x,
            node.term_y() + at.y - 1 - origin.y,
        );
        Ok((area, pos))
    }

    /// Print text at a 1-based position relative to the widget's top-left
    /// corner. Output past the buffer's edges is clipped by the renderer.
    pub fn print(&mut self, id: WidgetId, at: Point, text: &str, style: Style) -> Result<()> {
        let (area, pos) = self.to_area(id, at)?;
        self.renderer.print(area.buffer, pos, text, style)
    }

    /// Fill the widget's rectangle with blanks.
    pub fn clear_widget(&mut self, id: WidgetId, style: Style) -> Result<()> {
        let size = self.node(id)?.adjusted.size();
        let blank = " ".repeat(size.w as usize);
        for y in 1..=size.h as i32 {
            self.print(id, Point::new(1, y), &blank, style)?;
        }
        Ok(())
    }

    /// Place the input cursor at a 1-based widget-relative position.
    ///
    /// The position is always remembered, but only reaches the renderer for
    /// a focused non-window widget that lives inside a window. Returns
    /// whether it did.
    pub fn set_cursor_pos(&mut self, id: WidgetId, pos: Point) -> Result<bool> {
        let node = self.node_mut(id)?;
        node.cursor = pos;
        if !node.flags.focus || node.kind.is_window() {
            return Ok(false);
        }
        let visible = node.flags.visible_cursor;
        if self.window_of(id)?.is_none() {
            return Ok(false);
        }
        let (area, at) = self.to_area(id, pos)?;
        self.renderer.set_cursor(area.buffer, at, visible)?;
        Ok(true)
    }

    /// Register the widget with the renderer to be consulted before its print
    /// area is composited. Resolves the print area first.
    pub fn add_preprocessing_handler(&mut self, id: WidgetId) -> Result<()> {
        let area = self.print_area(id)?;
        self.renderer.add_preprocessing_handler(area.buffer, id);
        Ok(())
    }

    /// Remove the widget's preprocessing handlers.
    pub fn del_preprocessing_handler(&mut self, id: WidgetId) -> Result<()> {
        let area = self.print_area(id)?;
        self.renderer.del_preprocessing_handler(area.buffer, id);
        Ok(())
    }
}
