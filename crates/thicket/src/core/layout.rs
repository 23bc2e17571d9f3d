//! The top-down layout pass.

use tracing::{debug, trace};

use crate::{
    core::{
        id::WidgetId,
        node::Kind,
        tree::{Direction, Walk},
        world::Core,
    },
    error::Result,
    geom::{Padding, Rect, SizeHints},
};

/// Move, then shrink, a non-window widget's adjusted rectangle so it stays
/// inside `offset`.
///
/// The widget is first shifted left and up one cell at a time, never past
/// column or row 1. If it still doesn't fit it is shrunk, but never below the
/// minimum hints and never to zero.
pub(crate) fn fit_into(mut a: Rect, offset: Rect, padding: Padding, hints: SizeHints) -> Rect {
    // A shift pinned at column 1 eats into the width, so the width guard
    // bounds both loops.
    while offset.x1 + a.x1 + a.width() as i32 - padding.right > offset.x2 + 2 && a.width() > 0 {
        a.x1 -= 1;
        a.x2 -= 1;
        if a.x1 < 1 {
            a.x1 = 1;
        }
    }
    while offset.y1 + a.y1 + a.height() as i32 - padding.bottom > offset.y2 + 2
        && a.height() > 0
    {
        a.y1 -= 1;
        a.y2 -= 1;
        if a.y1 < 1 {
            a.y1 = 1;
        }
    }

    while offset.x1 + a.width() as i32 - 1 > offset.x2 && a.width() > 0 {
        a.x2 -= 1;
    }
    if a.width() < hints.min_width {
        a.set_width(hints.min_width);
    }
    if a.width() == 0 {
        a.set_width(1);
    }

    while offset.y1 + a.height() as i32 - 1 > offset.y2 && a.height() > 0 {
        a.y2 -= 1;
    }
    if a.height() < hints.min_height {
        a.set_height(hints.min_height);
    }
    if a.height() == 0 {
        a.set_height(1);
    }
    a
}

impl Core {
    /// Recompute the widget's offset, adjusted rectangle and client offset,
    /// then recurse into its non-window children. Windows run their own
    /// layout pass and are never repositioned by an ancestor's.
    pub fn adjust_size(&mut self, id: WidgetId) -> Result<()> {
        self.preorder::<()>(id, Direction::Forward, &mut |core, w| {
            if w != id && core.node(w)?.kind.is_window() {
                return Ok(Walk::Skip);
            }
            core.adjust_one(w)?;
            Ok(Walk::Continue)
        })?;
        Ok(())
    }

    /// Lay out a single widget within its parent.
    fn adjust_one(&mut self, id: WidgetId) -> Result<()> {
        if id != self.root {
            let offset = self.layout_offset(id)?;
            let node = self.node_mut(id)?;
            node.offset = offset;
            node.adjusted = node.wsize;
        }
        let node = self.node_mut(id)?;
        if node.child_area.is_none() && !node.kind.is_window() {
            node.adjusted = fit_into(node.adjusted, node.offset, node.padding, node.hints);
        }
        self.refresh_derived(id)?;
        trace!(?id, "adjust_size");
        Ok(())
    }

    /// The rectangle a non-root widget is laid out within.
    fn layout_offset(&self, id: WidgetId) -> Result<Rect> {
        let node = self.node(id)?;
        let root = self.node(self.root)?;
        if node.kind.is_window() {
            return Ok(if node.ignore_padding && node.kind != Kind::Dialog {
                Rect::new(0, 0, root.adjusted.width(), root.adjusted.height())
            } else {
                root.client_offset
            });
        }
        let Some(parent) = node.parent else {
            return Ok(node.offset);
        };
        let p = self.node(parent)?;
        Ok(if node.ignore_padding {
            Rect::new(
                p.term_x() - 1,
                p.term_y() - 1,
                p.adjusted.width(),
                p.adjusted.height(),
            )
        } else {
            p.client_offset
        })
    }

    /// Re-lay out the root and then every registered window, dialogs and
    /// always-on-top windows included. Used after the root's padding or the
    /// terminal size changes.
    pub fn adjust_size_global(&mut self) -> Result<()> {
        self.adjust_size(self.root)?;
        let windows = self.registry.windows.clone();
        for w in windows {
            if self.contains(w) {
                self.adjust_size(w)?;
            }
        }
        Ok(())
    }

    /// Respond to a size change. For the root this re-detects the terminal
    /// size and, if it changed, resizes the desktop and re-lays out every
    /// window. Any other widget simply re-runs its layout.
    pub fn resize(&mut self, id: WidgetId) -> Result<()> {
        if id != self.root {
            return self.adjust_size(id);
        }
        let size = self.terminal.detect_size()?;
        let (w, h) = (size.w.max(1), size.h.max(1));
        let root = self.node_mut(id)?;
        if root.adjusted.size() == (w, h).into() {
            return Ok(());
        }
        root.wsize = Rect::new(1, 1, w, h);
        root.adjusted = root.wsize;
        root.offset = Rect::new(0, 0, w, h);
        self.renderer.resize_buffer(self.desktop, (w, h).into())?;
        debug!(w, h, "terminal resized");
        self.adjust_size_global()
    }
}
