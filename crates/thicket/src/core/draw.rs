//! Show, hide and redraw.
//!
//! `show` and `redraw` recurse through the tree. Only the outermost call in a
//! chain brackets the work in a renderer batch and flushes; nested calls see
//! the in-progress pointer and just draw. `show` recurses itself so that each
//! widget's `Show` event follows its children's.

use scopeguard::guard;
use tracing::{debug, trace};

use crate::{
    core::{
        context::Context,
        focus::FocusManager,
        id::WidgetId,
        tree::{Direction, Walk},
        world::Core,
    },
    error::{Error, Result},
    event::Event,
    style::{Color, Style},
};

impl Core {
    /// Run the widget's draw hook. A widget whose own hook is already
    /// running further up the stack is skipped.
    pub(crate) fn draw(&mut self, id: WidgetId) -> Result<()> {
        trace!(?id, "draw");
        match self.with_widget_mut(id, |w, core| w.draw(&mut Context::new(core, id))) {
            Ok(r) => r,
            Err(Error::Reentrant(_)) => {
                debug!(?id, "widget busy, draw skipped");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Put the terminal into full-screen mode and blank the desktop. Runs
    /// once, before the first widget is shown.
    fn init_desktop(&mut self) -> Result<()> {
        self.terminal.init_screen()?;
        let root = self.node(self.root)?;
        let style = Style::new(root.fg, root.bg);
        self.renderer.clear(self.desktop, style)?;
        self.desktop_initialized = true;
        debug!("desktop initialized");
        Ok(())
    }

    /// Show a widget and every descendant that isn't individually hidden.
    /// Does nothing if the widget is not visible.
    pub fn show(&mut self, id: WidgetId) -> Result<()> {
        if !self.node(id)?.flags.visible {
            return Ok(());
        }
        if !self.desktop_initialized {
            self.init_desktop()?;
        }
        let outermost = self.show_root.is_none();
        if outermost {
            self.renderer.start_update();
            self.show_root = Some(id);
        }
        let mut core = guard(&mut *self, |core| {
            if outermost {
                core.show_root = None;
            }
        });

        core.draw(id)?;
        let node = core.node_mut(id)?;
        node.flags.hidden = false;
        node.flags.shown = true;
        core.place_window(id)?;
        core.place_child_area(id)?;

        let children = core.node(id)?.children.clone();
        for child in children {
            if core.contains(child) && !core.node(child)?.flags.hidden {
                core.show(child)?;
            }
        }
        if outermost {
            core.renderer.finish_update()?;
            core.renderer.flush()?;
        }
        drop(core);

        self.send_event(id, &Event::Show)?;
        Ok(())
    }

    /// Hide a widget. If it held focus, focus moves to the previous sibling
    /// that accepts it, or failing that to the parent.
    pub fn hide(&mut self, id: WidgetId) -> Result<()> {
        let node = self.node_mut(id)?;
        node.flags.hidden = true;
        if !node.flags.visible {
            return Ok(());
        }
        node.flags.shown = false;
        let is_dialog = node.kind.is_dialog();
        let parent = node.parent;
        self.place_window(id)?;
        self.place_child_area(id)?;

        if !is_dialog && self.focus == Some(id) && !self.focus_prev_child(id)? {
            if let Some(old) = self.focus.and_then(|f| self.nodes.get_mut(f)) {
                old.flags.focus = false;
            }
            self.focus = parent;
            if let Some(p) = parent.and_then(|p| self.nodes.get_mut(p)) {
                p.flags.focus = true;
            }
            debug!(?id, ?parent, "focus fell back to parent");
        }
        self.send_event(id, &Event::Hide)?;
        Ok(())
    }

    /// Redraw a shown widget and its shown non-window descendants.
    /// Redrawing the root instead blanks the desktop, draws the root and
    /// then redraws every shown window.
    pub fn redraw(&mut self, id: WidgetId) -> Result<()> {
        let is_root = id == self.root;
        if !is_root && !self.node(id)?.flags.shown {
            return Ok(());
        }
        let outermost = self.redraw_root.is_none();
        if outermost {
            self.redraw_root = Some(id);
        }
        let mut core = guard(&mut *self, |core| {
            if outermost {
                core.redraw_root = None;
            }
        });

        if is_root {
            core.renderer.start_update();
            let style = Style::new(core.colors.term_fg, core.colors.term_bg);
            let desktop = core.desktop;
            core.renderer.clear(desktop, style)?;
        }
        core.draw(id)?;
        if is_root {
            core.draw_windows()?;
            core.renderer.finish_update()?;
        } else {
            core.draw_children(id)?;
        }
        if outermost {
            core.renderer.flush()?;
        }
        Ok(())
    }

    /// Blank and redraw every shown window, bottom of the stack first.
    pub(crate) fn draw_windows(&mut self) -> Result<()> {
        let windows = self.registry.windows.clone();
        for w in windows {
            let Some(node) = self.nodes.get(w) else {
                continue;
            };
            if !node.flags.shown {
                continue;
            }
            if let Some(buf) = node.vwin {
                self.renderer
                    .clear(buf, Style::new(Color::Black, Color::Black))?;
            }
            self.redraw(w)?;
        }
        Ok(())
    }

    /// Redraw the shown non-window descendants of a widget. A hidden or
    /// window child prunes its subtree.
    pub(crate) fn draw_children(&mut self, id: WidgetId) -> Result<()> {
        self.preorder::<()>(id, Direction::Forward, &mut |core, w| {
            if w == id {
                return Ok(Walk::Continue);
            }
            let node = core.node(w)?;
            if !node.flags.shown || node.kind.is_window() {
                return Ok(Walk::Skip);
            }
            core.draw(w)?;
            Ok(Walk::Continue)
        })?;
        Ok(())
    }

    /// Is a `show` chain in progress, and if so, rooted where?
    pub fn show_in_progress(&self) -> Option<WidgetId> {
        self.show_root
    }

    /// Is a `redraw` chain in progress, and if so, rooted where?
    pub fn redraw_in_progress(&self) -> Option<WidgetId> {
        self.redraw_root
    }
}
