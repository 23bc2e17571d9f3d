//! Event delivery: direct dispatch, key bubbling, accelerators, mouse
//! routing and the close protocol.

use std::mem;

use tracing::{debug, trace};

use crate::{
    core::{context::Context, focus::FocusManager, id::WidgetId, world::Core},
    error::{Error, Result},
    event::{
        Event, Key, Outcome,
        mouse::{Action, MouseEvent},
    },
    geom::Point,
};

impl Core {
    /// Offer an event to a single widget.
    ///
    /// If the widget is already running one of its own hooks further up the
    /// stack, it can't be re-entered, and the event gets the outcome an
    /// unhandled event would.
    pub fn send_event(&mut self, id: WidgetId, event: &Event) -> Result<Outcome> {
        trace!(?id, ?event, "send");
        match self.with_widget_mut(id, |w, core| w.on_event(event, &mut Context::new(core, id))) {
            Ok(r) => r,
            Err(Error::Reentrant(_)) => {
                debug!(?id, ?event, "widget busy, default outcome");
                Ok(event.default_outcome())
            }
            Err(e) => Err(e),
        }
    }

    /// Deliver an event to a widget. Key presses and key downs bubble up the
    /// parent chain until accepted or the root is reached; everything else
    /// goes to the widget alone.
    pub fn dispatch_event(&mut self, id: WidgetId, event: &Event) -> Result<Outcome> {
        match event {
            Event::KeyPress(key) => self.key_press(id, *key),
            Event::KeyDown(_) => self.bubble(id, event),
            _ => self.send_event(id, event),
        }
    }

    /// Key press bubbling. Tab and back-tab first try to move focus. Arrow
    /// keys nobody wants are treated as tab requests on the way up.
    fn key_press(&mut self, id: WidgetId, key: Key) -> Result<Outcome> {
        let moved = if key.is_tab() {
            self.focus_next_child(id)?
        } else if key.is_back_tab() {
            self.focus_prev_child(id)?
        } else {
            false
        };
        if moved {
            return Ok(Outcome::Accepted);
        }

        let event = Event::KeyPress(key);
        let mut cur = id;
        loop {
            let outcome = self.send_event(cur, &event)?;
            if !outcome.is_accepted() {
                let moved = if key.is_forward_arrow() {
                    self.focus_next_child(id)?
                } else if key.is_backward_arrow() {
                    self.focus_prev_child(id)?
                } else {
                    false
                };
                if moved {
                    return Ok(Outcome::Accepted);
                }
            }
            if outcome.is_accepted() || cur == self.root {
                return Ok(outcome);
            }
            match self.nodes.get(cur).and_then(|n| n.parent) {
                Some(p) => cur = p,
                None => return Ok(outcome),
            }
        }
    }

    /// Offer an event to a widget and then its ancestors until one accepts.
    fn bubble(&mut self, id: WidgetId, event: &Event) -> Result<Outcome> {
        let mut cur = id;
        loop {
            let outcome = self.send_event(cur, event)?;
            if outcome.is_accepted() || cur == self.root {
                return Ok(outcome);
            }
            match self.nodes.get(cur).and_then(|n| n.parent) {
                Some(p) => cur = p,
                None => return Ok(outcome),
            }
        }
    }

    /// Application entry point for a key press. Accelerators in the active
    /// window's table and then the root's take precedence; otherwise the key
    /// goes to the focus widget, or the root if nothing has focus.
    pub fn handle_key(&mut self, key: Key) -> Result<Outcome> {
        if let Some(target) = self.find_accelerator(self.active_window, key)
            && self.is_enabled(target)
        {
            debug!(?key, ?target, "accelerator");
            let outcome = self.send_event(target, &Event::Accelerator(key))?;
            if outcome.is_accepted() {
                return Ok(outcome);
            }
        }
        let target = self.focus.unwrap_or(self.root);
        self.dispatch_event(target, &Event::KeyPress(key))
    }

    /// The deepest enabled, shown, non-window descendant of `parent` whose
    /// terminal rectangle contains `pos`.
    pub fn child_widget_at(&self, parent: WidgetId, pos: Point) -> Option<WidgetId> {
        let node = self.nodes.get(parent)?;
        node.children.iter().copied().find_map(|c| {
            let n = self.nodes.get(c)?;
            if n.flags.active
                && n.flags.shown
                && !n.kind.is_window()
                && n.term_geometry().contains(pos)
            {
                Some(self.child_widget_at(c, pos).unwrap_or(c))
            } else {
                None
            }
        })
    }

    /// The widget under a 1-based terminal position: the topmost shown
    /// window containing it and then its deepest child, or a widget on the
    /// desktop, or the root.
    pub fn widget_at(&self, pos: Point) -> WidgetId {
        let window = self.registry.windows.iter().rev().copied().find(|w| {
            self.nodes.get(*w).is_some_and(|n| {
                n.flags.shown && n.flags.active && n.term_geometry().contains(pos)
            })
        });
        let base = window.unwrap_or(self.root);
        self.child_widget_at(base, pos).unwrap_or(base)
    }

    /// Application entry point for mouse input. A press records the clicked
    /// widget; other actions go to the widget that was pressed, if any.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> Result<Outcome> {
        let target = match event.action {
            Action::Down | Action::DoubleClick => {
                let w = self.widget_at(event.pos);
                self.clicked = Some(w);
                w
            }
            Action::Up => {
                let w = self.clicked.take();
                w.filter(|w| self.contains(*w))
                    .unwrap_or_else(|| self.widget_at(event.pos))
            }
            Action::Move => self
                .clicked
                .filter(|w| self.contains(*w))
                .unwrap_or_else(|| self.widget_at(event.pos)),
            Action::WheelUp | Action::WheelDown => self.widget_at(event.pos),
        };
        trace!(?target, ?event, "mouse");
        self.send_event(target, &Event::Mouse(event))
    }

    /// Ask a widget to close. If it accepts, the main widget requests quit,
    /// and any other widget is hidden and, unless modal, queued for
    /// destruction. Returns whether the close went ahead.
    pub fn close(&mut self, id: WidgetId) -> Result<bool> {
        if !self.send_event(id, &Event::Close)?.is_accepted() {
            debug!(?id, "close vetoed");
            return Ok(false);
        }
        if self.main_widget == Some(id) {
            self.quit(0);
        } else {
            self.hide(id)?;
            if !self.node(id)?.flags.modal {
                self.registry.close_list.push(id);
            }
        }
        Ok(true)
    }

    /// Destroy every widget queued by `close`.
    pub fn process_close_list(&mut self) -> Result<()> {
        let queued = mem::take(&mut self.registry.close_list);
        for id in queued {
            if self.contains(id) {
                self.destroy(id)?;
            }
        }
        Ok(())
    }
}
