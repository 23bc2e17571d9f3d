//! Focus management.
//!
//! One widget in the tree holds focus. Moving focus between siblings goes
//! through a cancelable handshake: the current holder gets `FocusOut`, the
//! common parent gets `ChildFocusOut` and may veto by accepting it, and only
//! then does the follower take focus and receive `FocusIn`.

use tracing::debug;

use crate::{
    core::{
        id::WidgetId,
        tree::{Direction, cycle_from},
        world::Core,
    },
    error::Result,
    event::{Event, FocusKind, Outcome},
};

/// Trait for managing focus.
pub trait FocusManager {
    /// The widget holding focus.
    fn focus_widget(&self) -> Option<WidgetId>;

    /// Does the widget hold focus?
    fn has_focus(&self, id: WidgetId) -> bool;

    /// Give focus to, or take it from, a widget. Disabled widgets refuse and
    /// return `false`. Focusing a widget inside an inactive window raises
    /// and activates that window.
    fn set_focus(&mut self, id: WidgetId, enable: bool) -> Result<bool>;

    /// Move focus from `id` to the next focusable sibling, wrapping around.
    /// Fails if the parent has at most one focusable child.
    fn focus_next_child(&mut self, id: WidgetId) -> Result<bool>;

    /// Move focus from `id` to the previous focusable sibling.
    fn focus_prev_child(&mut self, id: WidgetId) -> Result<bool>;

    /// Focus the first focusable descendant of `id`, preferring the deepest
    /// leaf.
    fn focus_first_child(&mut self, id: WidgetId) -> Result<bool>;

    /// Focus the last focusable descendant of `id`.
    fn focus_last_child(&mut self, id: WidgetId) -> Result<bool>;

    /// Run the focus handshake to move focus from `current` to `follower`
    /// under their common `parent`.
    fn change_focus(
        &mut self,
        current: WidgetId,
        follower: WidgetId,
        parent: WidgetId,
        kind: FocusKind,
    ) -> Result<bool>;

    /// Number of shown, focusable, non-window children of `id`.
    fn focusable_children(&self, id: WidgetId) -> Result<usize>;

    /// The widget that last held focus inside a window.
    fn window_focus_widget(&self, window: WidgetId) -> Result<Option<WidgetId>>;
}

impl Core {
    /// Shared body of `focus_next_child` and `focus_prev_child`.
    fn cycle_focus(&mut self, id: WidgetId, dir: Direction) -> Result<bool> {
        let node = self.node(id)?;
        if node.kind.is_dialog() {
            return Ok(false);
        }
        let Some(parent) = node.parent else {
            return Ok(false);
        };
        if self.focusable_children(parent)? <= 1 {
            return Ok(false);
        }
        let siblings = self.node(parent)?.children.clone();
        let next = cycle_from(&siblings, id, dir, |s| {
            self.nodes.get(s).is_some_and(|n| {
                n.flags.active && n.flags.focusable && n.flags.shown && !n.kind.is_window()
            })
        });
        let Some(next) = next else {
            return Ok(false);
        };
        let kind = match dir {
            Direction::Forward => FocusKind::Next,
            Direction::Backward => FocusKind::Previous,
        };
        self.change_focus(id, next, parent, kind)
    }

    /// Shared body of `focus_first_child` and `focus_last_child`.
    fn focus_edge_child(&mut self, id: WidgetId, dir: Direction) -> Result<bool> {
        let children = self.node(id)?.children.clone();
        for child in dir.iter(&children) {
            let Some(node) = self.nodes.get(*child) else {
                continue;
            };
            if !(node.flags.active && node.flags.focusable) || node.kind.is_menu() {
                continue;
            }
            let is_window = node.kind.is_window();
            let has_children = !node.children.is_empty();
            self.set_focus(*child, true)?;
            if has_children {
                let found = self.focus_edge_child(*child, dir)?;
                if !found && is_window {
                    continue;
                }
            }
            return Ok(true);
        }
        Ok(false)
    }
}

impl FocusManager for Core {
    fn focus_widget(&self) -> Option<WidgetId> {
        self.focus
    }

    fn has_focus(&self, id: WidgetId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.flags.focus)
    }

    fn set_focus(&mut self, id: WidgetId, enable: bool) -> Result<bool> {
        let node = self.node(id)?;
        if !node.flags.active {
            return Ok(false);
        }
        if node.flags.focus == enable {
            return Ok(true);
        }
        if !enable {
            self.node_mut(id)?.flags.focus = false;
            if self.focus == Some(id) {
                self.focus = None;
            }
            return Ok(false);
        }

        if let Some(last) = self.focus.and_then(|f| self.nodes.get_mut(f)) {
            last.flags.focus = false;
        }
        self.focus = Some(id);

        if let Some(window) = self.window_of(id)? {
            if !self.node(window)?.flags.window_active {
                let raised = self.raise_window(window)?;
                self.set_active_window(window)?;
                let w = self.node(window)?;
                if raised && w.flags.visible && w.flags.shown {
                    self.redraw(window)?;
                }
            }
            self.node_mut(window)?.window_focus = Some(id);
        }
        self.node_mut(id)?.flags.focus = true;
        debug!(?id, "focus");
        Ok(true)
    }

    fn focus_next_child(&mut self, id: WidgetId) -> Result<bool> {
        self.cycle_focus(id, Direction::Forward)
    }

    fn focus_prev_child(&mut self, id: WidgetId) -> Result<bool> {
        self.cycle_focus(id, Direction::Backward)
    }

    fn focus_first_child(&mut self, id: WidgetId) -> Result<bool> {
        self.focus_edge_child(id, Direction::Forward)
    }

    fn focus_last_child(&mut self, id: WidgetId) -> Result<bool> {
        self.focus_edge_child(id, Direction::Backward)
    }

    fn change_focus(
        &mut self,
        current: WidgetId,
        follower: WidgetId,
        parent: WidgetId,
        kind: FocusKind,
    ) -> Result<bool> {
        if follower == current {
            return Ok(false);
        }
        let mut out = self.send_event(current, &Event::FocusOut(kind))?;
        let veto = self.send_event(parent, &Event::ChildFocusOut(kind))?;
        if veto.is_accepted() {
            out = Outcome::Ignored;
        }
        if !out.is_accepted() {
            debug!(?current, ?follower, "focus transfer declined");
            return Ok(true);
        }

        self.set_focus(follower, true)?;
        self.send_event(parent, &Event::ChildFocusIn(kind))?;
        let accepted = self.send_event(follower, &Event::FocusIn(kind))?;
        if accepted.is_accepted() {
            self.redraw(current)?;
            self.redraw(follower)?;
            self.renderer.flush()?;
        }
        Ok(true)
    }

    fn focusable_children(&self, id: WidgetId) -> Result<usize> {
        Ok(self
            .node(id)?
            .children
            .iter()
            .filter_map(|c| self.nodes.get(*c))
            .filter(|n| n.flags.shown && n.flags.focusable && !n.kind.is_window())
            .count())
    }

    fn window_focus_widget(&self, window: WidgetId) -> Result<Option<WidgetId>> {
        Ok(self.node(window)?.window_focus)
    }
}
