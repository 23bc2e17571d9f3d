//! Window stacking and activation.

use tracing::debug;

use crate::{
    core::{focus::FocusManager, id::WidgetId, world::Core},
    error::{Error, Result},
};

impl Core {
    /// Check that `id` is a window.
    fn expect_window(&self, id: WidgetId) -> Result<()> {
        if self.node(id)?.kind.is_window() {
            Ok(())
        } else {
            Err(Error::Structure(format!("{id:?} is not a window")))
        }
    }

    /// Move a window to the top of the stack. Ordinary windows stay below
    /// the always-on-top ones. Returns whether the order changed.
    pub fn raise_window(&mut self, id: WidgetId) -> Result<bool> {
        self.expect_window(id)?;
        let on_top = self.node(id)?.flags.always_on_top;
        let windows = &mut self.registry.windows;
        let Some(pos) = windows.iter().position(|w| *w == id) else {
            return Ok(false);
        };
        let before = windows.clone();
        windows.remove(pos);
        let at = if on_top {
            windows.len()
        } else {
            let nodes = &self.nodes;
            windows
                .iter()
                .position(|w| nodes.get(*w).is_some_and(|n| n.flags.always_on_top))
                .unwrap_or(windows.len())
        };
        windows.insert(at, id);
        let changed = *windows != before;
        if changed {
            debug!(?id, "window raised");
        }
        Ok(changed)
    }

    /// Move a window to the bottom of the stack, or of the always-on-top
    /// group. Returns whether the order changed.
    pub fn lower_window(&mut self, id: WidgetId) -> Result<bool> {
        self.expect_window(id)?;
        let on_top = self.node(id)?.flags.always_on_top;
        let windows = &mut self.registry.windows;
        let Some(pos) = windows.iter().position(|w| *w == id) else {
            return Ok(false);
        };
        let before = windows.clone();
        windows.remove(pos);
        let at = if on_top {
            let nodes = &self.nodes;
            windows
                .iter()
                .position(|w| nodes.get(*w).is_some_and(|n| n.flags.always_on_top))
                .unwrap_or(windows.len())
        } else {
            0
        };
        windows.insert(at, id);
        Ok(*windows != before)
    }

    /// Keep a window above ordinary windows.
    pub fn set_always_on_top(&mut self, id: WidgetId, on: bool) -> Result<()> {
        self.expect_window(id)?;
        let node = self.node_mut(id)?;
        if node.flags.always_on_top == on {
            return Ok(());
        }
        node.flags.always_on_top = on;
        if on {
            self.registry.always_on_top.push(id);
            self.raise_window(id)?;
        } else {
            self.registry.always_on_top.retain(|w| *w != id);
            // Drop below the always-on-top group.
            let windows = &mut self.registry.windows;
            windows.retain(|w| *w != id);
            let nodes = &self.nodes;
            let at = windows
                .iter()
                .position(|w| nodes.get(*w).is_some_and(|n| n.flags.always_on_top))
                .unwrap_or(windows.len());
            windows.insert(at, id);
        }
        Ok(())
    }

    /// The windows kept above ordinary windows, in the order they were
    /// marked.
    pub fn always_on_top(&self) -> &[WidgetId] {
        &self.registry.always_on_top
    }

    /// Make a window the active one.
    pub fn set_active_window(&mut self, id: WidgetId) -> Result<()> {
        self.expect_window(id)?;
        if let Some(old) = self.active_window
            && old != id
            && let Some(n) = self.nodes.get_mut(old)
        {
            n.flags.window_active = false;
        }
        self.node_mut(id)?.flags.window_active = true;
        self.active_window = Some(id);
        Ok(())
    }

    /// Register the application's main widget. If nothing holds focus yet,
    /// the root's first focusable child takes it.
    pub fn set_main_widget(&mut self, id: WidgetId) -> Result<()> {
        self.node(id)?;
        self.main_widget = Some(id);
        if self.focus.is_none() {
            self.focus_first_child(self.root)?;
        }
        Ok(())
    }
}
