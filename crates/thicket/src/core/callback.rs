//! Per-widget signal handlers.
//!
//! Two registries live on every widget: free handlers, which are closures
//! identified by their `Rc`, and instance-bound handlers, which run against
//! another widget in the arena. Emitting a signal runs matching free handlers
//! first and then matching instance-bound handlers, each in registration
//! order.
//!
//! A bound handler whose receiver is mid-hook (for example a widget that
//! emits a signal bound to itself from its own event handler) is queued and
//! runs as soon as that hook returns.

use std::{any::Any, mem, rc::Rc};

use tracing::trace;

use crate::{
    core::{id::WidgetId, world::Core},
    error::Result,
    widget::Widget,
};

/// A free-standing handler: receives the core, the emitting widget and the
/// entry's payload.
pub type Callback = Rc<dyn Fn(&mut Core, WidgetId, &dyn Any) -> Result<()>>;

/// A handler bound to a receiving widget instance.
type InstanceCallback = Rc<dyn Fn(&mut dyn Widget, &mut Core, WidgetId, &dyn Any) -> Result<()>>;

/// A free handler entry.
#[derive(Clone)]
struct Entry {
    /// Signal name.
    signal: String,
    /// Handler.
    handler: Callback,
    /// Opaque data handed to the handler.
    payload: Rc<dyn Any>,
}

/// An instance-bound handler entry.
#[derive(Clone)]
struct InstanceEntry {
    /// Signal name.
    signal: String,
    /// Receiving widget.
    instance: WidgetId,
    /// Handler.
    handler: InstanceCallback,
    /// Opaque data handed to the handler.
    payload: Rc<dyn Any>,
}

/// A bound call held back until its receiver's current hook returns.
pub(crate) struct Deferred {
    /// Receiving widget.
    instance: WidgetId,
    /// Handler.
    handler: InstanceCallback,
    /// The widget that emitted the signal.
    emitter: WidgetId,
    /// Opaque data handed to the handler.
    payload: Rc<dyn Any>,
}

/// The two callback registries of a widget.
#[derive(Clone, Default)]
pub(crate) struct Callbacks {
    /// Free handlers.
    free: Vec<Entry>,
    /// Instance-bound handlers.
    bound: Vec<InstanceEntry>,
}

impl Callbacks {
    /// Drop instance-bound entries that target `instance`.
    pub(crate) fn unbind(&mut self, instance: WidgetId) {
        self.bound.retain(|e| e.instance != instance);
    }

    /// Number of entries across both registries.
    pub(crate) fn len(&self) -> usize {
        self.free.len() + self.bound.len()
    }
}

impl Core {
    /// Register a free handler for `signal` on widget `id`.
    pub fn add_callback(
        &mut self,
        id: WidgetId,
        signal: &str,
        handler: Callback,
        payload: impl Any,
    ) -> Result<()> {
        self.node_mut(id)?.callbacks.free.push(Entry {
            signal: signal.into(),
            handler,
            payload: Rc::new(payload),
        });
        Ok(())
    }

    /// Register a handler that runs against the widget `instance` when `id`
    /// emits `signal`. The handler is skipped if `instance` is not a `W`.
    pub fn add_instance_callback<W, F>(
        &mut self,
        id: WidgetId,
        signal: &str,
        instance: WidgetId,
        handler: F,
        payload: impl Any,
    ) -> Result<()>
    where
        W: Widget,
        F: Fn(&mut W, &mut Core, WidgetId, &dyn Any) -> Result<()> + 'static,
    {
        self.node(instance)?;
        let handler: InstanceCallback = Rc::new(move |w, core, emitter, payload| {
            let any = w as &mut dyn Any;
            match any.downcast_mut::<W>() {
                Some(w) => handler(w, core, emitter, payload),
                None => Ok(()),
            }
        });
        self.node_mut(id)?.callbacks.bound.push(InstanceEntry {
            signal: signal.into(),
            instance,
            handler,
            payload: Rc::new(payload),
        });
        Ok(())
    }

    /// Remove every free entry on `id` that uses `handler`.
    pub fn del_callback(&mut self, id: WidgetId, handler: &Callback) -> Result<()> {
        self.node_mut(id)?
            .callbacks
            .free
            .retain(|e| !Rc::ptr_eq(&e.handler, handler));
        Ok(())
    }

    /// Remove every instance-bound entry on `id` targeting `instance`.
    pub fn del_instance_callbacks(&mut self, id: WidgetId, instance: WidgetId) -> Result<()> {
        self.node_mut(id)?.callbacks.unbind(instance);
        Ok(())
    }

    /// Clear both registries of `id`.
    pub fn del_callbacks(&mut self, id: WidgetId) -> Result<()> {
        self.node_mut(id)?.callbacks = Callbacks::default();
        Ok(())
    }

    /// Number of callbacks registered on `id`.
    pub fn callback_count(&self, id: WidgetId) -> Result<usize> {
        Ok(self.node(id)?.callbacks.len())
    }

    /// Run every handler registered on `id` for `signal`.
    ///
    /// The matching entries are snapshotted first, so handlers may add or
    /// remove callbacks without affecting the current emission. Instance
    /// handlers whose receiver has been destroyed are skipped, and those
    /// whose receiver is busy in a hook are deferred until it returns.
    pub fn emit_callback(&mut self, id: WidgetId, signal: &str) -> Result<()> {
        let callbacks = &self.node(id)?.callbacks;
        let free: Vec<Entry> = callbacks
            .free
            .iter()
            .filter(|e| e.signal == signal)
            .cloned()
            .collect();
        let bound: Vec<InstanceEntry> = callbacks
            .bound
            .iter()
            .filter(|e| e.signal == signal)
            .cloned()
            .collect();
        trace!(signal, free = free.len(), bound = bound.len(), "emit");

        for e in free {
            (e.handler)(self, id, e.payload.as_ref())?;
        }
        for e in bound {
            if !self.contains(e.instance) {
                continue;
            }
            if self.node(e.instance)?.widget.is_none() {
                trace!(signal, instance = ?e.instance, "receiver busy, deferred");
                self.deferred.push(Deferred {
                    instance: e.instance,
                    handler: e.handler,
                    emitter: id,
                    payload: e.payload,
                });
                continue;
            }
            self.with_widget_mut(e.instance, |w, core| {
                (e.handler)(w, core, id, e.payload.as_ref())
            })??;
        }
        Ok(())
    }

    /// Run the calls deferred for `id`, in the order they were emitted.
    pub(crate) fn run_deferred(&mut self, id: WidgetId) -> Result<()> {
        if !self.deferred.iter().any(|d| d.instance == id) {
            return Ok(());
        }
        let (mine, rest): (Vec<_>, Vec<_>) = mem::take(&mut self.deferred)
            .into_iter()
            .partition(|d| d.instance == id);
        self.deferred = rest;
        for d in mine {
            if !self.contains(id) {
                break;
            }
            self.with_widget_mut(id, |w, core| {
                (d.handler)(w, core, d.emitter, d.payload.as_ref())
            })??;
        }
        Ok(())
    }

    /// Drop deferred calls aimed at a destroyed widget.
    pub(crate) fn drop_deferred(&mut self, id: WidgetId) {
        self.deferred.retain(|d| d.instance != id);
    }
}
