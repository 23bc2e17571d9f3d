//! The widget arena and the application-wide state it owns.

use std::any::{Any, type_name};

use slotmap::SlotMap;
use tracing::{debug, error};

use crate::{
    core::{
        callback::Deferred,
        id::{BufferId, WidgetId},
        tree::{Direction, Walk},
        node::{Flags, Kind, Node},
        options::Options,
        render::Renderer,
        terminal::{Capabilities, Terminal},
    },
    error::{Error, Result},
    geom::{Padding, Point, Rect},
    style::{Color, WidgetColors},
    widget::Widget,
};

/// Window registries owned by the root.
#[derive(Debug, Default, Clone)]
pub(crate) struct Registry {
    /// Every window, in stacking order from bottom to top.
    pub(crate) windows: Vec<WidgetId>,
    /// Dialog windows.
    pub(crate) dialogs: Vec<WidgetId>,
    /// Windows kept above ordinary windows.
    pub(crate) always_on_top: Vec<WidgetId>,
    /// Widgets closed and awaiting destruction.
    pub(crate) close_list: Vec<WidgetId>,
}

/// The widget tree and every piece of state shared across it: focus, window
/// stacking, batching guards, the desktop buffer and the external services.
///
/// Each `Core` is an independent application context, so several trees may
/// coexist in one process.
pub struct Core {
    /// Widget arena.
    pub(crate) nodes: SlotMap<WidgetId, Node>,
    /// The parentless root widget.
    pub(crate) root: WidgetId,
    /// Widget holding global focus.
    pub(crate) focus: Option<WidgetId>,
    /// Widget that received the last mouse press.
    pub(crate) clicked: Option<WidgetId>,
    /// The active window.
    pub(crate) active_window: Option<WidgetId>,
    /// The application's main widget.
    pub(crate) main_widget: Option<WidgetId>,
    /// The status bar, if any.
    pub(crate) status_bar: Option<WidgetId>,
    /// The menu bar, if any.
    pub(crate) menu_bar: Option<WidgetId>,
    /// Window lists.
    pub(crate) registry: Registry,
    /// Number of modal dialogs currently open.
    pub(crate) modal_dialogs: u32,
    /// Outermost widget in a `show` call chain.
    pub(crate) show_root: Option<WidgetId>,
    /// Outermost widget in a `redraw` call chain.
    pub(crate) redraw_root: Option<WidgetId>,
    /// Has the desktop been initialized for the first `show`?
    pub(crate) desktop_initialized: bool,
    /// Shared widget colors.
    pub(crate) colors: WidgetColors,
    /// Terminal capabilities, detected once.
    pub(crate) caps: Capabilities,
    /// The desktop buffer.
    pub(crate) desktop: BufferId,
    /// Compositor.
    pub(crate) renderer: Box<dyn Renderer>,
    /// Terminal capability service.
    pub(crate) terminal: Box<dyn Terminal>,
    /// Requested exit code, set by `quit`.
    pub(crate) exit_code: Option<i32>,
    /// Bound callbacks waiting for their receiver's hook to return.
    pub(crate) deferred: Vec<Deferred>,
}

impl Core {
    /// Construct a tree whose root is `root`, sized to the terminal.
    pub fn new(
        root: impl Into<Box<dyn Widget>>,
        mut terminal: Box<dyn Terminal>,
        mut renderer: Box<dyn Renderer>,
        options: &Options,
    ) -> Result<Self> {
        let caps = Capabilities::detect(terminal.as_ref(), options);
        let size = terminal.detect_size()?;
        let (w, h) = (size.w.max(1), size.h.max(1));
        let desktop = renderer
            .allocate_buffer((w, h).into())
            .inspect_err(|e| error!("desktop buffer allocation failed: {e}"))?;
        let colors = WidgetColors::for_depth(options.theme, caps.max_colors);

        let mut node = Node::new(root.into(), Kind::Root, None, Rect::new(0, 0, w, h));
        node.wsize = Rect::new(1, 1, w, h);
        node.adjusted = node.wsize;
        node.padding = options.root_padding.into();
        node.client_offset = node.offset.shrink(node.padding);
        node.mask.resize(w as usize, h as usize);
        node.flags.visible_cursor = !caps.cursor_hideable;
        node.fg = colors.term_fg;
        node.bg = colors.term_bg;

        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(node);
        debug!(w, h, "root created");
        Ok(Self {
            nodes,
            root,
            focus: None,
            clicked: None,
            active_window: None,
            main_widget: None,
            status_bar: None,
            menu_bar: None,
            registry: Registry::default(),
            modal_dialogs: 0,
            show_root: None,
            redraw_root: None,
            desktop_initialized: false,
            colors,
            caps,
            desktop,
            renderer,
            terminal,
            exit_code: None,
            deferred: Vec::new(),
        })
    }

    /// Borrow a node.
    pub(crate) fn node(&self, id: WidgetId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::NotFound(id))
    }

    /// Borrow a node mutably.
    pub(crate) fn node_mut(&mut self, id: WidgetId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(Error::NotFound(id))
    }

    /// Does `id` refer to a live widget?
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// The root widget.
    pub fn root(&self) -> WidgetId {
        self.root
    }

    /// The desktop buffer.
    pub fn desktop(&self) -> BufferId {
        self.desktop
    }

    /// Number of live widgets.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Is the arena empty? Only true after the root has been destroyed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Shared widget colors.
    pub fn colors(&self) -> &WidgetColors {
        &self.colors
    }

    /// Detected terminal capabilities.
    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    /// Add a widget under `parent`.
    ///
    /// Passing no parent, or asking for a second root, is a structural error:
    /// a tree has exactly one root and it is created with the `Core`.
    pub fn create_widget(
        &mut self,
        parent: Option<WidgetId>,
        kind: Kind,
        widget: impl Into<Box<dyn Widget>>,
    ) -> Result<WidgetId> {
        let Some(parent) = parent else {
            return Err(Error::Structure(
                "a parentless widget was created, but the tree already has a root".into(),
            ));
        };
        if kind == Kind::Root {
            return Err(Error::Structure("only the tree's own root may be a root".into()));
        }
        let offset = self.node(parent)?.client_offset;

        let mut node = Node::new(widget.into(), kind, Some(parent), offset);
        node.flags.visible_cursor = !self.caps.cursor_hideable;
        node.client_offset = node.derive_client_offset();
        if kind.is_window() {
            let size = node.buffer_size();
            let buf = self
                .renderer
                .allocate_buffer(size)
                .inspect_err(|e| error!("window buffer allocation failed: {e}"))?;
            node.vwin = Some(buf);
        }
        let id = self.nodes.insert(node);
        self.node_mut(parent)?.children.push(id);

        if kind.is_window() {
            self.registry.windows.push(id);
            self.place_window(id)?;
        }
        match kind {
            Kind::Dialog => self.registry.dialogs.push(id),
            Kind::StatusBar | Kind::MenuBar => self.replace_bar(id, kind)?,
            _ => {}
        }
        debug!(?id, ?kind, ?parent, "widget created");
        Ok(id)
    }

    /// Add a plain child widget.
    pub fn add_child(
        &mut self,
        parent: WidgetId,
        widget: impl Into<Box<dyn Widget>>,
    ) -> Result<WidgetId> {
        self.create_widget(Some(parent), Kind::Plain, widget)
    }

    /// Add a top-level window.
    pub fn add_window(
        &mut self,
        parent: WidgetId,
        widget: impl Into<Box<dyn Widget>>,
    ) -> Result<WidgetId> {
        self.create_widget(Some(parent), Kind::Window, widget)
    }

    /// Add a dialog window.
    pub fn add_dialog(
        &mut self,
        parent: WidgetId,
        widget: impl Into<Box<dyn Widget>>,
    ) -> Result<WidgetId> {
        self.create_widget(Some(parent), Kind::Dialog, widget)
    }

    /// Install a new status or menu bar, destroying the previous one.
    fn replace_bar(&mut self, id: WidgetId, kind: Kind) -> Result<()> {
        let slot = if kind == Kind::StatusBar {
            &mut self.status_bar
        } else {
            &mut self.menu_bar
        };
        let old = slot.replace(id);
        if let Some(old) = old
            && old != id
            && self.contains(old)
        {
            self.destroy(old)?;
        }
        Ok(())
    }

    /// Destroy a widget and its subtree, unregistering it everywhere.
    /// Destroying the root tears down every registry and requests exit.
    pub fn destroy(&mut self, id: WidgetId) -> Result<()> {
        self.node(id)?;
        let mut doomed = Vec::new();
        self.preorder::<()>(id, Direction::Forward, &mut |_, w| {
            doomed.push(w);
            Ok(Walk::Continue)
        })?;
        // Descendants come after their ancestors, so reversing removes
        // leaves first.
        for w in doomed.into_iter().rev() {
            if self.contains(w) {
                self.destroy_one(w)?;
            }
        }
        Ok(())
    }

    /// Remove a single widget whose children are already gone.
    fn destroy_one(&mut self, id: WidgetId) -> Result<()> {
        let node = self.nodes.remove(id).ok_or(Error::NotFound(id))?;
        if let Some(parent) = node.parent
            && let Some(p) = self.nodes.get_mut(parent)
        {
            p.children.retain(|c| *c != id);
        }

        if self.clicked == Some(id) {
            self.clicked = None;
        }
        for n in self.nodes.values_mut() {
            if n.window_focus == Some(id) {
                n.window_focus = None;
            }
            if let Some(table) = n.accelerators.as_mut() {
                table.retain(|a| a.target != id);
            }
            n.callbacks.unbind(id);
        }
        self.drop_deferred(id);
        if self.focus == Some(id) {
            self.focus = None;
        }
        if self.active_window == Some(id) {
            self.active_window = None;
        }
        if self.status_bar == Some(id) {
            self.status_bar = None;
        }
        if self.menu_bar == Some(id) {
            self.menu_bar = None;
        }
        if node.flags.modal && node.kind.is_dialog() {
            self.modal_dialogs = self.modal_dialogs.saturating_sub(1);
        }
        let r = &mut self.registry;
        r.windows.retain(|w| *w != id);
        r.dialogs.retain(|w| *w != id);
        r.always_on_top.retain(|w| *w != id);
        r.close_list.retain(|w| *w != id);

        for buf in [node.vwin, node.child_area].into_iter().flatten() {
            self.renderer.release_buffer(buf);
        }
        if self.main_widget == Some(id) {
            self.main_widget = None;
            self.quit(0);
        }
        if id == self.root {
            self.registry = Registry::default();
            self.show_root = None;
            self.redraw_root = None;
            self.renderer.release_buffer(self.desktop);
            self.quit(0);
        }
        debug!(?id, name = node.name, "widget destroyed");
        Ok(())
    }

    /// Request application exit.
    pub fn quit(&mut self, code: i32) {
        self.exit_code.get_or_insert(code);
    }

    /// The exit code requested by `quit`, if any.
    pub fn exit_requested(&self) -> Option<i32> {
        self.exit_code
    }

    /// Take the widget out of its slot for the duration of `f`, giving `f`
    /// mutable access to both the widget and the core. If the widget is
    /// destroyed by `f`, it is dropped afterwards instead of restored.
    /// Otherwise any bound callbacks deferred while `f` ran are delivered
    /// once the widget is back in its slot.
    pub(crate) fn with_widget_mut<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Widget, &mut Self) -> R,
    ) -> Result<R> {
        let mut widget = self
            .node_mut(id)?
            .widget
            .take()
            .ok_or(Error::Reentrant(id))?;
        let r = f(widget.as_mut(), self);
        if let Some(node) = self.nodes.get_mut(id)
            && node.widget.is_none()
        {
            node.widget = Some(widget);
            self.run_deferred(id)?;
        }
        Ok(r)
    }

    /// Call `f` with the widget downcast to its concrete type.
    pub fn with_widget<W, R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut W, &mut Self) -> Result<R>,
    ) -> Result<R>
    where
        W: Widget,
    {
        self.with_widget_mut(id, |w, core| {
            let any = w as &mut dyn Any;
            match any.downcast_mut::<W>() {
                Some(w) => f(w, core),
                None => Err(Error::Internal(format!(
                    "{id:?} is not a {}",
                    type_name::<W>()
                ))),
            }
        })?
    }

    // Tree queries.

    /// The widget's role.
    pub fn kind(&self, id: WidgetId) -> Result<Kind> {
        Ok(self.node(id)?.kind)
    }

    /// The widget's name.
    pub fn name(&self, id: WidgetId) -> Result<&str> {
        Ok(&self.node(id)?.name)
    }

    /// The widget's parent.
    pub fn parent(&self, id: WidgetId) -> Result<Option<WidgetId>> {
        Ok(self.node(id)?.parent)
    }

    /// The widget's children in z/tab order.
    pub fn children(&self, id: WidgetId) -> Result<&[WidgetId]> {
        Ok(&self.node(id)?.children)
    }

    /// The nearest window at or above `id`.
    pub fn window_of(&self, id: WidgetId) -> Result<Option<WidgetId>> {
        let mut cur = Some(id);
        while let Some(c) = cur {
            let node = self.node(c)?;
            if node.kind.is_window() {
                return Ok(Some(c));
            }
            cur = node.parent;
        }
        Ok(None)
    }

    /// Is `ancestor` on the parent chain of `id`, or `id` itself?
    pub fn is_ancestor(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.nodes.get(c).and_then(|n| n.parent);
        }
        false
    }

    // Flags.

    /// A copy of the widget's flags.
    pub fn flags(&self, id: WidgetId) -> Result<Flags> {
        Ok(self.node(id)?.flags)
    }

    /// Is the widget enabled?
    pub fn is_enabled(&self, id: WidgetId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.flags.active)
    }

    /// Is the widget currently drawn?
    pub fn is_shown(&self, id: WidgetId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.flags.shown)
    }

    /// Does the widget accept focus?
    pub fn accepts_focus(&self, id: WidgetId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.flags.focusable)
    }

    /// Enable or disable input.
    pub fn set_enabled(&mut self, id: WidgetId, on: bool) -> Result<()> {
        self.node_mut(id)?.flags.active = on;
        Ok(())
    }

    /// Allow or forbid the widget from being shown.
    pub fn set_visible(&mut self, id: WidgetId, on: bool) -> Result<()> {
        self.node_mut(id)?.flags.visible = on;
        Ok(())
    }

    /// Set whether the widget can take focus.
    pub fn set_focusable(&mut self, id: WidgetId, on: bool) -> Result<()> {
        self.node_mut(id)?.flags.focusable = on;
        Ok(())
    }

    /// Set whether the hardware cursor shows while the widget is focused.
    pub fn set_visible_cursor(&mut self, id: WidgetId, on: bool) -> Result<()> {
        self.node_mut(id)?.flags.visible_cursor = on;
        Ok(())
    }

    /// Enable a block shadow one cell wide and tall. Terminals without block
    /// glyphs get no shadow.
    pub fn set_shadow(&mut self, id: WidgetId, on: bool) -> Result<()> {
        let on = on && self.caps.encoding.has_block_glyphs();
        let node = self.node_mut(id)?;
        node.flags.shadow = on;
        node.shadow = if on { (1, 1).into() } else { (0, 0).into() };
        self.sync_buffers(id)
    }

    /// Enable a transparent shadow, two cells wide and one tall.
    pub fn set_transparent_shadow(&mut self, id: WidgetId, on: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        node.flags.trans_shadow = on;
        node.flags.shadow = on;
        node.shadow = if on { (2, 1).into() } else { (0, 0).into() };
        self.sync_buffers(id)
    }

    /// Set the widget's default colors.
    pub fn set_colors(&mut self, id: WidgetId, fg: Color, bg: Color) -> Result<()> {
        let node = self.node_mut(id)?;
        node.fg = fg;
        node.bg = bg;
        Ok(())
    }

    /// The widget's default colors.
    pub fn widget_colors(&self, id: WidgetId) -> Result<(Color, Color)> {
        let n = self.node(id)?;
        Ok((n.fg, n.bg))
    }

    // Application registries.

    /// Windows in stacking order, bottom first.
    pub fn windows(&self) -> &[WidgetId] {
        &self.registry.windows
    }

    /// Dialog windows.
    pub fn dialogs(&self) -> &[WidgetId] {
        &self.registry.dialogs
    }

    /// Widgets queued for destruction by `close`.
    pub fn close_list(&self) -> &[WidgetId] {
        &self.registry.close_list
    }

    /// The status bar.
    pub fn status_bar(&self) -> Option<WidgetId> {
        self.status_bar
    }

    /// The menu bar.
    pub fn menu_bar(&self) -> Option<WidgetId> {
        self.menu_bar
    }

    /// The widget that received the last mouse press.
    pub fn clicked_widget(&self) -> Option<WidgetId> {
        self.clicked
    }

    /// The application's main widget.
    pub fn main_widget(&self) -> Option<WidgetId> {
        self.main_widget
    }

    /// The active window.
    pub fn active_window(&self) -> Option<WidgetId> {
        self.active_window
    }

    /// Number of open modal dialogs.
    pub fn modal_dialog_count(&self) -> u32 {
        self.modal_dialogs
    }

    /// Mark a dialog modal or modeless, keeping the modal counter in step.
    pub fn set_modal(&mut self, id: WidgetId, on: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.flags.modal == on {
            return Ok(());
        }
        node.flags.modal = on;
        if node.kind.is_dialog() {
            if on {
                self.modal_dialogs += 1;
            } else {
                self.modal_dialogs = self.modal_dialogs.saturating_sub(1);
            }
        }
        Ok(())
    }

    /// Set the root's padding. Every window is re-laid out when `adjust` is
    /// set.
    pub fn set_root_padding(&mut self, padding: Padding, adjust: bool) -> Result<()> {
        self.set_padding(self.root, padding, adjust)
    }

    /// The widget's cursor position, relative and 1-based.
    pub fn cursor_pos(&self, id: WidgetId) -> Result<Point> {
        Ok(self.node(id)?.cursor)
    }
}
