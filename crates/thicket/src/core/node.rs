use crate::{
    core::{
        accel::Accelerator,
        border::BorderMask,
        callback::Callbacks,
        id::{BufferId, WidgetId},
        print_area::PrintArea,
    },
    geom::{Expanse, Padding, Point, Rect, SizeHints},
    style::Color,
    widget::Widget,
};

/// What role a widget plays in the tree. Behavior that differs between roles
/// is keyed off this tag rather than the widget's concrete type.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Kind {
    /// The single parentless widget that owns the desktop.
    Root,
    /// A top-level window with its own buffer.
    Window,
    /// A window registered in the dialog list.
    Dialog,
    /// The application menu bar.
    MenuBar,
    /// The application status bar.
    StatusBar,
    /// A drop-down menu window.
    Menu,
    /// An ordinary widget drawn into an ancestor's buffer.
    Plain,
}

impl Kind {
    /// Does this kind own a private window buffer?
    pub fn is_window(self) -> bool {
        matches!(
            self,
            Self::Window | Self::Dialog | Self::MenuBar | Self::StatusBar | Self::Menu
        )
    }

    /// Is this a dialog?
    pub fn is_dialog(self) -> bool {
        self == Self::Dialog
    }

    /// Is this part of the menu system? Menu widgets are skipped when
    /// searching for an initial focus target.
    pub fn is_menu(self) -> bool {
        matches!(self, Self::MenuBar | Self::Menu)
    }
}

/// Per-widget state flags.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Flags {
    /// Enabled for input.
    pub active: bool,
    /// Allowed to be shown at all.
    pub visible: bool,
    /// Currently drawn on screen.
    pub shown: bool,
    /// Explicitly hidden; `show` on an ancestor skips it.
    pub hidden: bool,
    /// Holds global focus.
    pub focus: bool,
    /// Can take focus.
    pub focusable: bool,
    /// Shows the hardware cursor while focused.
    pub visible_cursor: bool,
    /// Modal dialog.
    pub modal: bool,
    /// Draws a shadow.
    pub shadow: bool,
    /// Draws a transparent shadow instead of a block shadow.
    pub trans_shadow: bool,
    /// The active window.
    pub window_active: bool,
    /// Stays above ordinary windows.
    pub always_on_top: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            active: true,
            visible: true,
            shown: false,
            hidden: false,
            focus: false,
            focusable: true,
            visible_cursor: true,
            modal: false,
            shadow: false,
            trans_shadow: false,
            window_active: false,
            always_on_top: false,
        }
    }
}

/// A widget slot in the Core arena.
pub(crate) struct Node {
    /// Widget behavior. Taken out while one of its hooks runs.
    pub(crate) widget: Option<Box<dyn Widget>>,
    /// Name used in dumps and logs.
    pub(crate) name: String,
    /// Role of the widget.
    pub(crate) kind: Kind,
    /// Parent, absent only for the root.
    pub(crate) parent: Option<WidgetId>,
    /// Children in z/tab order.
    pub(crate) children: Vec<WidgetId>,

    /// Requested rectangle, parent-relative and 1-based.
    pub(crate) wsize: Rect,
    /// Requested rectangle after space adjustment.
    pub(crate) adjusted: Rect,
    /// The area available to the widget, in 0-based terminal coordinates.
    pub(crate) offset: Rect,
    /// Content area in 0-based terminal coordinates.
    pub(crate) client_offset: Rect,
    /// Padding around the content area.
    pub(crate) padding: Padding,
    /// Size constraints.
    pub(crate) hints: SizeHints,
    /// Shadow extent to the right and below.
    pub(crate) shadow: Expanse,
    /// Lay out against the parent's outer rectangle instead of its client area.
    pub(crate) ignore_padding: bool,

    /// State flags.
    pub(crate) flags: Flags,
    /// Double-line border mask.
    pub(crate) mask: BorderMask,
    /// Default foreground.
    pub(crate) fg: Color,
    /// Default background.
    pub(crate) bg: Color,
    /// Input cursor position relative to the widget, 1-based.
    pub(crate) cursor: Point,

    /// Private window buffer.
    pub(crate) vwin: Option<BufferId>,
    /// Buffer shared with descendants.
    pub(crate) child_area: Option<BufferId>,
    /// Cached print area resolution.
    pub(crate) print_area: Option<PrintArea>,

    /// Accelerator table, for the root and windows.
    pub(crate) accelerators: Option<Vec<Accelerator>>,
    /// Registered callbacks.
    pub(crate) callbacks: Callbacks,
    /// The widget inside this window that last held focus.
    pub(crate) window_focus: Option<WidgetId>,
}

impl Node {
    /// A fresh node with default geometry and flags.
    pub(crate) fn new(
        widget: Box<dyn Widget>,
        kind: Kind,
        parent: Option<WidgetId>,
        offset: Rect,
    ) -> Self {
        let name = widget.name();
        let wsize = Rect::new(1, 1, 1, 1);
        let accelerators = (kind == Kind::Root || kind.is_window()).then(Vec::new);
        Self {
            widget: Some(widget),
            name,
            kind,
            parent,
            children: Vec::new(),
            wsize,
            adjusted: wsize,
            offset,
            client_offset: offset,
            padding: Padding::default(),
            hints: SizeHints::default(),
            shadow: Expanse::default(),
            ignore_padding: false,
            flags: Flags::default(),
            mask: BorderMask::new(1, 1),
            fg: Color::Default,
            bg: Color::Default,
            cursor: Point::new(1, 1),
            vwin: None,
            child_area: None,
            print_area: None,
            accelerators,
            callbacks: Callbacks::default(),
            window_focus: None,
        }
    }

    /// Terminal column of the widget's left edge, 1-based.
    pub(crate) fn term_x(&self) -> i32 {
        self.offset.x1 + self.adjusted.x1
    }

    /// Terminal row of the widget's top edge, 1-based.
    pub(crate) fn term_y(&self) -> i32 {
        self.offset.y1 + self.adjusted.y1
    }

    /// The widget's rectangle in 1-based terminal coordinates.
    pub(crate) fn term_geometry(&self) -> Rect {
        Rect::new(
            self.term_x(),
            self.term_y(),
            self.adjusted.width(),
            self.adjusted.height(),
        )
    }

    /// A requested position as this widget may take it. Windows go anywhere;
    /// everything else stays at or right of column 1 and at or below row 1.
    pub(crate) fn clamp_pos(&self, pos: Point) -> Point {
        if self.kind.is_window() {
            pos
        } else {
            Point::new(pos.x.max(1), pos.y.max(1))
        }
    }

    /// Content area derived from the adjusted rectangle and padding.
    pub(crate) fn derive_client_offset(&self) -> Rect {
        let (tx, ty) = (self.term_x(), self.term_y());
        let (w, h) = (self.adjusted.width() as i32, self.adjusted.height() as i32);
        let p = self.padding;
        Rect::from_coords(
            tx - 1 + p.left,
            ty - 1 + p.top,
            tx - 2 + w - p.right,
            ty - 2 + h - p.bottom,
        )
    }

    /// Size of the window buffer, including the shadow.
    pub(crate) fn buffer_size(&self) -> Expanse {
        self.adjusted.size().grow(self.shadow.w, self.shadow.h)
    }
}
