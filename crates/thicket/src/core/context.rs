//! The handle widgets receive in their hooks.

use crate::{
    core::{
        focus::FocusManager,
        id::WidgetId,
        node::Flags,
        terminal::Capabilities,
        world::Core,
    },
    error::Result,
    event::{Event, Outcome},
    geom::{Expanse, Point, Rect},
    style::{Style, WidgetColors},
};

/// Mutable access to the core, scoped to the widget whose hook is running.
pub struct Context<'a> {
    /// The core.
    core: &'a mut Core,
    /// The widget the hook belongs to.
    id: WidgetId,
}

impl<'a> Context<'a> {
    /// A context for widget `id`.
    pub fn new(core: &'a mut Core, id: WidgetId) -> Self {
        Self { core, id }
    }

    /// The widget this context belongs to.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The whole core, for operations on other widgets.
    pub fn core(&mut self) -> &mut Core {
        self.core
    }

    /// The widget's adjusted size.
    pub fn size(&self) -> Result<Expanse> {
        self.core.size(self.id)
    }

    /// The widget's adjusted rectangle.
    pub fn geometry(&self) -> Result<Rect> {
        self.core.geometry(self.id)
    }

    /// The widget's flags.
    pub fn flags(&self) -> Result<Flags> {
        self.core.flags(self.id)
    }

    /// Shared widget colors.
    pub fn colors(&self) -> &WidgetColors {
        self.core.colors()
    }

    /// Detected terminal capabilities.
    pub fn capabilities(&self) -> &Capabilities {
        self.core.capabilities()
    }

    /// The widget's default style.
    pub fn style(&self) -> Result<Style> {
        let (fg, bg) = self.core.widget_colors(self.id)?;
        Ok(Style::new(fg, bg))
    }

    /// Does the widget hold focus?
    pub fn has_focus(&self) -> bool {
        self.core.has_focus(self.id)
    }

    /// Print at a 1-based widget-relative position.
    pub fn print(&mut self, at: Point, text: &str, style: Style) -> Result<()> {
        self.core.print(self.id, at, text, style)
    }

    /// Fill the widget with blanks.
    pub fn clear(&mut self, style: Style) -> Result<()> {
        self.core.clear_widget(self.id, style)
    }

    /// Draw the widget's shadow.
    pub fn draw_shadow(&mut self) -> Result<()> {
        self.core.draw_shadow(self.id)
    }

    /// Blank the widget's shadow area.
    pub fn clear_shadow(&mut self) -> Result<()> {
        self.core.clear_shadow(self.id)
    }

    /// Draw a box border in widget-relative coordinates.
    pub fn draw_border(&mut self, rect: Rect) -> Result<()> {
        self.core.draw_border(self.id, rect)
    }

    /// Draw the flat border around the widget.
    pub fn draw_flat_border(&mut self) -> Result<()> {
        self.core.draw_flat_border(self.id)
    }

    /// Blank an area from the widget's top-left corner.
    pub fn hide_area(&mut self, size: Expanse) -> Result<()> {
        self.core.hide_area(self.id, size)
    }

    /// Place the input cursor.
    pub fn set_cursor_pos(&mut self, pos: Point) -> Result<bool> {
        self.core.set_cursor_pos(self.id, pos)
    }

    /// Write pending output to the terminal.
    pub fn flush(&mut self) -> Result<()> {
        self.core.renderer.flush()
    }

    /// Run the widget's callbacks for `signal`.
    pub fn emit(&mut self, signal: &str) -> Result<()> {
        self.core.emit_callback(self.id, signal)
    }

    /// Behavior for events a widget doesn't handle itself. A resize
    /// re-detects the terminal size and redraws the tree; everything else
    /// gets the event's default outcome.
    pub fn default_event(&mut self, event: &Event) -> Result<Outcome> {
        match event {
            Event::Resize => {
                let root = self.core.root();
                self.core.resize(root)?;
                self.core.redraw(root)?;
                Ok(Outcome::Accepted)
            }
            _ => Ok(event.default_outcome()),
        }
    }
}
