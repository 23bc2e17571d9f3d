use unicode_width::UnicodeWidthStr;

use crate::{
    core::{context::Context, id::WidgetId, world::Core},
    error::Result,
    geom::{Padding, Point, Rect},
    widget::Widget,
};

/// A bordered container with an optional title. Children are laid out
/// inside the border through a one-cell padding.
#[derive(Debug, Default)]
pub struct Panel {
    /// Title drawn into the top edge.
    title: Option<String>,
}

impl Panel {
    /// An untitled panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add the panel to `parent` as a plain child, with padding that keeps
    /// children off the border.
    pub fn install(self, core: &mut Core, parent: WidgetId) -> Result<WidgetId> {
        let id = core.add_child(parent, self)?;
        core.set_padding(id, Padding::uniform(1), false)?;
        Ok(id)
    }

    /// The title as let into a `w`-wide top edge, bracketed while the panel
    /// has focus. `None` if there's no title or it doesn't fit between the
    /// corners with a cell to spare on each side.
    fn label(&self, w: usize, focused: bool) -> Option<String> {
        let title = self.title.as_ref()?;
        let label = if focused {
            format!("[{title}]")
        } else {
            format!(" {title} ")
        };
        (label.width() + 2 <= w.saturating_sub(2)).then_some(label)
    }
}

impl Widget for Panel {
    fn draw(&mut self, ctx: &mut Context) -> Result<()> {
        let size = ctx.size()?;
        let style = ctx.style()?;
        ctx.clear(style)?;
        if size.w < 2 || size.h < 2 {
            return Ok(());
        }
        ctx.draw_border(Rect::new(1, 1, size.w, size.h))?;
        if let Some(label) = self.label(size.w as usize, ctx.has_focus()) {
            ctx.print(Point::new(3, 1), &label, style)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_fits_or_is_dropped() {
        let p = Panel::new().with_title("ab");
        assert_eq!(p.label(8, false).as_deref(), Some(" ab "));
        assert_eq!(p.label(8, true).as_deref(), Some("[ab]"));
        assert_eq!(p.label(7, false), None);
        assert_eq!(Panel::new().label(20, false), None);
    }
}
