//! The widget trait.

use std::any::{Any, type_name};

use convert_case::{Case, Casing};

use crate::{
    core::context::Context,
    error::Result,
    event::{Event, Outcome},
};

/// Widgets are the behavior attached to nodes in the Core arena. Geometry,
/// flags and tree structure live on the node; a widget supplies drawing and
/// event handling.
pub trait Widget: Any {
    /// Draw the widget into its print area.
    fn draw(&mut self, _ctx: &mut Context) -> Result<()> {
        Ok(())
    }

    /// Handle an event. Anything not handled should be passed to
    /// [`Context::default_event`].
    fn on_event(&mut self, event: &Event, ctx: &mut Context) -> Result<Outcome> {
        ctx.default_event(event)
    }

    /// Name used in dumps and logs.
    fn name(&self) -> String {
        let name = type_name::<Self>();
        let base = name.split('<').next().unwrap_or(name);
        let short = base.rsplit("::").next().unwrap_or(base);
        short.to_case(Case::Snake)
    }
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}
