use crate::{
    core::context::Context,
    error::Result,
    event::{Event, Key, Outcome},
    widget::Widget,
};

/// The widget at the base of every tree. It owns the desktop, re-lays out
/// the tree on terminal resize, and can request exit on a quit key.
#[derive(Debug, Default)]
pub struct Desktop {
    /// Key that requests exit, if any.
    quit_key: Option<Key>,
}

impl Desktop {
    /// A desktop with no quit key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request exit when `key` reaches the desktop unhandled.
    pub fn with_quit_key(mut self, key: impl Into<Key>) -> Self {
        self.quit_key = Some(key.into());
        self
    }
}

impl Widget for Desktop {
    fn on_event(&mut self, event: &Event, ctx: &mut Context) -> Result<Outcome> {
        match event {
            Event::KeyPress(k) if Some(*k) == self.quit_key => {
                ctx.core().quit(0);
                Ok(Outcome::Accepted)
            }
            _ => ctx.default_event(event),
        }
    }
}
