use std::sync::{Arc, Mutex, MutexGuard};

use super::{
    buf::BufTest,
    grid::{Grid, GridRenderer, GridState},
    term::{FakeTerminal, TermState},
};
use crate::{
    core::{
        id::{BufferId, WidgetId},
        options::Options,
        terminal::Encoding,
        world::Core,
    },
    error::{Error, Result},
    event::{Key, Outcome, mouse::MouseEvent},
    geom::Expanse,
    widget::Widget,
    widgets::Desktop,
};

/// A [`Core`] wired to an in-memory renderer and a fake terminal. Tests
/// build a tree on `core`, drive it with input, and inspect what was drawn.
pub struct Harness {
    /// The tree under test.
    pub core: Core,
    /// What the renderer has been told.
    pub render: Arc<Mutex<GridState>>,
    /// What the terminal reports.
    pub term: Arc<Mutex<TermState>>,
}

/// Fluent construction of a [`Harness`].
pub struct HarnessBuilder {
    /// Root widget.
    root: Box<dyn Widget>,
    /// Terminal size.
    size: Expanse,
    /// Options applied at construction.
    options: Options,
    /// Terminal capabilities to report. Its size is ignored.
    caps: FakeTerminal,
}

impl HarnessBuilder {
    /// An 80x24 terminal with a [`Desktop`] root.
    fn new() -> Self {
        let size = Expanse::new(80, 24);
        Self {
            root: Box::new(Desktop::new()),
            size,
            options: Options::default(),
            caps: FakeTerminal::create(size).1,
        }
    }

    /// Set the terminal size.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = Expanse::new(width, height);
        self
    }

    /// Use a different root widget.
    pub fn root(mut self, widget: impl Into<Box<dyn Widget>>) -> Self {
        self.root = widget.into();
        self
    }

    /// Construction options.
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Report this many colors.
    pub fn max_colors(mut self, n: u32) -> Self {
        self.caps.max_colors = n;
        self
    }

    /// Report a monochrome terminal.
    pub fn monochrome(mut self, on: bool) -> Self {
        self.caps.monochrome = on;
        self
    }

    /// Report this output encoding.
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.caps.encoding = encoding;
        self
    }

    /// Report whether the hardware cursor can be hidden.
    pub fn cursor_hideable(mut self, on: bool) -> Self {
        self.caps.cursor_hideable = on;
        self
    }

    /// Report the graphical font.
    pub fn new_font(mut self, on: bool) -> Self {
        self.caps.new_font = on;
        self
    }

    /// Build the harness.
    pub fn build(self) -> Result<Harness> {
        let (term_state, mut term) = FakeTerminal::create(self.size);
        term.monochrome = self.caps.monochrome;
        term.max_colors = self.caps.max_colors;
        term.cursor_hideable = self.caps.cursor_hideable;
        term.encoding = self.caps.encoding;
        term.new_font = self.caps.new_font;
        let (render, renderer) = GridRenderer::create();
        let core = Core::new(self.root, Box::new(term), Box::new(renderer), &self.options)?;
        Ok(Harness {
            core,
            render,
            term: term_state,
        })
    }
}

impl Harness {
    /// A fluent builder.
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder::new()
    }

    /// An 80x24 harness with a [`Desktop`] root.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// The root widget.
    pub fn root(&self) -> WidgetId {
        self.core.root()
    }

    /// Lock the renderer state.
    pub fn state(&self) -> Result<MutexGuard<'_, GridState>> {
        self.render
            .lock()
            .map_err(|_| Error::Internal("grid state poisoned".into()))
    }

    /// Change the size the terminal reports. Takes effect on the next
    /// resize.
    pub fn set_term_size(&mut self, width: u32, height: u32) -> Result<()> {
        self.term
            .lock()
            .map_err(|_| Error::Internal("terminal state poisoned".into()))?
            .size = Expanse::new(width, height);
        Ok(())
    }

    /// A copy of a buffer.
    pub fn grid(&self, buffer: BufferId) -> Result<Grid> {
        self.state()?
            .grid(buffer)
            .cloned()
            .ok_or_else(|| Error::Internal(format!("no buffer {buffer:?}")))
    }

    /// The desktop's rows.
    pub fn desktop_lines(&self) -> Result<Vec<String>> {
        Ok(self.state()?.lines(self.core.desktop()))
    }

    /// The rows of a window's buffer.
    pub fn window_lines(&self, window: WidgetId) -> Result<Vec<String>> {
        let buffer = self.core.window_buffer(window)?;
        Ok(self.state()?.lines(buffer))
    }

    /// Assert on a window's buffer with a [`BufTest`].
    pub fn assert_window(&self, window: WidgetId, expected: &[&str]) -> Result<()> {
        let grid = self.grid(self.core.window_buffer(window)?)?;
        BufTest::new(&grid).assert_matches(expected);
        Ok(())
    }

    /// Number of flushes so far.
    pub fn flushes(&self) -> Result<usize> {
        Ok(self.state()?.flushes)
    }

    /// Press a key.
    pub fn key(&mut self, key: impl Into<Key>) -> Result<Outcome> {
        self.core.handle_key(key.into())
    }

    /// Press a sequence of keys.
    pub fn keys<I, K>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        for k in keys {
            self.key(k)?;
        }
        Ok(())
    }

    /// Deliver mouse input.
    pub fn mouse(&mut self, event: MouseEvent) -> Result<Outcome> {
        self.core.handle_mouse(event)
    }
}
