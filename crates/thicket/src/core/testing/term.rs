use std::sync::{Arc, Mutex};

use crate::{
    core::terminal::{Encoding, Terminal},
    error::{Error, Result},
    geom::Expanse,
};

/// State shared between a [`FakeTerminal`] and the test that created it.
#[derive(Debug, Clone, Copy)]
pub struct TermState {
    /// The size reported by `detect_size`.
    pub size: Expanse,
    /// Calls to `init_screen`.
    pub inits: usize,
}

/// A [`Terminal`] with settable capabilities.
#[derive(Debug, Clone)]
pub struct FakeTerminal {
    /// Shared size and counters.
    state: Arc<Mutex<TermState>>,
    /// Reported monochrome flag.
    pub monochrome: bool,
    /// Reported color count.
    pub max_colors: u32,
    /// Reported cursor hideability.
    pub cursor_hideable: bool,
    /// Reported encoding.
    pub encoding: Encoding,
    /// Reported graphical font.
    pub new_font: bool,
}

impl FakeTerminal {
    /// A 16-color UTF-8 terminal of the given size, and a handle to its
    /// state.
    pub fn create(size: Expanse) -> (Arc<Mutex<TermState>>, Self) {
        let state = Arc::new(Mutex::new(TermState { size, inits: 0 }));
        let term = Self {
            state: state.clone(),
            monochrome: false,
            max_colors: 16,
            cursor_hideable: true,
            encoding: Encoding::Utf8,
            new_font: false,
        };
        (state, term)
    }
}

impl Terminal for FakeTerminal {
    fn detect_size(&mut self) -> Result<Expanse> {
        self.state
            .lock()
            .map(|s| s.size)
            .map_err(|_| Error::Terminal("terminal state poisoned".into()))
    }

    fn is_monochrome(&self) -> bool {
        self.monochrome
    }

    fn max_colors(&self) -> u32 {
        self.max_colors
    }

    fn cursor_is_hideable(&self) -> bool {
        self.cursor_hideable
    }

    fn encoding(&self) -> Encoding {
        self.encoding
    }

    fn is_new_font(&self) -> bool {
        self.new_font
    }

    fn init_screen(&mut self) -> Result<()> {
        let mut s = self
            .state
            .lock()
            .map_err(|_| Error::Terminal("terminal state poisoned".into()))?;
        s.inits += 1;
        Ok(())
    }
}
