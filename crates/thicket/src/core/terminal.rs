//! Terminal capability detection.

use std::{
    env,
    fmt::Debug,
    io::{self, Stderr},
};

use crossterm::{ExecutableCommand, cursor as ccursor, terminal};
use tracing::warn;

use crate::{core::options::Options, error::Result, geom::Expanse};

/// The character encoding the terminal can display.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Encoding {
    /// Full Unicode output.
    #[default]
    Utf8,
    /// VT100 line drawing only.
    Vt100,
    /// Plain ASCII.
    Ascii,
}

impl Encoding {
    /// Can block and half-block glyphs be displayed?
    pub fn has_block_glyphs(self) -> bool {
        self == Self::Utf8
    }
}

/// Terminal capability service consumed by the core.
pub trait Terminal: Debug {
    /// Current terminal size in cells.
    fn detect_size(&mut self) -> Result<Expanse>;

    /// Does the terminal only show one color?
    fn is_monochrome(&self) -> bool;

    /// The number of colors the terminal supports.
    fn max_colors(&self) -> u32;

    /// Can the hardware cursor be hidden?
    fn cursor_is_hideable(&self) -> bool;

    /// Output encoding.
    fn encoding(&self) -> Encoding {
        Encoding::Utf8
    }

    /// Does the terminal use the graphical "new font"?
    fn is_new_font(&self) -> bool {
        false
    }

    /// Put the terminal into full-screen mode. Called once, before the
    /// first widget is shown.
    fn init_screen(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Terminal capabilities, detected once when the root is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Only one color.
    pub monochrome: bool,
    /// Supported colors.
    pub max_colors: u32,
    /// Output encoding.
    pub encoding: Encoding,
    /// Graphical font in use.
    pub new_font: bool,
    /// The hardware cursor can be hidden.
    pub cursor_hideable: bool,
}

impl Capabilities {
    /// Query the terminal, letting options override what it reports.
    pub fn detect(term: &dyn Terminal, options: &Options) -> Self {
        Self {
            monochrome: options.monochrome.unwrap_or_else(|| term.is_monochrome()),
            max_colors: term.max_colors(),
            encoding: term.encoding(),
            new_font: options.new_font.unwrap_or_else(|| term.is_new_font()),
            cursor_hideable: options
                .cursor_hideable
                .unwrap_or_else(|| term.cursor_is_hideable()),
        }
    }
}

/// A [`Terminal`] backed by crossterm on stderr.
#[derive(Debug)]
pub struct CrosstermTerminal {
    /// Stderr handle used for control output.
    fp: Stderr,
    /// Has `init_screen` switched modes?
    active: bool,
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self {
            fp: io::stderr(),
            active: false,
        }
    }
}

impl CrosstermTerminal {
    /// Leave the alternate screen and restore the cursor.
    pub fn restore(&mut self) -> Result<()> {
        if self.active {
            self.fp.execute(terminal::LeaveAlternateScreen)?;
            self.fp.execute(ccursor::Show)?;
            terminal::disable_raw_mode()?;
            self.active = false;
        }
        Ok(())
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("failed to restore terminal: {e}");
        }
    }
}

impl Terminal for CrosstermTerminal {
    fn detect_size(&mut self) -> Result<Expanse> {
        let (w, h) = terminal::size()?;
        Ok(Expanse::new(u32::from(w), u32::from(h)))
    }

    fn is_monochrome(&self) -> bool {
        env::var_os("NO_COLOR").is_some()
    }

    fn max_colors(&self) -> u32 {
        colors_from_env(
            env::var("COLORTERM").ok().as_deref(),
            env::var("TERM").ok().as_deref(),
        )
    }

    fn cursor_is_hideable(&self) -> bool {
        true
    }

    fn encoding(&self) -> Encoding {
        match env::var("TERM").ok().as_deref() {
            Some("vt100" | "vt102") => Encoding::Vt100,
            Some("dumb") => Encoding::Ascii,
            _ => Encoding::Utf8,
        }
    }

    fn init_screen(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.fp.execute(terminal::EnterAlternateScreen)?;
        self.fp.execute(ccursor::Hide)?;
        self.active = true;
        Ok(())
    }
}

/// Guess the color depth from the usual environment variables.
fn colors_from_env(colorterm: Option<&str>, term: Option<&str>) -> u32 {
    if matches!(colorterm, Some("truecolor" | "24bit")) {
        return 1 << 24;
    }
    match term {
        Some(t) if t.contains("256color") => 256,
        Some(t) if t.contains("16color") => 16,
        Some("dumb") => 2,
        Some("linux") => 8,
        Some(_) => 16,
        None => 8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_depth() {
        assert_eq!(colors_from_env(Some("truecolor"), None), 1 << 24);
        assert_eq!(colors_from_env(None, Some("xterm-256color")), 256);
        assert_eq!(colors_from_env(None, Some("linux")), 8);
        assert_eq!(colors_from_env(None, Some("xterm")), 16);
        assert_eq!(colors_from_env(None, None), 8);
    }

    #[test]
    fn block_glyphs() {
        assert!(Encoding::Utf8.has_block_glyphs());
        assert!(!Encoding::Vt100.has_block_glyphs());
    }
}
