//! Application options, loadable from JSON.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::Result, geom::Padding, style::ThemeChoice};

/// Root padding as it appears in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddingOptions {
    /// Rows reserved at the top.
    pub top: i32,
    /// Columns reserved at the left.
    pub left: i32,
    /// Rows reserved at the bottom.
    pub bottom: i32,
    /// Columns reserved at the right.
    pub right: i32,
}

impl From<PaddingOptions> for Padding {
    fn from(p: PaddingOptions) -> Self {
        Self::new(p.top, p.left, p.bottom, p.right)
    }
}

/// Options applied once when the root is constructed. Capability overrides
/// take precedence over what the terminal reports.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Padding around the desktop's client area.
    pub root_padding: PaddingOptions,
    /// Color table selection.
    pub theme: ThemeChoice,
    /// Force monochrome on or off.
    pub monochrome: Option<bool>,
    /// Force whether the cursor can be hidden.
    pub cursor_hideable: Option<bool>,
    /// Force the graphical font on or off.
    pub new_font: Option<bool>,
}

impl Options {
    /// Parse options from a JSON string. Missing fields take defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        Self::from_json(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn partial_json() -> Result<()> {
        let o = Options::from_json(r#"{"root_padding": {"top": 1}, "theme": "eight"}"#)?;
        assert_eq!(Padding::from(o.root_padding), Padding::new(1, 0, 0, 0));
        assert_eq!(o.theme, ThemeChoice::Eight);
        assert_eq!(o.monochrome, None);
        assert_eq!(Options::from_json("{}")?, Options::default());
        Ok(())
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(
            Options::from_json(r#"{"theme": "plaid"}"#),
            Err(Error::Config(_))
        ));
    }
}
