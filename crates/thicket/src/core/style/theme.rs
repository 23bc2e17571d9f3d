use serde::{Deserialize, Serialize};

use super::Color;

/// Which color table to use.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeChoice {
    /// Pick from the terminal's color depth.
    #[default]
    Auto,
    /// The eight-color table.
    Eight,
    /// The sixteen-color table.
    Sixteen,
}

/// Semantic colors shared by all widgets. Selected once when the root is
/// constructed and read-only afterwards.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct WidgetColors {
    /// Desktop foreground.
    pub term_fg: Color,
    /// Desktop background.
    pub term_bg: Color,
    /// Dialog foreground.
    pub dialog_fg: Color,
    /// Dialog background.
    pub dialog_bg: Color,
    /// Shadow foreground.
    pub shadow_fg: Color,
    /// Shadow background.
    pub shadow_bg: Color,
    /// Progress bar foreground.
    pub progressbar_fg: Color,
    /// Progress bar background.
    pub progressbar_bg: Color,
}

impl WidgetColors {
    /// Colors for terminals limited to eight colors.
    pub fn eight() -> Self {
        Self {
            term_fg: Color::Black,
            term_bg: Color::Blue,
            dialog_fg: Color::Black,
            dialog_bg: Color::Cyan,
            shadow_fg: Color::Black,
            shadow_bg: Color::LightGray,
            progressbar_fg: Color::Blue,
            progressbar_bg: Color::LightGray,
        }
    }

    /// Colors for terminals with at least sixteen colors.
    pub fn sixteen() -> Self {
        Self {
            term_fg: Color::Black,
            term_bg: Color::LightBlue,
            dialog_fg: Color::Black,
            dialog_bg: Color::White,
            shadow_fg: Color::Black,
            shadow_bg: Color::LightGray,
            progressbar_fg: Color::DarkGray,
            progressbar_bg: Color::LightBlue,
        }
    }

    /// Select a table for the given color depth.
    pub fn for_depth(choice: ThemeChoice, max_colors: u32) -> Self {
        match choice {
            ThemeChoice::Eight => Self::eight(),
            ThemeChoice::Sixteen => Self::sixteen(),
            ThemeChoice::Auto if max_colors < 16 => Self::eight(),
            ThemeChoice::Auto => Self::sixteen(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_selection() {
        assert_eq!(
            WidgetColors::for_depth(ThemeChoice::Auto, 8),
            WidgetColors::eight()
        );
        assert_eq!(
            WidgetColors::for_depth(ThemeChoice::Auto, 256),
            WidgetColors::sixteen()
        );
        assert_eq!(
            WidgetColors::for_depth(ThemeChoice::Eight, 256),
            WidgetColors::eight()
        );
        assert!(!WidgetColors::eight().term_bg.is_bright());
    }
}
