use crossterm::style;
use serde::{Deserialize, Serialize};

/// The sixteen classic terminal colors plus the terminal default.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    /// Whatever the terminal uses by default.
    #[default]
    Default,
    /// Black.
    Black,
    /// Blue.
    Blue,
    /// Green.
    Green,
    /// Cyan.
    Cyan,
    /// Red.
    Red,
    /// Magenta.
    Magenta,
    /// Brown, rendered as dark yellow on most terminals.
    Brown,
    /// Light gray.
    LightGray,
    /// Dark gray.
    DarkGray,
    /// Light blue.
    LightBlue,
    /// Light green.
    LightGreen,
    /// Light cyan.
    LightCyan,
    /// Light red.
    LightRed,
    /// Light magenta.
    LightMagenta,
    /// Yellow.
    Yellow,
    /// White.
    White,
}

impl Color {
    /// Is this one of the eight bright colors that need a 16-color terminal?
    pub fn is_bright(self) -> bool {
        matches!(
            self,
            Self::DarkGray
                | Self::LightBlue
                | Self::LightGreen
                | Self::LightCyan
                | Self::LightRed
                | Self::LightMagenta
                | Self::Yellow
                | Self::White
        )
    }
}

impl From<Color> for style::Color {
    fn from(c: Color) -> Self {
        match c {
            Color::Default => Self::Reset,
            Color::Black => Self::Black,
            Color::Blue => Self::DarkBlue,
            Color::Green => Self::DarkGreen,
            Color::Cyan => Self::DarkCyan,
            Color::Red => Self::DarkRed,
            Color::Magenta => Self::DarkMagenta,
            Color::Brown => Self::DarkYellow,
            Color::LightGray => Self::Grey,
            Color::DarkGray => Self::DarkGrey,
            Color::LightBlue => Self::Blue,
            Color::LightGreen => Self::Green,
            Color::LightCyan => Self::Cyan,
            Color::LightRed => Self::Red,
            Color::LightMagenta => Self::Magenta,
            Color::Yellow => Self::Yellow,
            Color::White => Self::White,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossterm_mapping() {
        assert_eq!(style::Color::from(Color::Default), style::Color::Reset);
        assert_eq!(style::Color::from(Color::Brown), style::Color::DarkYellow);
        assert_eq!(style::Color::from(Color::LightBlue), style::Color::Blue);
        assert!(Color::White.is_bright());
        assert!(!Color::LightGray.is_bright());
    }
}
