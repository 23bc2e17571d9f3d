//! Keyboard input primitives.
use std::ops::Add;

use crossterm::event as cevent;

/// Modifier key state.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Mods {
    /// Shift is active.
    pub shift: bool,
    /// Control is active.
    pub ctrl: bool,
    /// Alt is active.
    pub alt: bool,
}

impl Add<KeyCode> for Mods {
    type Output = Key;

    fn add(self, key: KeyCode) -> Self::Output {
        Key { mods: self, key }
    }
}

impl Add<char> for Mods {
    type Output = Key;

    fn add(self, other: char) -> Self::Output {
        Key {
            mods: self,
            key: other.into(),
        }
    }
}

/// No modifiers pressed.
#[allow(non_upper_case_globals)]
pub const Empty: Mods = Mods {
    shift: false,
    ctrl: false,
    alt: false,
};

/// Control-only modifier state.
#[allow(non_upper_case_globals)]
pub const Ctrl: Mods = Mods {
    shift: false,
    ctrl: true,
    alt: false,
};

/// Alt-only modifier state.
#[allow(non_upper_case_globals)]
pub const Alt: Mods = Mods {
    shift: false,
    ctrl: false,
    alt: true,
};

/// Key codes the core distinguishes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Function key.
    F(u8),
    /// Tab.
    Tab,
    /// Shift-tab.
    BackTab,
    /// Enter.
    Enter,
    /// Escape.
    Esc,
    /// Backspace.
    Backspace,
    /// Delete.
    Delete,
    /// Insert.
    Insert,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Any key we don't model.
    Null,
}

impl From<char> for KeyCode {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

/// A key press with modifiers.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Key {
    /// Modifier state.
    pub mods: Mods,
    /// The key itself.
    pub key: KeyCode,
}

impl Key {
    /// Is this the forward tab-order key?
    pub fn is_tab(&self) -> bool {
        self.key == KeyCode::Tab && !self.mods.shift
    }

    /// Is this the backward tab-order key?
    pub fn is_back_tab(&self) -> bool {
        self.key == KeyCode::BackTab || (self.key == KeyCode::Tab && self.mods.shift)
    }

    /// Does this arrow key request the next widget?
    pub fn is_forward_arrow(&self) -> bool {
        self.mods == Empty && matches!(self.key, KeyCode::Right | KeyCode::Down)
    }

    /// Does this arrow key request the previous widget?
    pub fn is_backward_arrow(&self) -> bool {
        self.mods == Empty && matches!(self.key, KeyCode::Left | KeyCode::Up)
    }
}

impl From<KeyCode> for Key {
    fn from(key: KeyCode) -> Self {
        Self { mods: Empty, key }
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Self {
            mods: Empty,
            key: KeyCode::Char(c),
        }
    }
}

impl From<cevent::KeyEvent> for Key {
    fn from(k: cevent::KeyEvent) -> Self {
        let mods = Mods {
            shift: k.modifiers.contains(cevent::KeyModifiers::SHIFT),
            ctrl: k.modifiers.contains(cevent::KeyModifiers::CONTROL),
            alt: k.modifiers.contains(cevent::KeyModifiers::ALT),
        };
        let key = match k.code {
            cevent::KeyCode::Char(c) => KeyCode::Char(c),
            cevent::KeyCode::F(n) => KeyCode::F(n),
            cevent::KeyCode::Tab => KeyCode::Tab,
            cevent::KeyCode::BackTab => KeyCode::BackTab,
            cevent::KeyCode::Enter => KeyCode::Enter,
            cevent::KeyCode::Esc => KeyCode::Esc,
            cevent::KeyCode::Backspace => KeyCode::Backspace,
            cevent::KeyCode::Delete => KeyCode::Delete,
            cevent::KeyCode::Insert => KeyCode::Insert,
            cevent::KeyCode::Left => KeyCode::Left,
            cevent::KeyCode::Right => KeyCode::Right,
            cevent::KeyCode::Up => KeyCode::Up,
            cevent::KeyCode::Down => KeyCode::Down,
            cevent::KeyCode::Home => KeyCode::Home,
            cevent::KeyCode::End => KeyCode::End,
            cevent::KeyCode::PageUp => KeyCode::PageUp,
            cevent::KeyCode::PageDown => KeyCode::PageDown,
            _ => KeyCode::Null,
        };
        Self { mods, key }
    }
}
