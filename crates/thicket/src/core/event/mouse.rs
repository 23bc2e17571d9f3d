use crossterm::event as cevent;

use crate::geom::Point;

/// Mouse button.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Button {
    /// Left button.
    Left,
    /// Middle button.
    Middle,
    /// Right button.
    Right,
    /// No button, for moves and wheel events.
    None,
}

/// What the mouse did.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Action {
    /// Button pressed.
    Down,
    /// Button released.
    Up,
    /// Button clicked twice in quick succession.
    DoubleClick,
    /// Pointer moved.
    Move,
    /// Wheel scrolled up.
    WheelUp,
    /// Wheel scrolled down.
    WheelDown,
}

/// A mouse event at a 1-based terminal position.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct MouseEvent {
    /// Action.
    pub action: Action,
    /// Button.
    pub button: Button,
    /// Terminal position, 1-based.
    pub pos: Point,
}

impl MouseEvent {
    /// Translate a crossterm mouse event. Returns `None` for events the core
    /// doesn't route, such as horizontal scrolling.
    pub fn from_crossterm(e: cevent::MouseEvent) -> Option<Self> {
        let button = |b| match b {
            cevent::MouseButton::Left => Button::Left,
            cevent::MouseButton::Middle => Button::Middle,
            cevent::MouseButton::Right => Button::Right,
        };
        let (action, button) = match e.kind {
            cevent::MouseEventKind::Down(b) => (Action::Down, button(b)),
            cevent::MouseEventKind::Up(b) => (Action::Up, button(b)),
            cevent::MouseEventKind::Drag(b) => (Action::Move, button(b)),
            cevent::MouseEventKind::Moved => (Action::Move, Button::None),
            cevent::MouseEventKind::ScrollUp => (Action::WheelUp, Button::None),
            cevent::MouseEventKind::ScrollDown => (Action::WheelDown, Button::None),
            _ => return None,
        };
        Some(Self {
            action,
            button,
            pos: Point::new(i32::from(e.column) + 1, i32::from(e.row) + 1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossterm_positions_are_one_based() {
        let e = cevent::MouseEvent {
            kind: cevent::MouseEventKind::Down(cevent::MouseButton::Left),
            column: 0,
            row: 4,
            modifiers: cevent::KeyModifiers::NONE,
        };
        let m = MouseEvent::from_crossterm(e);
        assert_eq!(
            m,
            Some(MouseEvent {
                action: Action::Down,
                button: Button::Left,
                pos: Point::new(1, 5),
            })
        );
    }
}
