//! Events delivered to widgets.

/// Keyboard input.
pub mod key;
/// Mouse input.
pub mod mouse;

pub use key::Key;
pub use mouse::MouseEvent;

/// Why focus is moving.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum FocusKind {
    /// Forward in tab order.
    Next,
    /// Backward in tab order.
    Previous,
    /// Focus was set explicitly.
    Definite,
}

/// An event delivered to a widget's `on_event` hook.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Event {
    /// A key was pressed.
    KeyPress(Key),
    /// A key went down.
    KeyDown(Key),
    /// A key was released.
    KeyUp(Key),
    /// Mouse input, positioned in terminal coordinates.
    Mouse(MouseEvent),
    /// The widget is about to lose focus.
    FocusOut(FocusKind),
    /// The widget received focus.
    FocusIn(FocusKind),
    /// A child is about to lose focus. Accepting vetoes the transfer.
    ChildFocusOut(FocusKind),
    /// A child received focus.
    ChildFocusIn(FocusKind),
    /// An accelerator bound to this widget fired.
    Accelerator(Key),
    /// The terminal was resized.
    Resize,
    /// The widget was shown.
    Show,
    /// The widget was hidden.
    Hide,
    /// The widget is asked to close. Ignoring it vetoes the close.
    Close,
    /// A timer fired.
    Timer(u32),
}

impl Event {
    /// The outcome a widget gives when it doesn't handle the event.
    ///
    /// Focus notifications are accepted unless a handler declines them, with
    /// the exception of `ChildFocusOut`, which a parent must opt in to veto.
    pub fn default_outcome(&self) -> Outcome {
        match self {
            Self::FocusIn(_) | Self::FocusOut(_) | Self::ChildFocusIn(_) | Self::Close => {
                Outcome::Accepted
            }
            _ => Outcome::Ignored,
        }
    }
}

/// The result of offering an event to a widget.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Outcome {
    /// The widget consumed the event.
    Accepted,
    /// The widget declined the event.
    Ignored,
}

impl Outcome {
    /// Was the event accepted?
    pub fn is_accepted(self) -> bool {
        self == Self::Accepted
    }
}

impl From<bool> for Outcome {
    fn from(b: bool) -> Self {
        if b { Self::Accepted } else { Self::Ignored }
    }
}
