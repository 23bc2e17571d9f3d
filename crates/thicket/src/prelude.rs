//! Convenience re-exports for common thicket types.

pub use crate::{
    Context, Core, FocusManager, Kind, WidgetId, Widget, error,
    event::{Event, FocusKind, Key, Outcome, mouse},
    geom::{Expanse, Padding, Point, Rect, SizeHints},
    style::{Color, Style},
};

/// Common result alias for thicket operations.
pub type Result<T> = error::Result<T>;
