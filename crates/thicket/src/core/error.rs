use std::{io, result::Result as StdResult};

use thiserror::Error;

use crate::{core::id::WidgetId, geom};

/// Result type for thicket operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
///
/// Vetoed events are not errors. A handler that declines an action returns
/// [`Outcome::Ignored`](crate::event::Outcome::Ignored) instead.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    #[error("structure: {0}")]
    /// The widget tree was used in a way that breaks its invariants, such as
    /// constructing a second root. There is no recovery from this.
    Structure(String),
    #[error("widget not found: {0:?}")]
    /// The widget id does not refer to a live widget.
    NotFound(WidgetId),
    #[error("widget {0:?} re-entered its own handler")]
    /// A widget's handler was invoked while it was already running.
    Reentrant(WidgetId),
    #[error("allocation: {0}")]
    /// The renderer could not provide a buffer.
    Allocation(String),
    #[error("render: {0}")]
    /// Rendering failure.
    Render(String),
    #[error("terminal: {0}")]
    /// Terminal capability or mode failure.
    Terminal(String),
    #[error("geometry: {0}")]
    /// Geometry failure.
    Geometry(String),
    #[error("config: {0}")]
    /// Configuration could not be parsed.
    Config(String),
    #[error("internal: {0}")]
    /// Internal error.
    Internal(String),
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Terminal(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<geom::Error> for Error {
    fn from(e: geom::Error) -> Self {
        Self::Geometry(e.to_string())
    }
}
