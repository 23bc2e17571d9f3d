use std::{error, fmt, result};

/// Geometry errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A geometric constraint could not be satisfied.
    Geometry(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geometry(s) => write!(f, "{s}"),
        }
    }
}

impl error::Error for Error {}

/// Result type for geometry operations.
pub type Result<T> = result::Result<T, Error>;
