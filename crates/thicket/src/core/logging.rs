//! Diagnostic logging setup.
//!
//! A full-screen application owns its terminal, so log output has to go
//! somewhere else: a file, or an in-memory writer in tests.

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use crate::error::{Error, Result};

/// Install a global fmt subscriber writing to `writer` at `level` and below.
/// Fails if a global subscriber is already installed.
pub fn init<W>(level: Level, writer: W) -> Result<()>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::Internal(format!("logging: {e}")))
}
