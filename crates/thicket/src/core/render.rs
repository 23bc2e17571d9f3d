//! The compositor interface the core draws through.

use std::fmt::Debug;

use crate::{
    core::id::{BufferId, WidgetId},
    error::Result,
    geom::{Expanse, Point},
    style::Style,
};

/// The character-cell compositor. It owns every buffer; the core only decides
/// which buffer a widget targets and what is printed into it.
///
/// All positions are 0-based buffer coordinates. Output that falls outside a
/// buffer is clipped silently, so callers may print during transient size
/// mismatches without checking bounds.
pub trait Renderer: Debug {
    /// Allocate a new buffer of the given size.
    fn allocate_buffer(&mut self, size: Expanse) -> Result<BufferId>;

    /// Resize a buffer. Content that still fits is kept.
    fn resize_buffer(&mut self, buffer: BufferId, size: Expanse) -> Result<()>;

    /// Release a buffer that is no longer needed.
    fn release_buffer(&mut self, buffer: BufferId);

    /// Fill a buffer with blanks in the given style.
    fn clear(&mut self, buffer: BufferId, style: Style) -> Result<()>;

    /// Print text starting at a position.
    fn print(&mut self, buffer: BufferId, at: Point, text: &str, style: Style) -> Result<()>;

    /// Place the input cursor within a buffer.
    fn set_cursor(&mut self, buffer: BufferId, at: Point, visible: bool) -> Result<()>;

    /// Tell the compositor where a window buffer sits on the terminal, and
    /// whether it should be composited at all.
    fn place_buffer(&mut self, _buffer: BufferId, _origin: Point, _visible: bool) -> Result<()> {
        Ok(())
    }

    /// Begin a batch of updates. Nothing is written to the terminal until the
    /// matching `finish_update`.
    fn start_update(&mut self);

    /// End a batch of updates.
    fn finish_update(&mut self) -> Result<()>;

    /// Write pending output to the terminal.
    fn flush(&mut self) -> Result<()>;

    /// Register a widget to be consulted before a buffer is composited.
    fn add_preprocessing_handler(&mut self, buffer: BufferId, owner: WidgetId);

    /// Remove all preprocessing handlers registered by a widget.
    fn del_preprocessing_handler(&mut self, buffer: BufferId, owner: WidgetId);
}
