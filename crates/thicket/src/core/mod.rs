#![allow(clippy::new_without_default)]
//! The widget tree and the machinery that runs it.

/// Accelerator tables.
pub mod accel;
/// Borders and shadows.
pub mod border;
/// Per-widget callbacks.
pub mod callback;
/// The context handed to widget hooks.
pub mod context;
/// Event routing.
mod dispatch;
/// Show, hide and redraw.
mod draw;
/// Debug dump utilities.
pub mod dump;
/// Core error types.
pub mod error;
/// Input and notification events.
pub mod event;
/// Focus management.
pub mod focus;
/// Geometry setters and getters.
mod geometry;
/// Widget and buffer ids.
pub mod id;
/// Space adjustment.
mod layout;
/// Tracing setup.
pub mod logging;
/// Node data.
pub mod node;
/// Configuration.
pub mod options;
/// Print area resolution.
pub mod print_area;
/// Compositor interface.
pub mod render;
/// Styling and color helpers.
pub mod style;
/// Terminal capabilities.
pub mod terminal;
/// Testing utilities.
pub mod testing;
/// Hotkey markup.
pub mod text;
/// Tree traversal.
pub mod tree;
/// Window stacking.
mod window;
/// The widget arena.
pub mod world;

pub use context::Context;
pub use focus::FocusManager;
pub use id::{BufferId, WidgetId};
pub use node::{Flags, Kind};
pub use print_area::PrintArea;
pub use world::Core;
