//! Thicket: the core of a character-cell widget toolkit.
//!
//! A [`Core`] owns a tree of widgets in an arena. It lays them out against
//! the terminal, resolves which buffer each one draws into, batches drawing,
//! and routes focus, keys and mouse input between them.
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Rect, Point, Expanse, Padding, etc.)
//! - [`widget`] - The trait widgets implement
//! - [`widgets`] - Stock widgets

#![warn(missing_docs)]

// Internal core module - re-export specific items below
mod core;

pub use thicket_geom as geom;
pub mod prelude;
pub mod widget;
pub mod widgets;

pub use core::{
    BufferId, Context, Core, Flags, FocusManager, Kind, PrintArea, WidgetId, accel, border,
    callback, dump, error, event, logging, options, print_area, render, style, terminal, testing,
    text, tree,
};
pub use widget::Widget;
