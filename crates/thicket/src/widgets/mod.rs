//! Stock widgets built on the core.

/// The desktop root widget.
mod desktop;
/// Box-bordered container.
mod panel;
/// Percentage progress bar.
mod progressbar;

pub use desktop::Desktop;
pub use panel::Panel;
pub use progressbar::ProgressBar;
