/// Grid matching helpers.
pub mod buf;
/// In-memory renderer.
pub mod grid;
/// Harness for driving a tree in tests.
pub mod harness;
/// Fake terminal.
pub mod term;

pub use harness::{Harness, HarnessBuilder};
