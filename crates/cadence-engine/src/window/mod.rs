//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and a single Window, and turns its redraws into
//! visual-frame notifications for `FrameScheduler` users.

mod redraw;
mod runtime;

pub use redraw::RedrawScheduler;
pub use runtime::{Runtime, RuntimeConfig};
