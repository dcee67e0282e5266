//! Application contract for the window runtime.
//!
//! The runtime owns the platform loop; applications see only these contexts,
//! so no winit event-loop type leaks into user code.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, StartCtx, WindowCtx};
