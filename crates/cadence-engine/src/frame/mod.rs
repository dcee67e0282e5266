//! Visual-frame scheduling.
//!
//! A host (window runtime, browser-like shell, simulator) decides when the next
//! repaint happens. Code that wants to run once per repaint registers a one-shot
//! callback through `FrameScheduler` and re-registers from inside it.
//!
//! `FrameQueue` holds the bookkeeping every host needs; `ManualFrameScheduler`
//! is a host driven by virtual time.

mod manual;
mod queue;
mod scheduler;

pub use manual::ManualFrameScheduler;
pub use queue::FrameQueue;
pub use scheduler::{FrameCallback, FrameHandle, FrameScheduler};
