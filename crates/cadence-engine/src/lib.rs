//! Cadence engine crate.
//!
//! Decouples update rate from display refresh rate: a `ticker::Ticker` listens
//! to visual-frame notifications from a host (`frame::FrameScheduler`) and
//! re-emits them as logical ticks bounded by optional min/max tick rates.

pub mod frame;
pub mod signal;
pub mod ticker;
pub mod time;

pub mod core;
pub mod logging;
pub mod window;
