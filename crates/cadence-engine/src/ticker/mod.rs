//! Frame-rate-normalizing ticker.
//!
//! Turns the host's visual-frame callbacks into logical ticks at a cadence
//! bounded by `TickerConfig::max_fps` / `TickerConfig::min_fps`.

mod config;
mod pump;


pub use config::{TickInfo, TickerConfig};
pub use pump::{Ticker, WeakTicker};
