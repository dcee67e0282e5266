use std::rc::Rc;
use std::time::Duration;

use winit::window::{Window, WindowId};

use crate::ticker::{Ticker, TickerConfig};
use crate::time::SystemClock;
use crate::window::RedrawScheduler;

/// Window handle and metadata.
pub struct WindowCtx<'a> {
    pub id:     WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }
}

/// Context passed to `core::App::on_start`.
pub struct StartCtx<'a> {
    pub window: WindowCtx<'a>,
    /// Frame host backed by this window's redraws.
    pub frames: &'a Rc<RedrawScheduler>,
    pub clock:  &'a Rc<SystemClock>,
}

impl<'a> StartCtx<'a> {
    /// Creates a ticker paced by this window.
    pub fn ticker(&self, config: TickerConfig) -> Ticker {
        window_ticker(config, self.frames, self.clock)
    }
}

fn window_ticker(
    config: TickerConfig,
    frames: &Rc<RedrawScheduler>,
    clock: &Rc<SystemClock>,
) -> Ticker {
    Ticker::new(config, frames.clone(), clock.clone())
}

/// Per-frame context passed to `core::App::on_frame`.
pub struct FrameCtx<'a> {
    pub window:      WindowCtx<'a>,
    /// Visual frames presented so far, this one included.
    pub frame_index: u64,
    /// Runtime clock reading taken for this frame.
    pub now:         Duration,
    /// Frame callbacks fired for this frame.
    pub callbacks:   usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_ticker_is_paced_by_redraws() {
        let frames = Rc::new(RedrawScheduler::new());
        let clock = Rc::new(SystemClock::new());
        let ticker = window_ticker(TickerConfig::default(), &frames, &clock);
        assert!(frames.has_pending());

        assert_eq!(frames.run_pending(), 1);
        assert_eq!(ticker.current_tick(), 1);
        assert!(frames.has_pending());

        ticker.dispose();
        assert!(!frames.has_pending());
    }
}
