use crate::frame::{FrameCallback, FrameHandle, FrameQueue, FrameScheduler};

/// Frame host backed by window redraws.
///
/// Registering a callback makes the runtime request a redraw; the callback
/// fires when that redraw is delivered. With nothing registered the runtime
/// stops requesting redraws and the event loop idles.
#[derive(Debug, Default)]
pub struct RedrawScheduler {
    queue: FrameQueue,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a redraw should be requested.
    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Fires the callbacks due on this redraw.
    pub(crate) fn run_pending(&self) -> usize {
        self.queue.run_pending()
    }
}

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        self.queue.push(callback)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.queue.cancel(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::ticker::{Ticker, TickerConfig};
    use crate::time::ManualClock;

    #[test]
    fn running_ticker_keeps_redraws_coming() {
        let frames = Rc::new(RedrawScheduler::new());
        let clock = Rc::new(ManualClock::new());
        let ticker = Ticker::new(TickerConfig::default(), frames.clone(), clock.clone());
        assert!(frames.has_pending());

        clock.advance(std::time::Duration::from_millis(16));
        assert_eq!(frames.run_pending(), 1);
        assert_eq!(ticker.current_tick(), 1);
        assert!(frames.has_pending());

        ticker.pause();
        assert!(!frames.has_pending());
    }
}
