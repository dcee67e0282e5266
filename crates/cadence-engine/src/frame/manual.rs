use std::rc::Rc;
use std::time::Duration;

use crate::time::ManualClock;

use super::queue::FrameQueue;
use super::scheduler::{FrameCallback, FrameHandle, FrameScheduler};

/// Frame host driven by virtual time.
///
/// Each `advance` moves the shared `ManualClock` and then fires one visual
/// frame. Used by the headless studio mode and by tests.
#[derive(Debug, Default)]
pub struct ManualFrameScheduler {
    queue: FrameQueue,
    clock: Rc<ManualClock>,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: Rc<ManualClock>) -> Self {
        Self {
            queue: FrameQueue::new(),
            clock,
        }
    }

    /// The clock this scheduler advances.
    pub fn clock(&self) -> Rc<ManualClock> {
        Rc::clone(&self.clock)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Advances time by `dt`, then fires one frame. Returns callbacks run.
    pub fn advance(&self, dt: Duration) -> usize {
        self.clock.advance(dt);
        self.queue.run_pending()
    }

    /// Fires one frame without moving time.
    pub fn fire(&self) -> usize {
        self.queue.run_pending()
    }

    /// Fires `frames` frames spaced `interval` apart. Returns callbacks run.
    pub fn run_frames(&self, frames: usize, interval: Duration) -> usize {
        (0..frames).map(|_| self.advance(interval)).sum()
    }

    /// Frame interval of a display refreshing at `hz`.
    pub fn refresh_interval(hz: f64) -> Duration {
        Duration::from_secs_f64(1.0 / hz)
    }
}

impl FrameScheduler for ManualFrameScheduler {
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
    use crate::time::Clock;
    use std::cell::Cell;

    #[test]
    fn advance_moves_time_before_firing() {
        let host = Rc::new(ManualFrameScheduler::new());
        let seen = Rc::new(Cell::new(Duration::ZERO));

        let clock = host.clock();
        let seen2 = Rc::clone(&seen);
        host.request_frame(Box::new(move || seen2.set(clock.now())));

        assert_eq!(host.advance(Duration::from_millis(16)), 1);
        assert_eq!(seen.get(), Duration::from_millis(16));
    }

    #[test]
    fn run_frames_counts_callbacks() {
        let host = ManualFrameScheduler::new();
        host.request_frame(Box::new(|| {}));

        assert_eq!(host.run_frames(3, Duration::from_millis(10)), 1);
        assert_eq!(host.clock().now(), Duration::from_millis(30));
    }

    #[test]
    fn cancel_through_the_trait() {
        let host = ManualFrameScheduler::new();
        let handle = host.request_frame(Box::new(|| {}));
        host.cancel_frame(handle);
        host.cancel_frame(handle);

        assert_eq!(host.pending(), 0);
        assert_eq!(host.fire(), 0);
    }
}
