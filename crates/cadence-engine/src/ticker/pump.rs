use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::frame::{FrameHandle, FrameScheduler};
use crate::signal::Signal;
use crate::time::Clock;

use super::config::{interval_ms, TickInfo, TickerConfig};

/// Re-dispatches visual frames as logical ticks.
///
/// Every visual frame the ticker measures the time since its last update and
/// emits zero, one or several ticks:
/// - with `max_fps` set, frames arriving sooner than `1000 / max_fps` ms are skipped
/// - with `min_fps` set, a frame longer than `1000 / min_fps` ms is split into
///   fixed-size ticks, and only the tail of that burst reaches `on_tick_once_per_frame`
/// - with neither set, each frame is exactly one tick
///
/// `Ticker` is a cheap handle; clones share state. Listeners that need to
/// control the ticker should capture a `WeakTicker` (see `downgrade`) so they
/// do not keep it alive. Dropping the last handle cancels the pending frame.
///
/// A pause requested by a listener during frame processing stops the current
/// burst and prevents the next registration; it cannot undo ticks already sent.
#[derive(Clone)]
pub struct Ticker {
    shared: Rc<Shared>,
}

/// Non-owning `Ticker` handle.
#[derive(Clone)]
pub struct WeakTicker {
    shared: Weak<Shared>,
}

struct Shared {
    frames: Rc<dyn FrameScheduler>,
    clock: Rc<dyn Clock>,

    max_fps: Cell<Option<f64>>,
    min_fps: Cell<Option<f64>>,
    time_scale: Cell<f64>,

    running: Cell<bool>,
    disposed: Cell<bool>,
    last_time_updated: Cell<f64>,
    current_tick: Cell<u64>,
    current_time: Cell<f64>,
    tick_delta_time: Cell<f64>,

    pending: Cell<Option<FrameHandle>>,
    // Bumped per registration; a callback carrying an older value is stale.
    generation: Cell<u64>,

    on_resume: Signal<()>,
    on_pause: Signal<()>,
    on_tick: Signal<TickInfo>,
    on_tick_once_per_frame: Signal<TickInfo>,
}

impl Ticker {
    /// Creates a ticker bound to a frame host and a clock.
    ///
    /// Starts running immediately unless `config.start_paused` is set.
    pub fn new(
        config: TickerConfig,
        frames: Rc<dyn FrameScheduler>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let shared = Rc::new(Shared {
            frames,
            clock,
            max_fps: Cell::new(config.max_fps),
            min_fps: Cell::new(config.min_fps),
            time_scale: Cell::new(config.time_scale),
            running: Cell::new(false),
            disposed: Cell::new(false),
            last_time_updated: Cell::new(0.0),
            current_tick: Cell::new(0),
            current_time: Cell::new(0.0),
            tick_delta_time: Cell::new(0.0),
            pending: Cell::new(None),
            generation: Cell::new(0),
            on_resume: Signal::new(),
            on_pause: Signal::new(),
            on_tick: Signal::new(),
            on_tick_once_per_frame: Signal::new(),
        });

        let ticker = Self { shared };
        if !config.start_paused {
            ticker.resume();
        }
        ticker
    }

    pub fn downgrade(&self) -> WeakTicker {
        WeakTicker {
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// Starts ticking from the next visual frame. No-op while running.
    ///
    /// A disposed ticker never resumes; the call is logged and ignored.
    pub fn resume(&self) {
        let s = &self.shared;
        if s.disposed.get() {
            log::warn!("resume() called on a disposed ticker; ignored");
            return;
        }
        if s.running.get() {
            return;
        }

        s.running.set(true);
        s.last_time_updated.set(s.clock.now_ms());
        log::debug!(
            "ticker resumed at tick {} ({:.3}ms)",
            s.current_tick.get(),
            s.last_time_updated.get()
        );

        s.on_resume.dispatch(&());

        // A resume listener may have paused (or paused and resumed) already.
        if s.running.get() && s.pending.get().is_none() {
            s.schedule();
        }
    }

    /// Stops ticking. Cumulative tick and time state is kept.
    ///
    /// Any pending frame registration is cancelled even when already paused.
    pub fn pause(&self) {
        let s = &self.shared;
        let was_running = s.running.replace(false);
        s.cancel_pending();

        if was_running {
            log::debug!("ticker paused at tick {}", s.current_tick.get());
            s.on_pause.dispatch(&());
        }
    }

    /// Pauses and detaches resume, pause and tick listeners for good.
    ///
    /// `on_tick_once_per_frame` listeners stay attached. They can no longer
    /// fire because a disposed ticker refuses to resume, but they are kept
    /// alive until the ticker itself is dropped.
    pub fn dispose(&self) {
        self.pause();

        let s = &self.shared;
        s.disposed.set(true);
        s.on_resume.clear();
        s.on_pause.clear();
        s.on_tick.clear();
        log::debug!("ticker disposed after {} ticks", s.current_tick.get());
    }

    /// Calls `f` once with the current snapshot. Advances nothing.
    pub fn update_once<F>(&self, f: F)
    where
        F: FnOnce(TickInfo),
    {
        f(self.shared.snapshot());
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.get()
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.disposed.get()
    }

    /// Ticks emitted since creation.
    pub fn current_tick(&self) -> u64 {
        self.shared.current_tick.get()
    }

    /// Cumulative scaled time, in seconds.
    pub fn current_time_seconds(&self) -> f64 {
        self.shared.current_time.get() / 1000.0
    }

    /// Scaled duration of the most recent tick, in seconds.
    pub fn tick_delta_time_seconds(&self) -> f64 {
        self.shared.tick_delta_time.get() / 1000.0
    }

    pub fn time_scale(&self) -> f64 {
        self.shared.time_scale.get()
    }

    /// Applies from the next tick. Does not change how many ticks are emitted.
    pub fn set_time_scale(&self, scale: f64) {
        self.shared.time_scale.set(scale);
    }

    pub fn max_fps(&self) -> Option<f64> {
        self.shared.max_fps.get()
    }

    /// Takes effect on the next visual frame.
    pub fn set_max_fps(&self, fps: Option<f64>) {
        self.shared.max_fps.set(fps);
    }

    pub fn min_fps(&self) -> Option<f64> {
        self.shared.min_fps.get()
    }

    /// Takes effect on the next visual frame.
    pub fn set_min_fps(&self, fps: Option<f64>) {
        self.shared.min_fps.set(fps);
    }

    /// Shortest gap between ticks, in ms (`1000 / max_fps`).
    pub fn min_interval(&self) -> Option<f64> {
        self.shared.min_interval()
    }

    /// Longest gap between ticks, in ms (`1000 / min_fps`).
    pub fn max_interval(&self) -> Option<f64> {
        self.shared.max_interval()
    }

    pub fn on_resume(&self) -> &Signal<()> {
        &self.shared.on_resume
    }

    pub fn on_pause(&self) -> &Signal<()> {
        &self.shared.on_pause
    }

    /// Fires for every tick.
    pub fn on_tick(&self) -> &Signal<TickInfo> {
        &self.shared.on_tick
    }

    /// Fires for ticks that stand for a visual frame: every tick in
    /// passthrough mode, only the tail of a catch-up burst otherwise.
    ///
    /// Runs after `on_tick` for the same tick, and only if the ticker is still
    /// running then: an `on_tick` listener that pauses during the visual tick
    /// suppresses that tick's once-per-frame event.
    pub fn on_tick_once_per_frame(&self) -> &Signal<TickInfo> {
        &self.shared.on_tick_once_per_frame
    }
}

impl fmt::Debug for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.shared;
        f.debug_struct("Ticker")
            .field("running", &s.running.get())
            .field("disposed", &s.disposed.get())
            .field("max_fps", &s.max_fps.get())
            .field("min_fps", &s.min_fps.get())
            .field("time_scale", &s.time_scale.get())
            .field("current_tick", &s.current_tick.get())
            .field("current_time", &s.current_time.get())
            .finish()
    }
}

impl WeakTicker {
    pub fn upgrade(&self) -> Option<Ticker> {
        self.shared.upgrade().map(|shared| Ticker { shared })
    }
}

impl Shared {
    fn min_interval(&self) -> Option<f64> {
        interval_ms(self.max_fps.get())
    }

    fn max_interval(&self) -> Option<f64> {
        interval_ms(self.min_fps.get())
    }

    fn snapshot(&self) -> TickInfo {
        TickInfo {
            time: self.current_time.get() / 1000.0,
            delta: self.tick_delta_time.get() / 1000.0,
            tick: self.current_tick.get(),
        }
    }

    fn schedule(self: &Rc<Self>) {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        let weak = Rc::downgrade(self);
        let handle = self.frames.request_frame(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.on_frame(generation);
            }
        }));
        self.pending.set(Some(handle));
    }

    fn cancel_pending(&self) {
        if let Some(handle) = self.pending.take() {
            self.frames.cancel_frame(handle);
        }
    }

    fn on_frame(self: &Rc<Self>, generation: u64) {
        if generation != self.generation.get() || self.pending.take().is_none() {
            return;
        }
        if !self.running.get() {
            return;
        }

        let now = self.clock.now_ms();
        // Clamped so a clock stepping backwards never produces negative time.
        let frame_delta = (now - self.last_time_updated.get()).max(0.0);

        let due = self.min_interval().is_none_or(|min| frame_delta >= min);
        if due {
            match self.max_interval() {
                Some(max_interval) => self.catch_up(now, frame_delta, max_interval),
                None => {
                    self.update(frame_delta * self.time_scale.get(), true);
                    self.last_time_updated.set(now);
                }
            }
        } else {
            log::trace!("frame skipped: {frame_delta:.3}ms since last tick");
        }

        if self.running.get() && self.pending.get().is_none() {
            self.schedule();
        }
    }

    /// Emits fixed-size ticks until less than one interval remains.
    ///
    /// Only the tick that leaves less than one interval outstanding counts as
    /// the visual-frame tick; earlier ticks of the burst are catch-up only.
    fn catch_up(&self, now: f64, frame_delta: f64, max_interval: f64) {
        let interval = frame_delta.min(max_interval);
        // A zero interval would never advance `last_time_updated`.
        if interval <= 0.0 {
            log::trace!("frame ignored: no time elapsed");
            return;
        }

        let mut emitted = 0u32;
        while self.running.get() && now - self.last_time_updated.get() >= interval {
            let next = self.last_time_updated.get() + interval;
            let is_visual_frame = now - next < interval;
            self.update(interval * self.time_scale.get(), is_visual_frame);
            self.last_time_updated.set(self.last_time_updated.get() + interval);
            emitted += 1;
        }

        if emitted > 1 {
            log::trace!("catch-up burst: {emitted} ticks of {interval:.3}ms");
        }
    }

    fn update(&self, time_passed: f64, is_visual_frame: bool) {
        self.current_tick.set(self.current_tick.get() + 1);
        self.current_time.set(self.current_time.get() + time_passed);
        self.tick_delta_time.set(time_passed);

        let info = self.snapshot();
        self.on_tick.dispatch(&info);

        if is_visual_frame && self.running.get() {
            self.on_tick_once_per_frame.dispatch(&info);
        }
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
