use std::time::Duration;

/// Cumulative counters sampled by `RateMeter`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Counts {
    pub ticks: u64,
    pub visual_ticks: u64,
    pub frames: u64,
}

/// Per-second rates over one measurement window.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rates {
    pub ticks: f64,
    pub visual_ticks: f64,
    pub frames: f64,
}

impl std::fmt::Display for Rates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:6.1} ticks/s  {:6.1} visual/s  {:6.1} frames/s",
            self.ticks, self.visual_ticks, self.frames
        )
    }
}

/// Turns cumulative counters into per-second rates, once per window.
#[derive(Debug, Clone)]
pub struct RateMeter {
    window: Duration,
    start: Duration,
    base: Counts,
}

impl RateMeter {
    pub fn new(window: Duration, now: Duration) -> Self {
        Self {
            window,
            start: now,
            base: Counts::default(),
        }
    }

    /// Returns rates once at least `window` has passed since the last report.
    pub fn sample(&mut self, now: Duration, counts: Counts) -> Option<Rates> {
        let elapsed = now.checked_sub(self.start)?;
        if elapsed < self.window || elapsed.is_zero() {
            return None;
        }

        let secs = elapsed.as_secs_f64();
        let rates = Rates {
            ticks: counts.ticks.saturating_sub(self.base.ticks) as f64 / secs,
            visual_ticks: counts.visual_ticks.saturating_sub(self.base.visual_ticks) as f64 / secs,
            frames: counts.frames.saturating_sub(self.base.frames) as f64 / secs,
        };

        self.start = now;
        self.base = counts;
        Some(rates)
    }
}
