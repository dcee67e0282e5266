/// Construction-time settings for a `Ticker`.
///
/// `None` rates are unbounded: with both unset the ticker emits exactly one
/// tick per visual frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TickerConfig {
    /// Upper bound on tick rate. Frames arriving faster are skipped.
    pub max_fps: Option<f64>,
    /// Lower bound on tick rate. Slow frames are split into several ticks.
    pub min_fps: Option<f64>,
    /// Leave the ticker paused after construction.
    pub start_paused: bool,
    /// Initial multiplier for reported elapsed time.
    pub time_scale: f64,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            max_fps: None,
            min_fps: None,
            start_paused: false,
            time_scale: 1.0,
        }
    }
}

impl TickerConfig {
    pub fn max_fps(mut self, fps: f64) -> Self {
        self.max_fps = Some(fps);
        self
    }

    pub fn min_fps(mut self, fps: f64) -> Self {
        self.min_fps = Some(fps);
        self
    }

    pub fn start_paused(mut self, paused: bool) -> Self {
        self.start_paused = paused;
        self
    }

    pub fn time_scale(mut self, scale: f64) -> Self {
        self.time_scale = scale;
        self
    }
}

/// Snapshot passed to tick listeners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TickInfo {
    /// Cumulative scaled time, in seconds.
    pub time: f64,
    /// Scaled time attributed to this tick, in seconds.
    pub delta: f64,
    /// Ticks emitted so far, this one included.
    pub tick: u64,
}

/// Milliseconds between ticks at `fps`. Not validated: zero or negative rates
/// produce infinite or negative intervals.
pub(crate) fn interval_ms(fps: Option<f64>) -> Option<f64> {
    fps.map(|fps| 1000.0 / fps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded_and_running() {
        let cfg = TickerConfig::default();
        assert_eq!(cfg.max_fps, None);
        assert_eq!(cfg.min_fps, None);
        assert!(!cfg.start_paused);
        assert_eq!(cfg.time_scale, 1.0);
    }

    #[test]
    fn builder_sets_fields() {
        let cfg = TickerConfig::default()
            .max_fps(30.0)
            .min_fps(10.0)
            .start_paused(true)
            .time_scale(0.5);

        assert_eq!(cfg.max_fps, Some(30.0));
        assert_eq!(cfg.min_fps, Some(10.0));
        assert!(cfg.start_paused);
        assert_eq!(cfg.time_scale, 0.5);
    }

    #[test]
    fn interval_is_reciprocal_in_ms() {
        assert_eq!(interval_ms(None), None);
        assert_eq!(interval_ms(Some(50.0)), Some(20.0));
        assert_eq!(interval_ms(Some(0.0)), Some(f64::INFINITY));
    }
}
