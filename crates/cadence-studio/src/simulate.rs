use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{ensure, Result};
use cadence_engine::frame::ManualFrameScheduler;
use cadence_engine::ticker::{Ticker, TickerConfig};
use cadence_engine::time::Clock;

use crate::meter::{Counts, RateMeter, Rates};

/// Headless run: a virtual display refreshing at `refresh_hz` for `seconds`.
///
/// Returns one `Rates` report per simulated second.
pub fn run(config: TickerConfig, seconds: f64, refresh_hz: f64) -> Result<Vec<Rates>> {
    ensure!(seconds > 0.0 && seconds.is_finite(), "simulation length must be positive");
    ensure!(refresh_hz > 0.0 && refresh_hz.is_finite(), "refresh rate must be positive");

    let host = Rc::new(ManualFrameScheduler::new());
    let clock = host.clock();
    let ticker = Ticker::new(config, host.clone(), clock.clone());

    let visual = Rc::new(Cell::new(0u64));
    let sink = Rc::clone(&visual);
    ticker
        .on_tick_once_per_frame()
        .add(move |_| sink.set(sink.get() + 1));

    let interval = ManualFrameScheduler::refresh_interval(refresh_hz);
    let frames = (seconds * refresh_hz).round() as u64;
    let mut meter = RateMeter::new(Duration::from_secs(1), clock.now());
    let mut reports = Vec::new();

    log::info!(
        "simulating {frames} frames at {refresh_hz}Hz (max_fps {:?}, min_fps {:?})",
        config.max_fps,
        config.min_fps
    );

    for frame in 1..=frames {
        host.advance(interval);

        let counts = Counts {
            ticks: ticker.current_tick(),
            visual_ticks: visual.get(),
            frames: frame,
        };
        if let Some(rates) = meter.sample(clock.now(), counts) {
            println!("  [{:>3}s] {rates}", reports.len() + 1);
            reports.push(rates);
        }
    }

    ticker.update_once(|info| {
        println!(
            "  total: {} ticks, {:.3}s simulated time (last delta {:.2}ms)",
            info.tick,
            info.time,
            info.delta * 1000.0
        );
    });
    ticker.dispose();

    Ok(reports)
}
