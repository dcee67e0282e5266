mod demo;
mod meter;
mod simulate;

use anyhow::{bail, Result};
use cadence_engine::logging::{init_logging, LoggingConfig};
use cadence_engine::ticker::TickerConfig;
use cadence_engine::window::{Runtime, RuntimeConfig};
use clap::Parser;

use crate::demo::TickerDemo;

#[derive(Parser, Debug)]
#[command(name = "cadence-studio", about = "Drive a frame-rate-normalizing ticker")]
struct Cli {
    /// Upper bound on tick rate (frames arriving faster are skipped).
    #[arg(long)]
    max_fps: Option<f64>,
    /// Lower bound on tick rate (slow frames are split into several ticks).
    #[arg(long)]
    min_fps: Option<f64>,
    /// Multiplier applied to reported elapsed time.
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,
    /// Create the ticker paused (press Space to resume).
    #[arg(long)]
    start_paused: bool,
    /// Run headless for this many simulated seconds instead of opening a window.
    #[arg(long, value_name = "SECONDS")]
    simulate: Option<f64>,
    /// Display refresh rate, emulated in both modes.
    #[arg(long, default_value_t = 60.0)]
    refresh_hz: f64,
    /// Log filter in env_logger syntax (defaults to RUST_LOG, then "info").
    #[arg(long)]
    log: Option<String>,
}

impl Cli {
    fn validate(&self) -> Result<()> {
        for (name, value) in [("--max-fps", self.max_fps), ("--min-fps", self.min_fps)] {
            if let Some(fps) = value {
                if !(fps.is_finite() && fps > 0.0) {
                    bail!("{name} must be a positive number, got {fps}");
                }
            }
        }
        if let (Some(max), Some(min)) = (self.max_fps, self.min_fps) {
            if min > max {
                bail!("--min-fps ({min}) must not exceed --max-fps ({max})");
            }
        }
        if !self.time_scale.is_finite() {
            bail!("--time-scale must be finite");
        }
        if !(self.refresh_hz.is_finite() && self.refresh_hz > 0.0) {
            bail!("--refresh-hz must be a positive number");
        }
        Ok(())
    }

    fn ticker_config(&self) -> TickerConfig {
        TickerConfig {
            max_fps: self.max_fps,
            min_fps: self.min_fps,
            start_paused: self.start_paused,
            time_scale: self.time_scale,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::default();
    if let Some(filter) = cli.log.as_deref() {
        logging = logging.with_filter(filter);
    }
    init_logging(logging);

    cli.validate()?;
    let config = cli.ticker_config();

    if let Some(seconds) = cli.simulate {
        println!();
        println!("  cadence studio: headless run");
        println!();
        simulate::run(config, seconds, cli.refresh_hz)?;
        return Ok(());
    }

    log::info!("Space: pause/resume  Up/Down: time scale  Esc: quit");
    let runtime = RuntimeConfig::default()
        .title("cadence studio")
        .refresh_hz(Some(cli.refresh_hz));

    Runtime::run(runtime, TickerDemo::new(config, "cadence studio"))
}
