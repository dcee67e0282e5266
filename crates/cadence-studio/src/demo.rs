use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use cadence_engine::core::{App, AppControl, FrameCtx, StartCtx};
use cadence_engine::ticker::{Ticker, TickerConfig};
use cadence_engine::time::Clock;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::meter::{Counts, RateMeter};

/// Windowed demo: one ticker paced by the window's redraws.
///
/// Space pauses/resumes, Up/Down double/halve the time scale, Escape exits.
/// Measured rates go to the window title and the log once per second.
pub struct TickerDemo {
    config: TickerConfig,
    title: String,
    ticker: Option<Ticker>,
    visual: Rc<Cell<u64>>,
    meter: Option<RateMeter>,
}

impl TickerDemo {
    pub fn new(config: TickerConfig, title: impl Into<String>) -> Self {
        Self {
            config,
            title: title.into(),
            ticker: None,
            visual: Rc::new(Cell::new(0)),
            meter: None,
        }
    }

    fn on_key(&self, key: KeyCode) -> AppControl {
        let Some(ticker) = self.ticker.as_ref() else {
            return AppControl::Continue;
        };

        match key {
            KeyCode::Escape => return AppControl::Exit,
            KeyCode::Space if ticker.is_running() => ticker.pause(),
            KeyCode::Space => ticker.resume(),
            KeyCode::ArrowUp => ticker.set_time_scale(ticker.time_scale() * 2.0),
            KeyCode::ArrowDown => ticker.set_time_scale(ticker.time_scale() / 2.0),
            _ => return AppControl::Continue,
        }

        log::info!(
            "running: {}, time scale: {}",
            ticker.is_running(),
            ticker.time_scale()
        );
        AppControl::Continue
    }
}

impl App for TickerDemo {
    fn on_start(&mut self, ctx: &mut StartCtx<'_>) -> AppControl {
        let ticker = ctx.ticker(self.config);

        let sink = Rc::clone(&self.visual);
        ticker
            .on_tick_once_per_frame()
            .add(move |_| sink.set(sink.get() + 1));
        ticker.on_pause().add(|_| log::info!("ticker paused"));
        ticker.on_resume().add(|_| log::info!("ticker resumed"));

        self.meter = Some(RateMeter::new(Duration::from_secs(1), ctx.clock.now()));
        self.ticker = Some(ticker);
        AppControl::Continue
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                match event.physical_key {
                    PhysicalKey::Code(code) => self.on_key(code),
                    PhysicalKey::Unidentified(_) => AppControl::Continue,
                }
            }
            WindowEvent::CloseRequested => {
                if let Some(ticker) = self.ticker.take() {
                    ticker.dispose();
                }
                AppControl::Continue
            }
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let (Some(ticker), Some(meter)) = (self.ticker.as_ref(), self.meter.as_mut()) else {
            return AppControl::Continue;
        };

        let counts = Counts {
            ticks: ticker.current_tick(),
            visual_ticks: self.visual.get(),
            frames: ctx.frame_index,
        };

        if let Some(rates) = meter.sample(ctx.now, counts) {
            ctx.window.set_title(&format!(
                "{}: {:.0} ticks/s, {:.0} visual/s, {:.0} fps, t = {:.1}s",
                self.title,
                rates.ticks,
                rates.visual_ticks,
                rates.frames,
                ticker.current_time_seconds()
            ));
            log::info!("{rates}  t = {:.2}s", ticker.current_time_seconds());
        }

        AppControl::Continue
    }
}
