use anyhow::{Context, Result};
use std::rc::Rc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, StartCtx, WindowCtx};
use crate::time::{Clock, SystemClock};

use super::redraw::RedrawScheduler;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Emulated display refresh rate.
    ///
    /// Nothing is presented, so the platform does not pace redraws; the runtime
    /// spaces them `1 / refresh_hz` apart. `None` redraws as fast as the event
    /// loop allows.
    pub refresh_hz: Option<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "cadence".to_string(),
            initial_size: LogicalSize::new(640.0, 360.0),
            refresh_hz: Some(60.0),
        }
    }
}

impl RuntimeConfig {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.initial_size = LogicalSize::new(width, height);
        self
    }

    pub fn refresh_hz(mut self, hz: Option<f64>) -> Self {
        self.refresh_hz = hz;
        self
    }

    fn frame_interval(&self) -> Option<Duration> {
        self.refresh_hz
            .filter(|hz| *hz > 0.0 && hz.is_finite())
            .map(|hz| Duration::from_secs_f64(1.0 / hz))
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    app: A,

    frames: Rc<RedrawScheduler>,
    clock: Rc<SystemClock>,
    window: Option<Window>,

    frame_index: u64,
    next_frame_at: Option<Instant>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, app: A) -> Self {
        Self {
            config,
            app,
            frames: Rc::new(RedrawScheduler::new()),
            clock: Rc::new(SystemClock::new()),
            window: None,
            frame_index: 0,
            next_frame_at: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        log::debug!(
            "window {:?} created, emulated refresh {:?}Hz",
            window.id(),
            self.config.refresh_hz
        );
        self.window = Some(window);
        Ok(())
    }

    fn start_app(&mut self) -> AppControl {
        let Some(window) = self.window.as_ref() else {
            return AppControl::Exit;
        };

        let mut ctx = StartCtx {
            window: WindowCtx {
                id: window.id(),
                window,
            },
            frames: &self.frames,
            clock: &self.clock,
        };
        self.app.on_start(&mut ctx)
    }

    fn redraw(&mut self) -> AppControl {
        if let Some(interval) = self.config.frame_interval() {
            self.next_frame_at = Some(Instant::now() + interval);
        }

        // Frame callbacks run before the app sees the frame, so tick listeners
        // have already updated whatever the app presents.
        let callbacks = self.frames.run_pending();
        self.frame_index = self.frame_index.wrapping_add(1);

        let Some(window) = self.window.as_ref() else {
            return AppControl::Continue;
        };

        let mut ctx = FrameCtx {
            window: WindowCtx {
                id: window.id(),
                window,
            },
            frame_index: self.frame_index,
            now: self.clock.now(),
            callbacks,
        };
        self.app.on_frame(&mut ctx)
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            log::error!("failed to create window: {e:#}");
            self.request_exit(event_loop);
            return;
        }

        if self.start_app() == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Nothing registered: idle until an input event arrives.
        if !self.frames.has_pending() {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        }

        match self.next_frame_at {
            Some(deadline) if Instant::now() < deadline => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
            _ => {
                event_loop.set_control_flow(ControlFlow::Wait);
                if let Some(window) = self.window.as_ref() {
                    window.request_redraw();
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if self.window.as_ref().map(|w| w.id()) != Some(window_id) {
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.window = None;
                self.request_exit(event_loop);
            }

            WindowEvent::RedrawRequested => {
                if self.redraw() == AppControl::Exit {
                    self.request_exit(event_loop);
                }
            }

            _ => {}
        }
    }
}
