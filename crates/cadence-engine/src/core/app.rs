use winit::event::WindowEvent;

use super::ctx::{FrameCtx, StartCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application driven by `window::Runtime`.
pub trait App {
    /// Called once, after the window and its frame host exist.
    ///
    /// This is where tickers are created.
    fn on_start(&mut self, ctx: &mut StartCtx<'_>) -> AppControl;

    /// Called for every window event, before the runtime handles it.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per visual frame, after pending frame callbacks ran.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}
