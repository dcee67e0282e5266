/// One-shot callback run on the next visual frame.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Cancellation handle for a pending frame callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FrameHandle(pub(crate) u64);

impl FrameHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Host capability: "call me before the next repaint".
pub trait FrameScheduler {
    /// Registers `callback` to run once, on the next visual frame.
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Cancels a pending registration.
    ///
    /// Must tolerate handles that already fired or were already cancelled.
    fn cancel_frame(&self, handle: FrameHandle);
}
