use std::cell::{Cell, RefCell};
use std::fmt;

use super::scheduler::{FrameCallback, FrameHandle};

/// Pending frame callbacks, in registration order.
#[derive(Default)]
pub struct FrameQueue {
    next_id: Cell<u64>,
    pending: RefCell<Vec<(FrameHandle, FrameCallback)>>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle(self.next_id.get());
        self.next_id.set(handle.0 + 1);

        self.pending.borrow_mut().push((handle, callback));
        handle
    }

    /// Drops the callback for `handle`. Returns `false` for stale handles.
    pub fn cancel(&self, handle: FrameHandle) -> bool {
        let removed = {
            let mut pending = self.pending.borrow_mut();
            pending
                .iter()
                .position(|(h, _)| *h == handle)
                .map(|index| pending.remove(index))
        };
        // The borrow is released before the callback (and its captures) drops.
        removed.is_some()
    }

    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// Runs every callback registered before this call and returns how many ran.
    ///
    /// Callbacks registered while running are kept for the next frame.
    pub fn run_pending(&self) -> usize {
        let batch = std::mem::take(&mut *self.pending.borrow_mut());
        let count = batch.len();

        for (_, callback) in batch {
            callback();
        }

        count
    }
}

impl fmt::Debug for FrameQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameQueue")
            .field("next_id", &self.next_id.get())
            .field("pending", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn handles_are_unique() {
        let queue = FrameQueue::new();
        let a = queue.push(Box::new(|| {}));
        let b = queue.push(Box::new(|| {}));
        assert_ne!(a, b);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn cancel_prevents_the_callback() {
        let queue = FrameQueue::new();
        let ran = Rc::new(Cell::new(false));
        let ran2 = Rc::clone(&ran);
        let handle = queue.push(Box::new(move || ran2.set(true)));

        assert!(queue.cancel(handle));
        assert!(!queue.cancel(handle));
        assert_eq!(queue.run_pending(), 0);
        assert!(!ran.get());
    }

    #[test]
    fn callbacks_registered_while_running_wait_a_frame() {
        let queue = Rc::new(FrameQueue::new());
        let runs = Rc::new(Cell::new(0));

        let q = Rc::clone(&queue);
        let r = Rc::clone(&runs);
        queue.push(Box::new(move || {
            r.set(r.get() + 1);
            let r = Rc::clone(&r);
            q.push(Box::new(move || r.set(r.get() + 1)));
        }));

        assert_eq!(queue.run_pending(), 1);
        assert_eq!(runs.get(), 1);
        assert_eq!(queue.len(), 1);

        assert_eq!(queue.run_pending(), 1);
        assert_eq!(runs.get(), 2);
        assert!(queue.is_empty());
    }

    struct CancelOnDrop {
        queue: Rc<FrameQueue>,
        other: FrameHandle,
    }

    impl Drop for CancelOnDrop {
        fn drop(&mut self) {
            self.queue.cancel(self.other);
        }
    }

    #[test]
    fn cancelled_callback_may_touch_the_queue_when_dropped() {
        let queue = Rc::new(FrameQueue::new());
        let other = queue.push(Box::new(|| {}));
        let guard = CancelOnDrop { queue: Rc::clone(&queue), other };
        let handle = queue.push(Box::new(move || drop(guard)));

        assert!(queue.cancel(handle));
        assert!(queue.is_empty());
    }
}
