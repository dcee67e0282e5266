use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Identifies one subscription on a `Signal`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SlotId(u64);

type Listener<T> = Rc<dyn Fn(&T)>;

/// Ordered set of listeners for events of type `T`.
///
/// Listeners take `&T` and are `Fn`; state that must change across calls lives
/// behind a `Cell`/`RefCell` owned by the listener.
pub struct Signal<T> {
    next_id: Cell<u64>,
    slots: RefCell<Vec<(SlotId, Listener<T>)>>,
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            slots: RefCell::new(Vec::new()),
        }
    }

    /// Subscribes `listener`. It runs after every listener added before it.
    pub fn add<F>(&self, listener: F) -> SlotId
    where
        F: Fn(&T) + 'static,
    {
        let id = SlotId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        self.slots.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Unsubscribes a listener. Returns `false` if `id` was not subscribed.
    pub fn remove(&self, id: SlotId) -> bool {
        let removed = {
            let mut slots = self.slots.borrow_mut();
            slots
                .iter()
                .position(|(slot, _)| *slot == id)
                .map(|index| slots.remove(index))
        };
        // Dropped outside the borrow: a listener's captures may touch this signal.
        removed.is_some()
    }

    /// Unsubscribes every listener.
    pub fn clear(&self) {
        let removed = std::mem::take(&mut *self.slots.borrow_mut());
        drop(removed);
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    /// Calls every current listener with `args`, in subscription order.
    ///
    /// The listener list is snapshotted first: listeners added during the
    /// dispatch are not called this round, and a listener removed during the
    /// dispatch is skipped if it has not run yet.
    pub fn dispatch(&self, args: &T) {
        let snapshot: Vec<(SlotId, Listener<T>)> = self
            .slots
            .borrow()
            .iter()
            .map(|(id, f)| (*id, Rc::clone(f)))
            .collect();

        for (id, listener) in snapshot {
            if self.is_subscribed(id) {
                listener(args);
            }
        }
    }

    fn is_subscribed(&self, id: SlotId) -> bool {
        self.slots.borrow().iter().any(|(slot, _)| *slot == id)
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn Fn(&u32)>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log2 = Rc::clone(&log);
        let make = move |name: &'static str| -> Box<dyn Fn(&u32)> {
            let log = Rc::clone(&log2);
            Box::new(move |_: &u32| log.borrow_mut().push(name))
        };
        (log, make)
    }

    #[test]
    fn dispatch_runs_in_subscription_order() {
        let (log, make) = recorder();
        let signal = Signal::<u32>::new();
        signal.add(make("a"));
        signal.add(make("b"));
        signal.add(make("c"));

        signal.dispatch(&1);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn dispatch_passes_args() {
        let seen = Rc::new(Cell::new(0));
        let seen2 = Rc::clone(&seen);
        let signal = Signal::<u32>::new();
        signal.add(move |v| seen2.set(*v));

        signal.dispatch(&42);
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn remove_detaches_only_that_listener() {
        let (log, make) = recorder();
        let signal = Signal::<u32>::new();
        signal.add(make("a"));
        let b = signal.add(make("b"));

        assert!(signal.remove(b));
        assert!(!signal.remove(b));

        signal.dispatch(&0);
        assert_eq!(*log.borrow(), vec!["a"]);
        assert_eq!(signal.len(), 1);
    }

    #[test]
    fn clear_detaches_everything() {
        let (log, make) = recorder();
        let signal = Signal::<u32>::new();
        signal.add(make("a"));
        signal.add(make("b"));

        signal.clear();
        signal.dispatch(&0);
        assert!(log.borrow().is_empty());
        assert!(signal.is_empty());
    }

    #[test]
    fn listener_added_during_dispatch_waits_for_next_round() {
        let signal = Rc::new(Signal::<u32>::new());
        let calls = Rc::new(Cell::new(0));

        let weak = Rc::downgrade(&signal);
        let calls2 = Rc::clone(&calls);
        signal.add(move |_| {
            if let Some(signal) = weak.upgrade() {
                let calls = Rc::clone(&calls2);
                signal.add(move |_| calls.set(calls.get() + 1));
            }
        });

        signal.dispatch(&0);
        assert_eq!(calls.get(), 0);

        signal.dispatch(&0);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn listener_removed_during_dispatch_is_skipped() {
        let (log, make) = recorder();
        let signal = Rc::new(Signal::<u32>::new());
        let victim = Rc::new(Cell::new(None));

        let weak = Rc::downgrade(&signal);
        let victim2 = Rc::clone(&victim);
        signal.add(move |_| {
            if let (Some(signal), Some(id)) = (weak.upgrade(), victim2.get()) {
                signal.remove(id);
            }
        });
        victim.set(Some(signal.add(make("victim"))));

        signal.dispatch(&0);
        assert!(log.borrow().is_empty());
    }

    struct AddOnDrop(Rc<Signal<u32>>);

    impl Drop for AddOnDrop {
        fn drop(&mut self) {
            self.0.add(|_| {});
        }
    }

    #[test]
    fn removed_listener_may_touch_the_signal_when_dropped() {
        let signal = Rc::new(Signal::<u32>::new());
        let guard = AddOnDrop(Rc::clone(&signal));
        let id = signal.add(move |_| {
            let _keep = &guard;
        });

        assert!(signal.remove(id));
        assert_eq!(signal.len(), 1);

        let guard = AddOnDrop(Rc::clone(&signal));
        signal.add(move |_| {
            let _keep = &guard;
        });
        signal.clear();
        assert_eq!(signal.len(), 1);
    }

    #[test]
    fn clear_during_dispatch_does_not_panic() {
        let signal = Rc::new(Signal::<u32>::new());
        let weak = Rc::downgrade(&signal);
        signal.add(move |_| {
            if let Some(signal) = weak.upgrade() {
                signal.clear();
            }
        });

        signal.dispatch(&0);
        assert!(signal.is_empty());
    }
}
