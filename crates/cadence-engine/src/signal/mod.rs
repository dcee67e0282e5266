//! Notification channels.
//!
//! A `Signal<T>` is a single-threaded multi-subscriber channel:
//! - `add` returns a `SlotId` used to `remove` the listener later
//! - `dispatch` calls every listener synchronously, in subscription order
//! - listeners may add/remove/clear while a dispatch is in progress

mod channel;

pub use channel::{Signal, SlotId};
