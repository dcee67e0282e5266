//! Time sources.
//!
//! The ticker never reads the OS clock directly; it is handed a `Clock`.
//! - `SystemClock` for real hosts (monotonic, `Instant`-based)
//! - `ManualClock` for simulations and tests (moved by hand)

mod clock;

pub use clock::{Clock, ManualClock, SystemClock};
