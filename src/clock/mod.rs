//! Tick sources for the round clock.
//!
//! A `Clock` calls a callback once per elapsed second until the
//! subscription is cancelled. Two implementations:
//!
//! - [`ManualClock`]: ticks only when told to, for tests and hosts with
//!   their own event loop
//! - [`IntervalClock`]: a background thread per subscription
//!
//! Cancellation is the caller's main obligation: a subscription left
//! running after its round ended would keep ticking whatever round the
//! engine is on next. Dropping the [`CancelHandle`] cancels it.
//!
//! ```
//! use std::ops::ControlFlow;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use std::sync::Arc;
//! use number_guess::clock::{Clock, ManualClock};
//!
//! let clock = ManualClock::new();
//! let ticks = Arc::new(AtomicU32::new(0));
//! let counter = Arc::clone(&ticks);
//!
//! let handle = clock.on_every_second(Box::new(move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//!     ControlFlow::Continue(())
//! }));
//!
//! clock.advance(3);
//! handle.cancel();
//! clock.advance(3);
//! assert_eq!(ticks.load(Ordering::SeqCst), 3);
//! ```

mod interval;
mod manual;

pub use interval::IntervalClock;
pub use manual::ManualClock;

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Called once per elapsed second. Returning `Break` ends the subscription.
pub type TickCallback = Box<dyn FnMut() -> ControlFlow<()> + Send + 'static>;

/// Periodic tick source.
pub trait Clock {
    /// Start calling `callback` every second until the returned handle is
    /// cancelled or dropped, or the callback returns `Break`.
    fn on_every_second(&self, callback: TickCallback) -> CancelHandle;
}

/// Owner side of a subscription. Cancels on drop.
#[derive(Debug)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Create a live handle and the token the clock polls.
    #[must_use]
    pub fn new() -> (Self, CancelToken) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Self {
                flag: Arc::clone(&flag),
            },
            CancelToken { flag },
        )
    }

    /// Stop the subscription. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether the subscription has ended, from either side.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl Drop for CancelHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Clock side of a subscription.
#[derive(Clone, Debug)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Mark the subscription finished, e.g. after the callback returned `Break`.
    pub fn finish(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}
