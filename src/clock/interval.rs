//! Wall-clock ticks from a background thread.

use std::thread;
use std::time::Duration;

use tracing::trace;

use super::{CancelHandle, Clock, TickCallback};

/// Ticks on a fixed period (one second by default) from a dedicated
/// thread per subscription.
///
/// The cancel flag is checked right before every callback. A callback
/// already running when `cancel` is called still completes.
#[derive(Clone, Copy, Debug)]
pub struct IntervalClock {
    period: Duration,
}

impl Default for IntervalClock {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
        }
    }
}

impl IntervalClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tick on a custom period. Each tick still counts as one second of
    /// game time.
    #[must_use]
    pub fn with_period(period: Duration) -> Self {
        Self { period }
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Clock for IntervalClock {
    fn on_every_second(&self, mut callback: TickCallback) -> CancelHandle {
        let (handle, token) = CancelHandle::new();
        let period = self.period;

        thread::spawn(move || loop {
            thread::sleep(period);
            if token.is_cancelled() {
                trace!("interval subscription cancelled");
                break;
            }
            if callback().is_break() {
                token.finish();
                break;
            }
        });

        handle
    }
}
