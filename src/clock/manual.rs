//! Clock that only ticks when advanced.

use std::sync::{Arc, Mutex, PoisonError};

use super::{CancelHandle, CancelToken, Clock, TickCallback};

struct Subscription {
    token: CancelToken,
    callback: TickCallback,
}

/// Deterministic clock driven by `advance`.
///
/// Clones share subscriptions, so a test can keep one handle while a
/// session owns another.
#[derive(Clone, Default)]
pub struct ManualClock {
    subscriptions: Arc<Mutex<Vec<Subscription>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every live subscription once per second advanced.
    ///
    /// Callbacks run without the clock's lock held, so they may subscribe
    /// again; new subscriptions start ticking on the next second.
    pub fn advance(&self, seconds: u32) {
        for _ in 0..seconds {
            let mut due = std::mem::take(&mut *self.lock());

            due.retain_mut(|sub| {
                if sub.token.is_cancelled() {
                    return false;
                }
                if (sub.callback)().is_break() {
                    sub.token.finish();
                    return false;
                }
                true
            });

            let mut subscriptions = self.lock();
            due.append(&mut subscriptions);
            *subscriptions = due;
        }
    }

    /// Subscriptions that have not been cancelled.
    #[must_use]
    pub fn live_subscriptions(&self) -> usize {
        self.lock()
            .iter()
            .filter(|sub| !sub.token.is_cancelled())
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Subscription>> {
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for ManualClock {
    fn on_every_second(&self, callback: TickCallback) -> CancelHandle {
        let (handle, token) = CancelHandle::new();
        self.lock().push(Subscription { token, callback });
        handle
    }
}

impl std::fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualClock")
            .field("live_subscriptions", &self.live_subscriptions())
            .finish()
    }
}
