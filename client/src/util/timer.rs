//! Cancellable one-shot timer.
//!
//! DESIGN
//! ======
//! Arming bumps an epoch counter and captures the new value as a token;
//! when the delay elapses the callback runs only if the epoch still
//! matches. Cancelling or re-arming bumps the epoch, so at most one
//! armed callback can ever fire. The auth machinery keeps one of these
//! per deferred action (post-redirect re-check, storage settle).

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// A single-slot timer: arming again or cancelling supersedes any
/// pending fire. Cloning shares the slot.
#[derive(Clone, Debug, Default)]
pub struct OneShot {
    epoch: Arc<AtomicU64>,
}

impl OneShot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate any pending fire.
    pub fn cancel(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    fn arm(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, token: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) == token
    }

    /// Arm the timer: run `f` after `delay_ms` unless superseded first.
    /// Outside the browser this only supersedes prior arms.
    pub fn schedule<F>(&self, delay_ms: u64, f: F)
    where
        F: FnOnce() + 'static,
    {
        let token = self.arm();
        #[cfg(feature = "hydrate")]
        {
            let slot = self.clone();
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(std::time::Duration::from_millis(delay_ms)).await;
                if slot.is_current(token) {
                    f();
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (delay_ms, f, token);
        }
    }
}
