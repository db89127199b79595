//! Manually-driven tick source for deterministic tests

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use super::{Scheduler, Subscription, TickFn};

/// A [`Scheduler`] advanced by explicit [`fire`](ManualScheduler::fire)
/// calls instead of wall-clock time.
///
/// Clones share the same subscriber slot, so a test can hand one clone to a
/// timer and keep another to drive it. No runtime is required.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    slot: Arc<Mutex<Option<TickFn>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one tick of `elapsed_ms` to the current subscriber, if any.
    pub fn fire(&self, elapsed_ms: u64) {
        // clone the callback out before invoking it: a completion inside the
        // callback may stop the subscription, which takes the slot lock
        let on_tick = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(on_tick) = on_tick {
            on_tick(elapsed_ms);
        }
    }

    /// Whether a subscriber is currently registered.
    pub fn is_subscribed(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl Scheduler for ManualScheduler {
    fn start(&self, on_tick: TickFn) -> Subscription {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(on_tick);
        let slot = Arc::clone(&self.slot);
        Subscription::new(move || {
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        })
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("subscribed", &self.is_subscribed())
            .finish()
    }
}
