//! Tick scheduling strategies
//!
//! The timer engine never touches a clock directly; it subscribes to a
//! [`Scheduler`] and consumes the ticks it delivers. Two production
//! strategies are provided: a fixed-interval ticker and a display-refresh
//! ticker. [`ManualScheduler`] drives ticks by hand for deterministic tests.

mod frame;
mod interval;
mod manual;

pub use frame::FrameScheduler;
pub use interval::IntervalScheduler;
pub use manual::ManualScheduler;

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Callback invoked on every tick with the elapsed milliseconds since the
/// previous tick (or since subscription, for the first tick).
pub type TickFn = Arc<dyn Fn(u64) + Send + Sync>;

/// A source of periodic tick callbacks.
pub trait Scheduler: Send + Sync {
    /// Begin delivering ticks to `on_tick` until the returned subscription
    /// is stopped or dropped.
    fn start(&self, on_tick: TickFn) -> Subscription;
}

/// Handle to an active tick stream.
///
/// Stopping is idempotent and never panics; teardown paths may call it from
/// several transitions. Dropping the handle stops delivery too, so an
/// abandoned subscription leaks no ticker task.
pub struct Subscription {
    cancel: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl Subscription {
    /// Wrap a cancellation action; it runs at most once.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Mutex::new(Some(Box::new(cancel))),
        }
    }

    /// Stop tick delivery. Safe to call on an already-stopped handle.
    pub fn stop(&self) {
        let cancel = self
            .cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(cancel) = cancel {
            cancel();
        }
    }

    /// Whether the subscription has not been stopped yet.
    pub fn is_active(&self) -> bool {
        self.cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
