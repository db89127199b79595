//! Fixed-interval tick source

use std::time::Duration;

use tokio::time::MissedTickBehavior;

use super::{Scheduler, Subscription, TickFn};

/// Delivers ticks at a fixed period, reporting the nominal period as the
/// elapsed time of every tick.
///
/// Requires an ambient tokio runtime at [`Scheduler::start`] time; the
/// ticker runs as a spawned task until the subscription stops it.
#[derive(Debug, Clone)]
pub struct IntervalScheduler {
    period_ms: u64,
}

impl IntervalScheduler {
    /// A ticker firing every `period_ms` milliseconds. A zero period is
    /// raised to one millisecond; callers wanting a hard rejection validate
    /// before construction, as the timer engine does.
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
        }
    }
}

impl Scheduler for IntervalScheduler {
    fn start(&self, on_tick: TickFn) -> Subscription {
        let period_ms = self.period_ms;
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(period_ms));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first interval tick completes immediately; swallow it so
            // the first callback lands one full period after start
            interval.tick().await;
            loop {
                interval.tick().await;
                on_tick(period_ms);
            }
        });
        Subscription::new(move || handle.abort())
    }
}
