//! Display-refresh tick source

use std::time::{Duration, Instant};

use tokio::time::MissedTickBehavior;

use super::{Scheduler, Subscription, TickFn};

/// Milliseconds between display refresh callbacks (~60 Hz).
const FRAME_MS: u64 = 16;

/// Delivers one tick per display refresh interval, reporting the *actual*
/// measured wall-clock time since the previous tick.
///
/// Refresh-driven callbacks have variable spacing, so unlike
/// [`IntervalScheduler`](super::IntervalScheduler) no nominal period is
/// assumed; an [`Instant`] anchor is carried across ticks instead.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler;

impl FrameScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for FrameScheduler {
    fn start(&self, on_tick: TickFn) -> Subscription {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(FRAME_MS));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval.tick().await;
            let mut last = Instant::now();
            loop {
                interval.tick().await;
                let now = Instant::now();
                let elapsed = now.duration_since(last).as_millis() as u64;
                last = now;
                on_tick(elapsed);
            }
        });
        Subscription::new(move || handle.abort())
    }
}
