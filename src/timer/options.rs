//! Timer construction options

use std::sync::Arc;

use crate::clock::TimeFormat;
use crate::scheduler::Scheduler;

/// Default fixed tick period.
pub const DEFAULT_INTERVAL_MS: u64 = 100;

pub(crate) type Hook = Box<dyn Fn() + Send + Sync>;
pub(crate) type TickHook = Box<dyn Fn(u64) + Send + Sync>;

/// Configuration for a [`Timer`](super::Timer).
///
/// Every field is optional; the builder methods consume and return `self`
/// so options chain onto [`TimerOptions::new`].
#[derive(Default)]
pub struct TimerOptions {
    pub(crate) interval_ms: Option<u64>,
    pub(crate) frame_synced: bool,
    pub(crate) format: TimeFormat,
    pub(crate) auto_start: bool,
    pub(crate) looping: bool,
    pub(crate) scheduler: Option<Arc<dyn Scheduler>>,
    pub(crate) on_start: Option<Hook>,
    pub(crate) on_pause: Option<Hook>,
    pub(crate) on_stop: Option<Hook>,
    pub(crate) on_reset: Option<Hook>,
    pub(crate) on_complete: Option<Hook>,
    pub(crate) on_tick: Option<TickHook>,
}

impl TimerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed tick period in milliseconds (default 100). Ignored when
    /// [`frame_synced`](Self::frame_synced) or an explicit scheduler is set.
    pub fn interval_ms(mut self, ms: u64) -> Self {
        self.interval_ms = Some(ms);
        self
    }

    /// Tick at display refresh cadence, reporting measured elapsed time,
    /// instead of a fixed interval.
    pub fn frame_synced(mut self, on: bool) -> Self {
        self.frame_synced = on;
        self
    }

    /// Display format used by [`Timer::time`](super::Timer::time).
    pub fn format(mut self, format: TimeFormat) -> Self {
        self.format = format;
        self
    }

    /// Start the countdown immediately on construction.
    pub fn auto_start(mut self, on: bool) -> Self {
        self.auto_start = on;
        self
    }

    /// Wrap back to the full duration on completion and keep running,
    /// instead of finishing. A looping timer never reports finished.
    pub fn looping(mut self, on: bool) -> Self {
        self.looping = on;
        self
    }

    /// Inject a tick source, overriding the interval/frame-sync selection.
    /// Tests pass a [`ManualScheduler`](crate::scheduler::ManualScheduler)
    /// here to drive the timer deterministically.
    pub fn scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Invoked on fresh starts (not on pause-resume).
    pub fn on_start(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_start = Some(Box::new(hook));
        self
    }

    pub fn on_pause(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_pause = Some(Box::new(hook));
        self
    }

    pub fn on_stop(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_stop = Some(Box::new(hook));
        self
    }

    pub fn on_reset(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_reset = Some(Box::new(hook));
        self
    }

    /// Invoked when the countdown reaches zero in non-loop mode.
    pub fn on_complete(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    /// Invoked after every consumed tick with the new remaining
    /// milliseconds.
    pub fn on_tick(mut self, hook: impl Fn(u64) + Send + Sync + 'static) -> Self {
        self.on_tick = Some(Box::new(hook));
        self
    }
}
