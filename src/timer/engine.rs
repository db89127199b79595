//! Countdown timer engine

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::debug;

use crate::clock::{format_time, TimeFormat};
use crate::error::TimerError;
use crate::scheduler::{FrameScheduler, IntervalScheduler, Scheduler, Subscription, TickFn};

use super::options::{Hook, TickHook, TimerOptions, DEFAULT_INTERVAL_MS};
use super::snapshot::TimerSnapshot;
use super::state::{TimerState, TimerStatus};

/// A countdown timer driven by a pluggable tick scheduler.
///
/// All control operations are total: every call has defined behavior from
/// every state and never panics, so callers need no error handling on the
/// running surface. Cloning is cheap; clones share the same underlying
/// state, the way multiple views over one countdown would.
///
/// Lifecycle callbacks fire synchronously after a transition commits, and
/// always outside the state lock, so a callback may re-enter the control
/// surface.
#[derive(Clone)]
pub struct Timer {
    core: Arc<TimerCore>,
}

struct TimerCore {
    state: Mutex<TimerState>,
    scheduler: Arc<dyn Scheduler>,
    format: TimeFormat,
    looping: bool,
    on_start: Option<Hook>,
    on_pause: Option<Hook>,
    on_stop: Option<Hook>,
    on_reset: Option<Hook>,
    on_complete: Option<Hook>,
    on_tick: Option<TickHook>,
}

impl Timer {
    /// Build a timer counting down from `total_ms`.
    ///
    /// Rejects a zero tick interval instead of clamping it, to surface the
    /// misconfiguration at the call site. With `auto_start` and one of the
    /// built-in schedulers, construction must happen inside a tokio
    /// runtime, since starting spawns the ticker task.
    pub fn new(total_ms: u64, options: TimerOptions) -> Result<Self, TimerError> {
        let interval_ms = options.interval_ms.unwrap_or(DEFAULT_INTERVAL_MS);
        if interval_ms == 0 {
            return Err(TimerError::ZeroInterval);
        }

        let scheduler: Arc<dyn Scheduler> = match options.scheduler {
            Some(scheduler) => scheduler,
            None if options.frame_synced => Arc::new(FrameScheduler::new()),
            None => Arc::new(IntervalScheduler::new(interval_ms)),
        };

        let timer = Self {
            core: Arc::new(TimerCore {
                state: Mutex::new(TimerState::new(total_ms)),
                scheduler,
                format: options.format,
                looping: options.looping,
                on_start: options.on_start,
                on_pause: options.on_pause,
                on_stop: options.on_stop,
                on_reset: options.on_reset,
                on_complete: options.on_complete,
                on_tick: options.on_tick,
            }),
        };

        if options.auto_start {
            timer.start();
        }
        Ok(timer)
    }

    /// Start the countdown, or resume it when paused.
    ///
    /// A fresh start (from idle or finished) refills the clock to the full
    /// duration; resuming keeps the paused remainder and does not re-fire
    /// `on_start`. No-op while already running.
    pub fn start(&self) {
        let fresh;
        {
            let mut state = self.core.lock_state();
            match state.status {
                TimerStatus::Running => return,
                TimerStatus::Paused => fresh = false,
                TimerStatus::Idle | TimerStatus::Finished => {
                    state.remaining_ms = state.total_ms;
                    fresh = true;
                }
            }
            state.status = TimerStatus::Running;
            state.subscription = Some(TimerCore::subscribe(&self.core));
            debug!(remaining_ms = state.remaining_ms, fresh, "timer started");
        }
        if fresh {
            self.core.fire(&self.core.on_start);
        }
    }

    /// Suspend ticking, keeping the remaining time. No-op unless running.
    pub fn pause(&self) {
        let subscription;
        {
            let mut state = self.core.lock_state();
            if state.status != TimerStatus::Running {
                return;
            }
            subscription = state.subscription.take();
            state.status = TimerStatus::Paused;
            debug!(remaining_ms = state.remaining_ms, "timer paused");
        }
        stop_subscription(subscription);
        self.core.fire(&self.core.on_pause);
    }

    /// Halt the countdown and return to idle, keeping the remaining time.
    /// No-op unless running or paused.
    pub fn stop(&self) {
        let subscription;
        {
            let mut state = self.core.lock_state();
            if !matches!(state.status, TimerStatus::Running | TimerStatus::Paused) {
                return;
            }
            subscription = state.subscription.take();
            state.status = TimerStatus::Idle;
            debug!(remaining_ms = state.remaining_ms, "timer stopped");
        }
        stop_subscription(subscription);
        self.core.fire(&self.core.on_stop);
    }

    /// Refill the clock to the full duration and return to idle, from any
    /// state.
    pub fn reset(&self) {
        let subscription;
        {
            let mut state = self.core.lock_state();
            subscription = state.subscription.take();
            state.remaining_ms = state.total_ms;
            state.status = TimerStatus::Idle;
            debug!("timer reset");
        }
        stop_subscription(subscription);
        self.core.fire(&self.core.on_reset);
    }

    /// Reset, then start fresh. Fires `on_reset` followed by `on_start`.
    pub fn restart(&self) {
        self.reset();
        self.start();
    }

    /// Pause when running, start otherwise.
    pub fn toggle(&self) {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Add time to the countdown, clamped at the configured total.
    ///
    /// A finished timer with a restored remainder moves to paused; it does
    /// not resume on its own.
    pub fn add_time(&self, ms: u64) {
        let mut state = self.core.lock_state();
        state.remaining_ms = state.remaining_ms.saturating_add(ms).min(state.total_ms);
        if state.status == TimerStatus::Finished && state.remaining_ms > 0 {
            state.status = TimerStatus::Paused;
        }
    }

    /// Remove time from the countdown, saturating at zero. Draining the
    /// clock while running takes the same completion path as a final tick.
    pub fn subtract_time(&self, ms: u64) {
        let mut subscription = None;
        let mut completed = false;
        {
            let mut state = self.core.lock_state();
            state.remaining_ms = state.remaining_ms.saturating_sub(ms);
            if state.remaining_ms == 0 {
                if self.core.looping {
                    if state.status == TimerStatus::Running {
                        state.remaining_ms = state.total_ms;
                    }
                    // not running: stay at zero, the next running tick wraps
                } else if state.status == TimerStatus::Running {
                    subscription = state.subscription.take();
                    state.status = TimerStatus::Finished;
                    completed = true;
                } else {
                    state.status = TimerStatus::Finished;
                }
            }
        }
        stop_subscription(subscription);
        if completed {
            self.core.fire(&self.core.on_complete);
        }
    }

    /// Replace the remaining time, clamped to `0..=total`, recomputing the
    /// status to match the new value. Fires no callbacks: draining the
    /// clock this way finishes the timer silently.
    pub fn set_time(&self, ms: u64) {
        let mut subscription = None;
        {
            let mut state = self.core.lock_state();
            state.remaining_ms = ms.min(state.total_ms);
            if state.remaining_ms == 0 {
                if !self.core.looping {
                    if state.status == TimerStatus::Running {
                        subscription = state.subscription.take();
                    }
                    state.status = TimerStatus::Finished;
                }
            } else if state.status == TimerStatus::Finished {
                state.status = TimerStatus::Paused;
            }
        }
        stop_subscription(subscription);
    }

    /// Remaining time rendered per the configured format.
    pub fn time(&self) -> String {
        format_time(self.remaining_ms(), &self.core.format)
    }

    /// Completed share of the countdown, as a percentage in `0.0..=100.0`.
    pub fn progress(&self) -> f64 {
        self.core.lock_state().progress()
    }

    pub fn status(&self) -> TimerStatus {
        self.core.lock_state().status
    }

    pub fn remaining_ms(&self) -> u64 {
        self.core.lock_state().remaining_ms
    }

    pub fn total_ms(&self) -> u64 {
        self.core.lock_state().total_ms
    }

    pub fn is_idle(&self) -> bool {
        self.status().is_idle()
    }

    pub fn is_running(&self) -> bool {
        self.status().is_running()
    }

    pub fn is_paused(&self) -> bool {
        self.status().is_paused()
    }

    pub fn is_finished(&self) -> bool {
        self.status().is_finished()
    }

    /// Capture a consistent view of the timer under one lock acquisition.
    pub fn snapshot(&self) -> TimerSnapshot {
        let state = self.core.lock_state();
        TimerSnapshot {
            status: state.status,
            total_ms: state.total_ms,
            remaining_ms: state.remaining_ms,
            time: format_time(state.remaining_ms, &self.core.format),
            progress: state.progress(),
            captured_at: Utc::now(),
        }
    }
}

impl TimerCore {
    fn lock_state(&self) -> MutexGuard<'_, TimerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register with the scheduler. The ticker only holds a weak reference,
    /// so the subscription stored inside the state cannot keep the core
    /// alive, and dropping the last `Timer` handle tears the ticker down.
    fn subscribe(core: &Arc<Self>) -> Subscription {
        let weak = Arc::downgrade(core);
        let on_tick: TickFn = Arc::new(move |elapsed_ms| {
            if let Some(core) = weak.upgrade() {
                core.handle_tick(elapsed_ms);
            }
        });
        core.scheduler.start(on_tick)
    }

    /// Consume one scheduler tick.
    fn handle_tick(&self, elapsed_ms: u64) {
        let mut subscription = None;
        let mut completed = false;
        let remaining;
        {
            let mut state = self.lock_state();
            if state.status != TimerStatus::Running {
                // a queued tick can race the transition that left Running;
                // it must not touch the settled state
                return;
            }
            state.remaining_ms = state.remaining_ms.saturating_sub(elapsed_ms);
            remaining = state.remaining_ms;
            if remaining == 0 {
                if self.looping {
                    state.remaining_ms = state.total_ms;
                } else {
                    subscription = state.subscription.take();
                    state.status = TimerStatus::Finished;
                    completed = true;
                }
            }
        }
        stop_subscription(subscription);
        if let Some(on_tick) = &self.on_tick {
            on_tick(remaining);
        }
        if completed {
            debug!("countdown complete");
            self.fire(&self.on_complete);
        }
    }

    fn fire(&self, hook: &Option<Hook>) {
        if let Some(hook) = hook {
            hook();
        }
    }
}

fn stop_subscription(subscription: Option<Subscription>) {
    if let Some(subscription) = subscription {
        subscription.stop();
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.core.lock_state();
        f.debug_struct("Timer")
            .field("status", &state.status)
            .field("remaining_ms", &state.remaining_ms)
            .field("total_ms", &state.total_ms)
            .finish()
    }
}
