//! Canonical timer state

use serde::{Deserialize, Serialize};

use crate::scheduler::Subscription;

/// Lifecycle phase of a [`Timer`](super::Timer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Finished,
}

impl TimerStatus {
    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }

    pub fn is_running(self) -> bool {
        self == Self::Running
    }

    pub fn is_paused(self) -> bool {
        self == Self::Paused
    }

    pub fn is_finished(self) -> bool {
        self == Self::Finished
    }
}

/// The single source of truth for a timer.
///
/// Everything a consumer observes (`time`, `progress`, the status
/// predicates) is recomputed from these fields on read; nothing derived is
/// ever stored, so nothing derived can go stale.
pub(crate) struct TimerState {
    /// Configured full duration; the denominator for progress.
    pub total_ms: u64,
    /// Current countdown value; the only field ticks mutate.
    pub remaining_ms: u64,
    pub status: TimerStatus,
    /// Live tick subscription; present iff `status == Running`.
    pub subscription: Option<Subscription>,
}

impl TimerState {
    pub fn new(total_ms: u64) -> Self {
        Self {
            total_ms,
            remaining_ms: total_ms,
            status: TimerStatus::Idle,
            subscription: None,
        }
    }

    /// Completed share of the countdown, as a percentage in `0.0..=100.0`.
    /// A zero-length timer reports 0 rather than dividing by zero.
    pub fn progress(&self) -> f64 {
        if self.total_ms == 0 {
            0.0
        } else {
            100.0 * (self.total_ms - self.remaining_ms) as f64 / self.total_ms as f64
        }
    }
}
