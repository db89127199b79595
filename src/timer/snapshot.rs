//! Serializable point-in-time view of a timer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::TimerStatus;

/// A consistent snapshot of a [`Timer`](super::Timer), taken under a single
/// lock acquisition so the fields cannot disagree with each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub status: TimerStatus,
    pub total_ms: u64,
    pub remaining_ms: u64,
    /// Remaining time rendered per the timer's configured format.
    pub time: String,
    /// Completed share of the countdown, `0.0..=100.0`.
    pub progress: f64,
    pub captured_at: DateTime<Utc>,
}
