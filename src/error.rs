//! Error types for timer construction

use thiserror::Error;

/// Errors rejected when building a timer.
///
/// The running control surface is total and never fails; misconfiguration
/// is surfaced here, at construction, instead of being silently clamped.
#[derive(Debug, Error)]
pub enum TimerError {
    /// The fixed tick interval must be at least one millisecond.
    #[error("tick interval must be greater than zero")]
    ZeroInterval,

    /// An unrecognized display format name was supplied.
    #[error("unknown time format `{0}`")]
    UnknownFormat(String),
}
