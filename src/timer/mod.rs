//! Countdown timer engine
//!
//! This module provides:
//! - **[`Timer`]**: the state machine owning all mutable countdown state
//! - **[`TimerOptions`]**: construction-time configuration and callbacks
//! - **[`TimerSnapshot`]**: a serializable point-in-time view
//!
//! # Lifecycle
//!
//! `Idle → Running → {Paused, Finished}`, with `reset` returning any state
//! to `Idle` and loop mode wrapping completions back into `Running`. Ticks
//! arrive from a [`Scheduler`](crate::scheduler::Scheduler) subscription
//! that exists exactly while the timer is running.

mod engine;
mod options;
mod snapshot;
mod state;

#[cfg(test)]
mod engine_tests;

pub use engine::Timer;
pub use options::{TimerOptions, DEFAULT_INTERVAL_MS};
pub use snapshot::TimerSnapshot;
pub use state::TimerStatus;
