//! Time arithmetic and display formatting
//!
//! Pure helpers with no state and no clocks. The timer engine calls these
//! synchronously on every read and tick to produce its derived display
//! values, so everything here is cheap and deterministic.

mod decompose;
mod format;

pub use decompose::{decompose, from_ms, to_ms, Decomposed, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};
pub use format::{format_time, TimeFormat};
