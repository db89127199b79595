//! Display formatting for millisecond counts

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::TimerError;

use super::decompose::{decompose, MS_PER_MINUTE, MS_PER_SECOND};

/// How remaining time is rendered for display.
///
/// Presets zero-pad every field to its natural width (2 digits for minutes
/// and seconds, 3 for milliseconds) except the most-significant field,
/// which is unpadded and carries the cumulative remainder.
#[derive(Clone, Default)]
pub enum TimeFormat {
    /// `H:MM:SS`
    HoursMinutesSeconds,
    /// `H:MM:SS.mmm`
    HoursMinutesSecondsMillis,
    /// `M:SS`, with cumulative minutes
    #[default]
    MinutesSeconds,
    /// `M:SS.mmm`
    MinutesSecondsMillis,
    /// `S`, total seconds
    Seconds,
    /// `S.mmm`
    SecondsMillis,
    /// Caller-owned rendering; the closure receives the raw millisecond
    /// count and no decomposition is performed on its behalf.
    Custom(Arc<dyn Fn(u64) -> String + Send + Sync>),
}

/// Render a millisecond count per the given format.
///
/// A panic raised by a [`TimeFormat::Custom`] closure propagates to the
/// caller unmodified; swallowing it would hide a caller bug.
pub fn format_time(ms: u64, format: &TimeFormat) -> String {
    if let TimeFormat::Custom(render) = format {
        return render(ms);
    }

    let d = decompose(ms);
    let total_minutes = ms / MS_PER_MINUTE;
    let total_seconds = ms / MS_PER_SECOND;

    match format {
        TimeFormat::HoursMinutesSeconds => {
            format!("{}:{:02}:{:02}", d.hours, d.minutes, d.seconds)
        }
        TimeFormat::HoursMinutesSecondsMillis => {
            format!("{}:{:02}:{:02}.{:03}", d.hours, d.minutes, d.seconds, d.millis)
        }
        TimeFormat::MinutesSeconds => format!("{}:{:02}", total_minutes, d.seconds),
        TimeFormat::MinutesSecondsMillis => {
            format!("{}:{:02}.{:03}", total_minutes, d.seconds, d.millis)
        }
        TimeFormat::Seconds => format!("{total_seconds}"),
        TimeFormat::SecondsMillis => format!("{}.{:03}", total_seconds, d.millis),
        TimeFormat::Custom(_) => unreachable!("handled above"),
    }
}

impl FromStr for TimeFormat {
    type Err = TimerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h:mm:ss" => Ok(Self::HoursMinutesSeconds),
            "h:mm:ss.mmm" => Ok(Self::HoursMinutesSecondsMillis),
            "m:ss" => Ok(Self::MinutesSeconds),
            "m:ss.mmm" => Ok(Self::MinutesSecondsMillis),
            "s" => Ok(Self::Seconds),
            "s.mmm" => Ok(Self::SecondsMillis),
            other => Err(TimerError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Debug for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::HoursMinutesSeconds => "HoursMinutesSeconds",
            Self::HoursMinutesSecondsMillis => "HoursMinutesSecondsMillis",
            Self::MinutesSeconds => "MinutesSeconds",
            Self::MinutesSecondsMillis => "MinutesSecondsMillis",
            Self::Seconds => "Seconds",
            Self::SecondsMillis => "SecondsMillis",
            Self::Custom(_) => "Custom(..)",
        };
        f.write_str(name)
    }
}
