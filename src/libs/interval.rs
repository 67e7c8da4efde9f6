//! Structured time values and their millisecond conversions.
//!
//! Two shapes of time are used by the simulator:
//!
//! - **[`Interval`]**: the period between two ticks, split into hours, minutes,
//!   seconds and milliseconds.
//! - **[`RunDuration`]**: the optional bound on a whole run, split into hours
//!   and minutes.
//!
//! Both convert to a plain millisecond count. A count of zero means "the
//! matching timer is not armed" and is never treated as an error.
//!
//! ## Usage
//!
//! ```rust
//! use jiggler::libs::interval::{Interval, RunDuration};
//!
//! let interval = Interval::new(0, 1, 1, 500);
//! assert_eq!(interval.total_milliseconds(), 61_500);
//!
//! let duration = RunDuration::new(0, 5);
//! assert_eq!(duration.duration_milliseconds(), 300_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const MS_PER_HOUR: u64 = 3_600_000;
pub const MS_PER_MINUTE: u64 = 60_000;
pub const MS_PER_SECOND: u64 = 1_000;

/// Period between two consecutive ticks.
///
/// Field bounds (hours 0-23, minutes and seconds 0-59, milliseconds 0-999)
/// belong to the input layer. Any non-negative value is accepted here.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Interval {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub milliseconds: u64,
}

impl Interval {
    pub fn new(hours: u64, minutes: u64, seconds: u64, milliseconds: u64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            milliseconds,
        }
    }

    /// Weighted sum of all four fields in milliseconds.
    ///
    /// Saturates at `u64::MAX` instead of wrapping.
    pub fn total_milliseconds(&self) -> u64 {
        self.hours
            .saturating_mul(MS_PER_HOUR)
            .saturating_add(self.minutes.saturating_mul(MS_PER_MINUTE))
            .saturating_add(self.seconds.saturating_mul(MS_PER_SECOND))
            .saturating_add(self.milliseconds)
    }

    /// The tick period, or `None` when the interval is zero.
    pub fn period(&self) -> Option<Duration> {
        match self.total_milliseconds() {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            self.hours, self.minutes, self.seconds, self.milliseconds
        )
    }
}

/// Upper bound on the length of a run.
///
/// Whether the bound applies is decided by the `duration_enabled` flag in
/// [`Settings`](crate::libs::settings::Settings), not by this value.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunDuration {
    pub hours: u64,
    pub minutes: u64,
}

impl Default for RunDuration {
    fn default() -> Self {
        Self { hours: 0, minutes: 5 }
    }
}

impl RunDuration {
    pub fn new(hours: u64, minutes: u64) -> Self {
        Self { hours, minutes }
    }

    pub fn duration_milliseconds(&self) -> u64 {
        self.hours
            .saturating_mul(MS_PER_HOUR)
            .saturating_add(self.minutes.saturating_mul(MS_PER_MINUTE))
    }

    /// The auto-stop delay, or `None` when the duration is zero.
    pub fn delay(&self) -> Option<Duration> {
        match self.duration_milliseconds() {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

impl fmt::Display for RunDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {:02}m", self.hours, self.minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_saturates() {
        let interval = Interval::new(u64::MAX, 1, 1, 1);
        assert_eq!(interval.total_milliseconds(), u64::MAX);
    }

    #[test]
    fn test_display() {
        assert_eq!(Interval::new(0, 0, 1, 0).to_string(), "00:00:01.000");
        assert_eq!(RunDuration::new(1, 5).to_string(), "1h 05m");
    }
}
