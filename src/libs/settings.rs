//! User-editable settings and the clamping boundary in front of the core.
//!
//! Everything the user can change lives in [`Settings`]. Raw numbers coming
//! from the command line or the interactive shell go through the `clamped_*`
//! helpers first, so the controller only ever sees values within the
//! documented bounds.
//!
//! ## Bounds
//!
//! | Field               | Range   |
//! |---------------------|---------|
//! | interval hours      | 0..=23  |
//! | interval minutes    | 0..=59  |
//! | interval seconds    | 0..=59  |
//! | interval millis     | 0..=999 |
//! | duration hours      | 0..=99  |
//! | duration minutes    | 0..=59  |
//!
//! Out-of-range values snap to the nearest bound. Nothing here fails.

use super::interval::{Interval, RunDuration};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_INTERVAL_HOURS: u64 = 23;
pub const MAX_INTERVAL_MINUTES: u64 = 59;
pub const MAX_INTERVAL_SECONDS: u64 = 59;
pub const MAX_INTERVAL_MILLIS: u64 = 999;
pub const MAX_DURATION_HOURS: u64 = 99;
pub const MAX_DURATION_MINUTES: u64 = 59;

/// Which facets of the activity engine fire on each tick.
#[derive(ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OperationMode {
    /// Move the simulated cursor only.
    #[default]
    Jiggle,
    /// Switch the simulated foreground window only.
    Switch,
    /// Do both on every tick.
    Hybrid,
}

impl OperationMode {
    pub fn moves_cursor(self) -> bool {
        matches!(self, OperationMode::Jiggle | OperationMode::Hybrid)
    }

    pub fn switches_window(self) -> bool {
        matches!(self, OperationMode::Switch | OperationMode::Hybrid)
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "jiggle" => Some(OperationMode::Jiggle),
            "switch" => Some(OperationMode::Switch),
            "hybrid" => Some(OperationMode::Hybrid),
            _ => None,
        }
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationMode::Jiggle => "jiggle",
            OperationMode::Switch => "switch",
            OperationMode::Hybrid => "hybrid",
        };
        f.write_str(name)
    }
}

/// Complete set of user-editable settings.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub interval: Interval,
    pub duration: RunDuration,
    pub duration_enabled: bool,
    pub mode: OperationMode,
}

impl Default for Settings {
    /// One tick per second, jiggle mode, a five minute duration that is
    /// switched off.
    fn default() -> Self {
        Settings {
            interval: Interval::new(0, 0, 1, 0),
            duration: RunDuration::default(),
            duration_enabled: false,
            mode: OperationMode::Jiggle,
        }
    }
}

/// One independently editable field of an [`Interval`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntervalField {
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
}

impl IntervalField {
    pub fn max(self) -> u64 {
        match self {
            IntervalField::Hours => MAX_INTERVAL_HOURS,
            IntervalField::Minutes => MAX_INTERVAL_MINUTES,
            IntervalField::Seconds => MAX_INTERVAL_SECONDS,
            IntervalField::Milliseconds => MAX_INTERVAL_MILLIS,
        }
    }

    /// Returns a copy of `interval` with this field replaced by the clamped `value`.
    pub fn apply(self, interval: Interval, value: i64) -> Interval {
        let value = clamp_field(value, self.max());
        let mut next = interval;
        match self {
            IntervalField::Hours => next.hours = value,
            IntervalField::Minutes => next.minutes = value,
            IntervalField::Seconds => next.seconds = value,
            IntervalField::Milliseconds => next.milliseconds = value,
        }
        next
    }
}

/// Snaps `value` into `0..=max`.
pub fn clamp_field(value: i64, max: u64) -> u64 {
    if value <= 0 {
        0
    } else {
        (value as u64).min(max)
    }
}

pub fn clamped_interval(hours: i64, minutes: i64, seconds: i64, milliseconds: i64) -> Interval {
    Interval::new(
        clamp_field(hours, MAX_INTERVAL_HOURS),
        clamp_field(minutes, MAX_INTERVAL_MINUTES),
        clamp_field(seconds, MAX_INTERVAL_SECONDS),
        clamp_field(milliseconds, MAX_INTERVAL_MILLIS),
    )
}

pub fn clamped_duration(hours: i64, minutes: i64) -> RunDuration {
    RunDuration::new(clamp_field(hours, MAX_DURATION_HOURS), clamp_field(minutes, MAX_DURATION_MINUTES))
}
