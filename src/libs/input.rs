//! Parsing of interactive shell commands.
//!
//! This is the input boundary of the simulator. A line typed by the user is
//! turned into a [`ShellCommand`] here, with every number already clamped
//! into its documented range (see [`settings`](super::settings)). Text that
//! is not a number at all is rejected with an [`InputError`] and never
//! reaches the controller.

use super::activity::Bounds;
use super::interval::{Interval, RunDuration};
use super::settings::{clamped_duration, clamped_interval, IntervalField, OperationMode};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}', type 'help' for the list of commands")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("unknown mode '{0}', expected jiggle, switch or hybrid")]
    UnknownMode(String),
}

/// One parsed line of shell input.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Start,
    Stop,
    Toggle,
    /// Replace the whole interval.
    Interval(Interval),
    /// Replace a single interval field with a raw value, clamped on apply.
    IntervalField(IntervalField, i64),
    Duration(RunDuration),
    DurationEnabled(bool),
    Mode(OperationMode),
    /// New activity area size. `None` marks the area as unmeasurable.
    Area(Option<Bounds>),
    Status,
    Windows,
    Help,
    Quit,
}

/// Lines shown by `help`.
pub const HELP: &[(&str, &str)] = &[
    ("start | stop | toggle", "Control the run"),
    ("interval H M S MS", "Set the tick interval"),
    ("hours|minutes|seconds|millis N", "Set one interval field"),
    ("duration H M", "Set the run duration"),
    ("duration on|off", "Enable or disable auto-stop"),
    ("mode jiggle|switch|hybrid", "Choose what a tick does"),
    ("area W H | area off", "Resize or hide the activity area"),
    ("status", "Show all settings"),
    ("windows", "List the fake windows"),
    ("help", "Show this help"),
    ("quit", "Leave the shell"),
];

impl FromStr for ShellCommand {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(InputError::Empty)?.to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        match command.as_str() {
            "start" => no_args(&args, "start", ShellCommand::Start),
            "stop" => no_args(&args, "stop", ShellCommand::Stop),
            "toggle" | "t" => no_args(&args, "toggle", ShellCommand::Toggle),
            "status" | "s" => no_args(&args, "status", ShellCommand::Status),
            "windows" => no_args(&args, "windows", ShellCommand::Windows),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            "interval" => match args.as_slice() {
                [h, m, s, ms] => Ok(ShellCommand::Interval(clamped_interval(
                    whole(h)?,
                    whole(m)?,
                    whole(s)?,
                    whole(ms)?,
                ))),
                _ => Err(InputError::Usage("interval H M S MS")),
            },
            "hours" => field(&args, IntervalField::Hours, "hours N"),
            "minutes" => field(&args, IntervalField::Minutes, "minutes N"),
            "seconds" => field(&args, IntervalField::Seconds, "seconds N"),
            "millis" | "ms" => field(&args, IntervalField::Milliseconds, "millis N"),
            "duration" => match args.as_slice() {
                [flag] if flag.eq_ignore_ascii_case("on") => Ok(ShellCommand::DurationEnabled(true)),
                [flag] if flag.eq_ignore_ascii_case("off") => Ok(ShellCommand::DurationEnabled(false)),
                [h, m] => Ok(ShellCommand::Duration(clamped_duration(whole(h)?, whole(m)?))),
                _ => Err(InputError::Usage("duration H M | duration on|off")),
            },
            "mode" => match args.as_slice() {
                [name] => OperationMode::from_name(name)
                    .map(ShellCommand::Mode)
                    .ok_or_else(|| InputError::UnknownMode(name.to_string())),
                _ => Err(InputError::Usage("mode jiggle|switch|hybrid")),
            },
            "area" => match args.as_slice() {
                [flag] if flag.eq_ignore_ascii_case("off") => Ok(ShellCommand::Area(None)),
                [w, h] => Ok(ShellCommand::Area(Some(Bounds::new(dimension(w)?, dimension(h)?)))),
                _ => Err(InputError::Usage("area W H | area off")),
            },
            _ => Err(InputError::UnknownCommand(command)),
        }
    }
}

fn no_args(args: &[&str], usage: &'static str, command: ShellCommand) -> Result<ShellCommand, InputError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(InputError::Usage(usage))
    }
}

fn field(args: &[&str], field: IntervalField, usage: &'static str) -> Result<ShellCommand, InputError> {
    match args {
        [value] => Ok(ShellCommand::IntervalField(field, whole(value)?)),
        _ => Err(InputError::Usage(usage)),
    }
}

/// Parses a whole number. Digit strings too long for `i64` saturate.
pub fn whole(text: &str) -> Result<i64, InputError> {
    if let Ok(value) = text.parse::<i64>() {
        return Ok(value);
    }
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Ok(if negative { i64::MIN } else { i64::MAX })
    } else {
        Err(InputError::NotANumber(text.to_string()))
    }
}

/// Parses an area side. Negative sizes clamp to zero.
fn dimension(text: &str) -> Result<f64, InputError> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value.max(0.0)),
        _ => Err(InputError::NotANumber(text.to_string())),
    }
}
