//! Run controller: the run/idle state machine.
//!
//! The controller is the only owner of the run state and of the two timer
//! handles (repeating tick and one-shot auto-stop). Everything else only
//! reads [`Snapshot`]s or calls the operations below.
//!
//! ## State Transitions
//!
//! ```text
//!            start() / toggle()
//!   ┌──────┐ ─────────────────▶ ┌─────────┐
//!   │ Idle │                    │ Running │ ──┐ tick timer: one tick
//!   └──────┘ ◀───────────────── └─────────┘ ◀─┘
//!            stop() / toggle() / auto-stop timer
//! ```
//!
//! ## Guarantees
//!
//! - `start()` performs exactly one tick synchronously, before any timer can
//!   fire. When the controller is already running that tick is all it does.
//! - A zero interval arms no tick timer; a zero or disabled duration arms no
//!   auto-stop timer. Neither is an error.
//! - `stop()` cancels both timers before returning and resets the event
//!   counter. Calling it while idle only makes sure the timers are gone.
//! - Changing the interval, mode or duration while running cancels the
//!   affected timer and arms a fresh one from the moment of the change.
//! - A timer handle that is no longer current is a no-op.
//!
//! ## Usage
//!
//! ```rust
//! use jiggler::libs::controller::{RunController, RunState};
//! use jiggler::libs::random::SequenceRandom;
//! use jiggler::libs::settings::Settings;
//! use jiggler::libs::timers::ManualTimers;
//! use std::time::Duration;
//!
//! let mut controller = RunController::new(
//!     Settings::default(),
//!     Vec::new(),
//!     ManualTimers::new(),
//!     SequenceRandom::new(vec![0.5]),
//! );
//! controller.start();
//! controller.advance(Duration::from_millis(3_000));
//! assert_eq!(controller.state(), RunState::Running);
//! assert_eq!(controller.event_count(), 4);
//! ```

use super::activity::{default_windows, perform_tick, Bounds, Position, TickOutcome};
use super::interval::{Interval, RunDuration};
use super::random::RandomSource;
use super::settings::{OperationMode, Settings};
use super::timers::{ManualTimers, TimerHandle, TimerKind, Timers};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Whether a run is in progress.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    #[default]
    Idle,
    Running,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => f.write_str("idle"),
            RunState::Running => f.write_str("running"),
        }
    }
}

/// What delivering a timer handle did.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerOutcome {
    /// The tick timer fired and a tick was performed.
    Ticked(TickOutcome),
    /// The auto-stop timer fired and the run ended.
    AutoStopped,
    /// The handle was cancelled or replaced before delivery.
    Stale,
}

/// Read-only view of everything the shell renders.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub state: RunState,
    pub event_count: u64,
    pub position: Position,
    pub active_window: String,
    pub interval: Interval,
    pub interval_ms: u64,
    pub duration: RunDuration,
    pub duration_ms: u64,
    pub duration_enabled: bool,
    pub mode: OperationMode,
    pub area: Option<Bounds>,
    pub started_at: Option<DateTime<Local>>,
    pub tick_armed: bool,
    pub auto_stop_armed: bool,
}

pub struct RunController<T: Timers, R: RandomSource> {
    settings: Settings,
    state: RunState,
    event_count: u64,
    position: Position,
    windows: Vec<String>,
    active_window: String,
    area: Option<Bounds>,
    started_at: Option<DateTime<Local>>,
    tick_timer: Option<TimerHandle>,
    auto_stop_timer: Option<TimerHandle>,
    timers: T,
    random: R,
}

impl<T: Timers, R: RandomSource> RunController<T, R> {
    /// Creates an idle controller.
    ///
    /// An empty `windows` list falls back to the built-in fake windows. The
    /// first window starts out active.
    pub fn new(settings: Settings, windows: Vec<String>, timers: T, random: R) -> Self {
        let windows = if windows.is_empty() { default_windows() } else { windows };
        let active_window = windows[0].clone();
        RunController {
            settings,
            state: RunState::Idle,
            event_count: 0,
            position: Position::default(),
            windows,
            active_window,
            area: None,
            started_at: None,
            tick_timer: None,
            auto_stop_timer: None,
            timers,
            random,
        }
    }

    pub fn with_area(mut self, area: Option<Bounds>) -> Self {
        self.area = area;
        self
    }

    // Queries

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn active_window(&self) -> &str {
        &self.active_window
    }

    pub fn windows(&self) -> &[String] {
        &self.windows
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn area(&self) -> Option<Bounds> {
        self.area
    }

    pub fn is_tick_armed(&self) -> bool {
        self.tick_timer.is_some()
    }

    pub fn is_auto_stop_armed(&self) -> bool {
        self.auto_stop_timer.is_some()
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            event_count: self.event_count,
            position: self.position,
            active_window: self.active_window.clone(),
            interval: self.settings.interval,
            interval_ms: self.settings.interval.total_milliseconds(),
            duration: self.settings.duration,
            duration_ms: self.settings.duration.duration_milliseconds(),
            duration_enabled: self.settings.duration_enabled,
            mode: self.settings.mode,
            area: self.area,
            started_at: self.started_at,
            tick_armed: self.is_tick_armed(),
            auto_stop_armed: self.is_auto_stop_armed(),
        }
    }

    // Operations

    /// Performs the immediate tick and, when idle, begins a run.
    pub fn start(&mut self) -> TickOutcome {
        let outcome = self.tick();
        if self.state == RunState::Running {
            debug!("start while running, timers left as they are");
            return outcome;
        }

        self.state = RunState::Running;
        self.started_at = Some(Local::now());
        self.arm_tick();
        self.arm_auto_stop();
        info!(
            interval_ms = self.settings.interval.total_milliseconds(),
            mode = %self.settings.mode,
            auto_stop = self.auto_stop_timer.is_some(),
            "run started"
        );
        outcome
    }

    /// Ends the run, clearing both timers and the event counter.
    pub fn stop(&mut self) {
        self.cancel_tick();
        self.cancel_auto_stop();
        if self.state == RunState::Running {
            info!(events = self.event_count, "run stopped");
        }
        self.state = RunState::Idle;
        self.event_count = 0;
        self.started_at = None;
    }

    /// Stops a running controller or starts an idle one. Returns the new state.
    pub fn toggle(&mut self) -> RunState {
        match self.state {
            RunState::Running => self.stop(),
            RunState::Idle => {
                self.start();
            }
        }
        self.state
    }

    /// Delivers a fired timer handle.
    pub fn handle_timer(&mut self, handle: TimerHandle) -> TimerOutcome {
        if self.state != RunState::Running {
            debug!(id = handle.id(), "timer fired while idle, ignored");
            return TimerOutcome::Stale;
        }

        if self.tick_timer == Some(handle) {
            TimerOutcome::Ticked(self.tick())
        } else if self.auto_stop_timer == Some(handle) {
            info!("run duration reached");
            self.stop();
            TimerOutcome::AutoStopped
        } else {
            debug!(id = handle.id(), kind = ?handle.kind(), "stale timer ignored");
            TimerOutcome::Stale
        }
    }

    // Settings

    pub fn set_interval(&mut self, interval: Interval) {
        self.settings.interval = interval;
        if self.is_running() {
            self.arm_tick();
        }
    }

    pub fn set_mode(&mut self, mode: OperationMode) {
        self.settings.mode = mode;
        if self.is_running() {
            self.arm_tick();
        }
    }

    pub fn set_duration(&mut self, duration: RunDuration) {
        self.settings.duration = duration;
        if self.is_running() {
            self.arm_auto_stop();
        }
    }

    pub fn set_duration_enabled(&mut self, enabled: bool) {
        self.settings.duration_enabled = enabled;
        if self.is_running() {
            self.arm_auto_stop();
        }
    }

    /// Replaces all settings at once, re-arming both timers when running.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
        if self.is_running() {
            self.arm_tick();
            self.arm_auto_stop();
        }
    }

    /// Updates the measured activity area. Takes effect on the next tick.
    pub fn set_area(&mut self, area: Option<Bounds>) {
        self.area = area;
    }

    // Internals

    fn tick(&mut self) -> TickOutcome {
        let outcome = perform_tick(
            self.settings.mode,
            self.area,
            &self.windows,
            &self.active_window,
            &mut self.random,
        );
        self.event_count = self.event_count.saturating_add(outcome.increment);
        if let Some(position) = outcome.new_position {
            self.position = position;
        }
        if let Some(window) = &outcome.new_active_window {
            self.active_window = window.clone();
        }
        debug!(events = self.event_count, "tick");
        outcome
    }

    /// Cancels the tick timer and arms a new one for the current interval.
    fn arm_tick(&mut self) {
        self.cancel_tick();
        if let Some(period) = self.settings.interval.period() {
            self.tick_timer = Some(self.timers.arm_repeating(period, TimerKind::Tick));
        }
    }

    /// Cancels the auto-stop timer and arms a new one if the duration applies.
    fn arm_auto_stop(&mut self) {
        self.cancel_auto_stop();
        if !self.settings.duration_enabled {
            return;
        }
        if let Some(delay) = self.settings.duration.delay() {
            self.auto_stop_timer = Some(self.timers.arm_once(delay, TimerKind::AutoStop));
        }
    }

    fn cancel_tick(&mut self) {
        if let Some(handle) = self.tick_timer.take() {
            self.timers.cancel(handle);
        }
    }

    fn cancel_auto_stop(&mut self) {
        if let Some(handle) = self.auto_stop_timer.take() {
            self.timers.cancel(handle);
        }
    }
}

impl<R: RandomSource> RunController<ManualTimers, R> {
    /// Virtual milliseconds elapsed on the manual clock.
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Delivers the earliest timer due at or before `deadline_ms`, if any.
    ///
    /// The clock moves to that timer's due time.
    pub fn fire_next(&mut self, deadline_ms: u64) -> Option<TimerOutcome> {
        let handle = self.timers.pop_due(deadline_ms)?;
        Some(self.handle_timer(handle))
    }

    /// Moves the manual clock forward, delivering every timer that comes due.
    ///
    /// Timers due exactly at the end of the window fire.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerOutcome> {
        let by_ms = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        let deadline = self.timers.now_ms().saturating_add(by_ms);
        let mut outcomes = Vec::new();
        while let Some(outcome) = self.fire_next(deadline) {
            outcomes.push(outcome);
        }
        self.timers.advance_to(deadline);
        outcomes
    }
}
