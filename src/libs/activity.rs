//! The activity engine: what a single tick does.
//!
//! A tick never schedules anything and holds no state of its own. It reads
//! the current mode, the activity area and the window list, draws from the
//! supplied [`RandomSource`] and returns a [`TickOutcome`] describing what
//! changed. Storing the result is the caller's job.

use super::random::RandomSource;
use super::settings::OperationMode;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fake window titles the switch facet picks from.
pub const DEFAULT_WINDOWS: [&str; 5] = [
    "Project_Phoenix.docx",
    "QuantumLeap_Spreadsheet.xlsx",
    "System_Monitor.exe",
    "dev_console.log",
    "Secure_VPN_Client",
];

/// Simulated cursor position inside the activity area.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Default for Position {
    fn default() -> Self {
        Position { x: 50.0, y: 50.0 }
    }
}

/// Measured size of the activity area.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// An area with a zero, negative or non-finite side cannot host a cursor.
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Changes produced by one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub new_position: Option<Position>,
    pub new_active_window: Option<String>,
    pub increment: u64,
}

/// Runs one tick.
///
/// - The event counter always advances by one.
/// - `jiggle`/`hybrid` draw a fresh position in `[0, width) x [0, height)`,
///   unless `bounds` is missing or unmeasurable.
/// - `switch`/`hybrid` pick a window uniformly, the current one included.
///   An empty window list skips the facet.
pub fn perform_tick<R: RandomSource + ?Sized>(
    mode: OperationMode,
    bounds: Option<Bounds>,
    windows: &[String],
    active_window: &str,
    random: &mut R,
) -> TickOutcome {
    let new_position = if mode.moves_cursor() {
        match bounds.filter(Bounds::is_measurable) {
            Some(area) => Some(Position {
                x: random.unit() * area.width,
                y: random.unit() * area.height,
            }),
            None => {
                debug!("activity area not measurable, cursor left in place");
                None
            }
        }
    } else {
        None
    };

    let new_active_window = if mode.switches_window() && !windows.is_empty() {
        let picked = windows[random.index(windows.len())].clone();
        debug!(from = active_window, to = %picked, "window switched");
        Some(picked)
    } else {
        None
    };

    TickOutcome {
        new_position,
        new_active_window,
        increment: 1,
    }
}

/// The default window list as owned strings.
pub fn default_windows() -> Vec<String> {
    DEFAULT_WINDOWS.iter().map(|w| w.to_string()).collect()
}
