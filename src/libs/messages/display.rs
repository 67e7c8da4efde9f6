//! Display implementation for jiggler messages.
//!
//! All user-facing text lives here, in one `match`. Variants with payloads
//! interpolate them; the rest are fixed strings.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === RUN MESSAGES ===
            Message::RunStarted(interval) => format!("Started, one event every {}", interval),
            Message::RunStopped => "Stopped. Event counter reset.".to_string(),
            Message::RunAlreadyStopped => "Already stopped.".to_string(),
            Message::RunAutoStopped(duration) => format!("Run duration of {} reached, stopped automatically.", duration),
            Message::ZeroIntervalSingleTick => "Interval is zero: one event was performed, no further events are scheduled.".to_string(),
            Message::AutoStopArmed(duration) => format!("Auto-stop armed for {}", duration),

            // === SETTINGS MESSAGES ===
            Message::IntervalUpdated(interval, ms) => format!("Interval set to {} ({} ms)", interval, ms),
            Message::DurationUpdated(duration, ms) => format!("Duration set to {} ({} ms)", duration, ms),
            Message::DurationEnabled => "Auto-stop enabled".to_string(),
            Message::DurationDisabled => "Auto-stop disabled".to_string(),
            Message::ModeUpdated(mode) => format!("Mode set to {}", mode),
            Message::AreaUpdated(width, height) => format!("Activity area resized to {} x {}", width, height),
            Message::AreaHidden => "Activity area hidden, the cursor will stay in place".to_string(),
            Message::SettingsRearmed => "Timers re-armed with the new settings".to_string(),

            // === HOTKEY MESSAGES ===
            Message::HotkeyRegistered(chord) => format!("Global hotkey {} toggles the run", chord),
            Message::HotkeyDisabled => "Global hotkey disabled".to_string(),
            Message::HotkeyUnavailable(error) => format!("Global hotkey unavailable: {}", error),
            Message::HotkeyListenerFailed(error, attempt, max) => {
                format!("Keyboard listener failed ({}/{}): {}", attempt, max, error)
            }
            Message::HotkeyMatched(chord) => format!("{} pressed", chord),
            Message::HotkeyToggled(state) => format!("Hotkey: now {}", state),

            // === SHELL MESSAGES ===
            Message::ShellWelcome => "Sandboxed simulation. It cannot control your actual system cursor or windows.".to_string(),
            Message::ShellHint(chord) => format!("Type 'help' for commands, 'toggle' or {} to start and stop, Ctrl+C to quit.", chord),
            Message::ShellHelpHeader => "Commands:".to_string(),
            Message::ShellInputRejected(error) => format!("Input rejected: {}", error),
            Message::ShellStdinClosed => "Input closed. Still running: use the hotkey or Ctrl+C.".to_string(),
            Message::ShellStdinFailed(error) => format!("Failed to read input: {}", error),
            Message::ShellCtrlC => "Received Ctrl+C, shutting down...".to_string(),
            Message::ShellGoodbye => "Bye.".to_string(),

            // === CALC / SIMULATION MESSAGES ===
            Message::CalcInterval(interval, ms) => format!("Interval {} = {} ms", interval, ms),
            Message::CalcDuration(duration, ms, enabled) => format!(
                "Duration {} = {} ms ({})",
                duration,
                ms,
                if *enabled { "auto-stop on" } else { "auto-stop off" }
            ),
            Message::SimulationHeader(ms) => format!("Simulating {} ms of virtual time", ms),
            Message::SimulationTick(at, count) => format!("[{:>8} ms] event #{}", at, count),
            Message::SimulationAutoStop(at) => format!("[{:>8} ms] auto-stop", at),
            Message::SimulationFinished(at) => format!("Simulation finished at {} ms", at),

            // === GENERAL ===
            Message::WindowsHeader => "Fake windows:".to_string(),
            Message::SnapshotSerializeFailed(error) => format!("Failed to serialize snapshot: {}", error),
            Message::CommandFailed(error) => format!("{}", error),
        };
        write!(f, "{}", text)
    }
}
