//! Interactive terminal shell around the run controller.
//!
//! The shell is the single task that owns the controller. Three sources feed
//! it events:
//!
//! - fired timer handles from [`TokioTimers`],
//! - completed chords from the global [`hotkey`](super::hotkey) hook,
//! - lines typed on stdin, parsed into [`ShellCommand`]s.
//!
//! `tokio::select!` serializes them, so the controller is only ever touched
//! from this loop and needs no locking. The hotkey subscription lives exactly
//! as long as [`run`] does.
//!
//! Stdin is read on its own OS thread. A blocked read there cannot hold up
//! runtime shutdown, so Ctrl+C always ends the process.

use super::controller::{RunController, RunState, TimerOutcome};
use super::hotkey::{self, Chord, HotkeyPressed};
use super::input::ShellCommand;
use super::random::RandomSource;
use super::timers::{TimerHandle, Timers, TokioTimers};
use super::view::{Renderer, View};
use crate::libs::messages::Message;
use crate::{msg_info, msg_print, msg_success, msg_warning};
use anyhow::Result;
use std::io::{self, BufRead};
use tokio::sync::mpsc::{self, UnboundedReceiver};

#[derive(Debug, Clone, Copy, Default)]
pub struct ShellOptions {
    /// Print snapshots as JSON lines.
    pub json: bool,
    /// Chord to register, `None` to run without a global hotkey.
    pub hotkey: Option<Chord>,
}

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs the shell until `quit` or Ctrl+C. The run is stopped on the way out.
pub async fn run<R: RandomSource>(
    mut controller: RunController<TokioTimers, R>,
    mut fired: UnboundedReceiver<TimerHandle>,
    options: ShellOptions,
) -> Result<()> {
    let renderer = Renderer::new(options.json);

    let (hotkey_tx, mut hotkey_rx) = mpsc::unbounded_channel::<HotkeyPressed>();
    let _subscription = match options.hotkey {
        Some(chord) => match hotkey::register(chord, hotkey_tx) {
            Ok(subscription) => {
                msg_info!(Message::HotkeyRegistered(chord.to_string()));
                Some(subscription)
            }
            Err(e) => {
                msg_warning!(Message::HotkeyUnavailable(e.to_string()));
                None
            }
        },
        None => {
            msg_info!(Message::HotkeyDisabled);
            None
        }
    };

    msg_print!(Message::ShellWelcome, true);
    let hint = options.hotkey.map_or_else(|| "the hotkey (disabled)".to_string(), |chord| chord.to_string());
    msg_print!(Message::ShellHint(hint));
    renderer.render(&controller.snapshot());

    let mut lines = spawn_stdin_reader(io::BufReader::new(io::stdin()))?;
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            Some(handle) = fired.recv() => {
                match controller.handle_timer(handle) {
                    TimerOutcome::Ticked(_) => renderer.render(&controller.snapshot()),
                    TimerOutcome::AutoStopped => {
                        msg_success!(Message::RunAutoStopped(controller.settings().duration.to_string()));
                        renderer.render(&controller.snapshot());
                    }
                    TimerOutcome::Stale => {}
                }
            }
            Some(HotkeyPressed) = hotkey_rx.recv() => {
                let state = controller.toggle();
                msg_info!(Message::HotkeyToggled(state.to_string()));
                renderer.render(&controller.snapshot());
            }
            line = lines.recv(), if stdin_open => {
                match line {
                    Some(Ok(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        if execute_line(&mut controller, &line, &renderer) == Flow::Quit {
                            break;
                        }
                    }
                    None => {
                        stdin_open = false;
                        msg_info!(Message::ShellStdinClosed);
                    }
                    Some(Err(e)) => {
                        stdin_open = false;
                        msg_warning!(Message::ShellStdinFailed(e.to_string()));
                    }
                }
            }
            _ = &mut ctrl_c => {
                msg_info!(Message::ShellCtrlC);
                break;
            }
        }
    }

    controller.stop();
    msg_print!(Message::ShellGoodbye);
    Ok(())
}

/// Forwards lines from `reader` over a channel from a dedicated thread.
///
/// The channel closes at end of input. A read error is forwarded and ends
/// the thread.
pub fn spawn_stdin_reader<B>(reader: B) -> io::Result<UnboundedReceiver<io::Result<String>>>
where
    B: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::Builder::new().name("jiggler-stdin".into()).spawn(move || {
        for line in reader.lines() {
            let failed = line.is_err();
            if tx.send(line).is_err() || failed {
                break;
            }
        }
    })?;
    Ok(rx)
}

/// Parses and executes one line of input, rendering the result.
pub fn execute_line<T: Timers, R: RandomSource>(controller: &mut RunController<T, R>, line: &str, renderer: &Renderer) -> Flow {
    match line.parse::<ShellCommand>() {
        Ok(command) => {
            let flow = execute(controller, command.clone());
            if changes_state(&command) {
                renderer.render(&controller.snapshot());
            }
            flow
        }
        Err(e) => {
            msg_warning!(Message::ShellInputRejected(e.to_string()));
            Flow::Continue
        }
    }
}

/// Applies one command to the controller.
pub fn execute<T: Timers, R: RandomSource>(controller: &mut RunController<T, R>, command: ShellCommand) -> Flow {
    let running = controller.is_running();
    match command {
        ShellCommand::Start => {
            controller.start();
            if !running {
                announce_start(controller);
            }
        }
        ShellCommand::Stop => {
            controller.stop();
            if running {
                msg_success!(Message::RunStopped);
            } else {
                msg_info!(Message::RunAlreadyStopped);
            }
        }
        ShellCommand::Toggle => match controller.toggle() {
            RunState::Running => announce_start(controller),
            RunState::Idle => msg_success!(Message::RunStopped),
        },
        ShellCommand::Interval(interval) => {
            controller.set_interval(interval);
            announce_interval(controller, running);
        }
        ShellCommand::IntervalField(field, value) => {
            let interval = field.apply(controller.settings().interval, value);
            controller.set_interval(interval);
            announce_interval(controller, running);
        }
        ShellCommand::Duration(duration) => {
            controller.set_duration(duration);
            msg_info!(Message::DurationUpdated(duration.to_string(), duration.duration_milliseconds()));
            announce_rearm(running);
        }
        ShellCommand::DurationEnabled(enabled) => {
            controller.set_duration_enabled(enabled);
            if enabled {
                msg_info!(Message::DurationEnabled);
            } else {
                msg_info!(Message::DurationDisabled);
            }
            announce_rearm(running);
        }
        ShellCommand::Mode(mode) => {
            controller.set_mode(mode);
            msg_info!(Message::ModeUpdated(mode.to_string()));
            announce_rearm(running);
        }
        ShellCommand::Area(area) => {
            controller.set_area(area);
            match area {
                Some(bounds) if bounds.is_measurable() => msg_info!(Message::AreaUpdated(bounds.width, bounds.height)),
                _ => msg_info!(Message::AreaHidden),
            }
        }
        ShellCommand::Status => View::status(&controller.snapshot()),
        ShellCommand::Windows => {
            msg_print!(Message::WindowsHeader);
            View::windows(controller.windows(), controller.active_window());
        }
        ShellCommand::Help => {
            msg_print!(Message::ShellHelpHeader);
            View::help();
        }
        ShellCommand::Quit => return Flow::Quit,
    }
    Flow::Continue
}

fn changes_state(command: &ShellCommand) -> bool {
    !matches!(
        command,
        ShellCommand::Status | ShellCommand::Windows | ShellCommand::Help | ShellCommand::Quit
    )
}

fn announce_start<T: Timers, R: RandomSource>(controller: &RunController<T, R>) {
    let settings = controller.settings();
    msg_success!(Message::RunStarted(settings.interval.to_string()));
    if !controller.is_tick_armed() {
        msg_info!(Message::ZeroIntervalSingleTick);
    }
    if controller.is_auto_stop_armed() {
        msg_info!(Message::AutoStopArmed(settings.duration.to_string()));
    }
}

fn announce_interval<T: Timers, R: RandomSource>(controller: &RunController<T, R>, running: bool) {
    let interval = controller.settings().interval;
    msg_info!(Message::IntervalUpdated(interval.to_string(), interval.total_milliseconds()));
    announce_rearm(running);
}

fn announce_rearm(running: bool) {
    if running {
        msg_info!(Message::SettingsRearmed);
    }
}
