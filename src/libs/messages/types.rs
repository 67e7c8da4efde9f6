#[derive(Debug, Clone)]
pub enum Message {
    // === RUN MESSAGES ===
    RunStarted(String),  // interval
    RunStopped,
    RunAlreadyStopped,
    RunAutoStopped(String), // duration
    ZeroIntervalSingleTick,
    AutoStopArmed(String), // duration

    // === SETTINGS MESSAGES ===
    IntervalUpdated(String, u64), // interval, total ms
    DurationUpdated(String, u64), // duration, total ms
    DurationEnabled,
    DurationDisabled,
    ModeUpdated(String),
    AreaUpdated(f64, f64),
    AreaHidden,
    SettingsRearmed,

    // === HOTKEY MESSAGES ===
    HotkeyRegistered(String), // chord
    HotkeyDisabled,
    HotkeyUnavailable(String),                // error
    HotkeyListenerFailed(String, u32, u32), // error, attempt, max attempts
    HotkeyMatched(String),                    // chord
    HotkeyToggled(String),                    // new state

    // === SHELL MESSAGES ===
    ShellWelcome,
    ShellHint(String), // chord or "disabled"
    ShellHelpHeader,
    ShellInputRejected(String), // error
    ShellStdinClosed,
    ShellStdinFailed(String),
    ShellCtrlC,
    ShellGoodbye,

    // === CALC / SIMULATION MESSAGES ===
    CalcInterval(String, u64),       // interval, total ms
    CalcDuration(String, u64, bool), // duration, total ms, enabled
    SimulationHeader(u64),           // virtual ms
    SimulationTick(u64, u64),        // at ms, event count
    SimulationAutoStop(u64),         // at ms
    SimulationFinished(u64),         // final virtual ms

    // === GENERAL ===
    WindowsHeader,
    SnapshotSerializeFailed(String),
    CommandFailed(String),
}
