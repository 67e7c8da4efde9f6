use super::controller::{RunState, Snapshot};
use super::input::HELP;
use crate::libs::messages::Message;
use crate::{msg_error, msg_print};
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// One-line summary printed after every change.
    pub fn status_line(snapshot: &Snapshot) -> String {
        let marker = match snapshot.state {
            RunState::Running => "●",
            RunState::Idle => "○",
        };
        format!(
            "{} {:<7} | events: {:>5} | cursor: ({:>7.1}, {:>7.1}) | window: {} | mode: {}",
            marker,
            snapshot.state,
            snapshot.event_count,
            snapshot.position.x,
            snapshot.position.y,
            snapshot.active_window,
            snapshot.mode
        )
    }

    pub fn json(snapshot: &Snapshot) -> Result<String> {
        Ok(serde_json::to_string(snapshot)?)
    }

    pub fn status(snapshot: &Snapshot) {
        let mut table = Table::new();

        let area = snapshot
            .area
            .map_or_else(|| "not measurable".to_string(), |a| format!("{} x {}", a.width, a.height));
        let started = snapshot
            .started_at
            .map_or_else(|| "-".to_string(), |t| t.format("%H:%M:%S").to_string());

        table.add_row(row!["SETTING", "VALUE"]);
        table.add_row(row!["State", snapshot.state]);
        table.add_row(row!["Started at", started]);
        table.add_row(row!["Events", snapshot.event_count]);
        table.add_row(row!["Mode", snapshot.mode]);
        table.add_row(row!["Interval", format!("{} ({} ms)", snapshot.interval, snapshot.interval_ms)]);
        table.add_row(row![
            "Duration",
            format!(
                "{} ({} ms, {})",
                snapshot.duration,
                snapshot.duration_ms,
                if snapshot.duration_enabled { "on" } else { "off" }
            )
        ]);
        table.add_row(row!["Activity area", area]);
        table.add_row(row!["Cursor", format!("({:.1}, {:.1})", snapshot.position.x, snapshot.position.y)]);
        table.add_row(row!["Active window", snapshot.active_window]);
        table.add_row(row!["Tick timer", if snapshot.tick_armed { "armed" } else { "-" }]);
        table.add_row(row!["Auto-stop timer", if snapshot.auto_stop_armed { "armed" } else { "-" }]);
        table.printstd();
    }

    pub fn windows(windows: &[String], active: &str) {
        let mut table = Table::new();

        table.add_row(row!["#", "WINDOW", "ACTIVE"]);
        for (index, window) in windows.iter().enumerate() {
            table.add_row(row![index + 1, window, if window == active { "*" } else { "" }]);
        }
        table.printstd();
    }

    pub fn help() {
        let mut table = Table::new();

        for (usage, description) in HELP {
            table.add_row(row![usage, description]);
        }
        table.printstd();
    }
}

/// Prints snapshots either as status lines or as JSON lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    pub json: bool,
}

impl Renderer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn render(&self, snapshot: &Snapshot) {
        if !self.json {
            msg_print!(View::status_line(snapshot));
            return;
        }
        match View::json(snapshot) {
            Ok(line) => println!("{}", line),
            Err(e) => msg_error!(Message::SnapshotSerializeFailed(e.to_string())),
        }
    }
}
