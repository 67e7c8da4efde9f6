pub mod calc;
pub mod run;
pub mod simulate;
pub mod windows;

use crate::libs::activity::Bounds;
use crate::libs::settings::{clamped_duration, clamped_interval, OperationMode, Settings};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Start the interactive simulation shell")]
    Run(run::RunArgs),
    #[command(about = "Run the simulation on a virtual clock and print every event")]
    Simulate(simulate::SimulateArgs),
    #[command(about = "Print the interval and duration in milliseconds")]
    Calc(calc::CalcArgs),
    #[command(about = "List the fake windows used by switch mode")]
    Windows,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Run(args) => run::cmd(args).await,
            Commands::Simulate(args) => simulate::cmd(args),
            Commands::Calc(args) => calc::cmd(args),
            Commands::Windows => windows::cmd(),
        }
    }
}

/// Launch-time settings shared by every command that drives the controller.
///
/// Numbers are accepted as signed so that out-of-range input can be clamped
/// the same way the interactive shell clamps it.
#[derive(Debug, Clone, Args)]
pub struct SettingsArgs {
    #[arg(long, default_value_t = 0, allow_negative_numbers = true, help = "Interval hours (0-23)")]
    pub hours: i64,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true, help = "Interval minutes (0-59)")]
    pub minutes: i64,
    #[arg(long, default_value_t = 1, allow_negative_numbers = true, help = "Interval seconds (0-59)")]
    pub seconds: i64,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true, help = "Interval milliseconds (0-999)")]
    pub millis: i64,
    #[arg(long, value_enum, default_value_t = OperationMode::Jiggle, help = "What each event does")]
    pub mode: OperationMode,
    #[arg(long, help = "Stop automatically after the run duration")]
    pub duration: bool,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true, help = "Run duration hours (0-99)")]
    pub duration_hours: i64,
    #[arg(long, default_value_t = 5, allow_negative_numbers = true, help = "Run duration minutes (0-59)")]
    pub duration_minutes: i64,
    #[arg(long, default_value_t = 80.0, help = "Activity area width")]
    pub width: f64,
    #[arg(long, default_value_t = 24.0, help = "Activity area height")]
    pub height: f64,
}

impl SettingsArgs {
    pub fn settings(&self) -> Settings {
        Settings {
            interval: clamped_interval(self.hours, self.minutes, self.seconds, self.millis),
            duration: clamped_duration(self.duration_hours, self.duration_minutes),
            duration_enabled: self.duration,
            mode: self.mode,
        }
    }

    /// The activity area, or `None` when either side cannot host a cursor.
    pub fn area(&self) -> Option<Bounds> {
        Some(Bounds::new(self.width, self.height)).filter(Bounds::is_measurable)
    }
}
