use super::SettingsArgs;
use crate::libs::activity::default_windows;
use crate::libs::controller::RunController;
use crate::libs::hotkey::{Chord, FunctionKey};
use crate::libs::random::SeededRandom;
use crate::libs::shell::{self, ShellOptions};
use crate::libs::timers::TokioTimers;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    settings: SettingsArgs,
    #[arg(long, help = "Start the run right away")]
    start: bool,
    #[arg(long, value_enum, ignore_case = true, default_value_t = FunctionKey::F3, help = "Function key used with Ctrl as the global toggle")]
    hotkey: FunctionKey,
    #[arg(long, help = "Do not register the global hotkey")]
    no_hotkey: bool,
    #[arg(long, help = "Seed for reproducible positions and windows")]
    seed: Option<u64>,
    #[arg(long, help = "Print snapshots as JSON lines")]
    json: bool,
}

pub async fn cmd(args: RunArgs) -> Result<()> {
    let (timers, fired) = TokioTimers::new();
    let mut controller = RunController::new(args.settings.settings(), default_windows(), timers, SeededRandom::new(args.seed))
        .with_area(args.settings.area());

    if args.start {
        controller.start();
    }

    let options = ShellOptions {
        json: args.json,
        hotkey: (!args.no_hotkey).then(|| Chord::new(args.hotkey)),
    };
    shell::run(controller, fired, options).await
}
