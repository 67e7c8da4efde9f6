use super::SettingsArgs;
use crate::libs::activity::default_windows;
use crate::libs::controller::{RunController, TimerOutcome};
use crate::libs::messages::Message;
use crate::libs::random::SeededRandom;
use crate::libs::timers::ManualTimers;
use crate::libs::view::{Renderer, View};
use crate::{msg_print, msg_success};
use anyhow::Result;
use clap::Args;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    settings: SettingsArgs,
    #[arg(long = "for", value_name = "MS", default_value_t = 10_000, help = "Virtual time to simulate in milliseconds")]
    run_for: u64,
    #[arg(long, help = "Seed for reproducible positions and windows")]
    seed: Option<u64>,
    #[arg(long, help = "Print every snapshot as a JSON line")]
    json: bool,
}

pub fn cmd(args: SimulateArgs) -> Result<()> {
    let renderer = Renderer::new(args.json);
    let mut controller = RunController::new(
        args.settings.settings(),
        default_windows(),
        ManualTimers::new(),
        SeededRandom::new(args.seed),
    )
    .with_area(args.settings.area());

    msg_print!(Message::SimulationHeader(args.run_for));
    controller.start();
    report_tick(&controller, &renderer);

    let end = args.run_for;
    while let Some(outcome) = controller.fire_next(end) {
        match outcome {
            TimerOutcome::Ticked(_) => report_tick(&controller, &renderer),
            TimerOutcome::AutoStopped => {
                msg_print!(Message::SimulationAutoStop(controller.now_ms()));
                renderer.render(&controller.snapshot());
            }
            TimerOutcome::Stale => {}
        }
    }
    controller.advance(Duration::from_millis(end.saturating_sub(controller.now_ms())));

    msg_success!(Message::SimulationFinished(controller.now_ms()));
    if !args.json {
        View::status(&controller.snapshot());
    }
    Ok(())
}

fn report_tick(controller: &RunController<ManualTimers, SeededRandom>, renderer: &Renderer) {
    if !renderer.json {
        msg_print!(Message::SimulationTick(controller.now_ms(), controller.event_count()));
    }
    renderer.render(&controller.snapshot());
}
