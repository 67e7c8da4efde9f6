use super::SettingsArgs;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct CalcArgs {
    #[command(flatten)]
    settings: SettingsArgs,
}

pub fn cmd(args: CalcArgs) -> Result<()> {
    let settings = args.settings.settings();
    msg_print!(Message::CalcInterval(settings.interval.to_string(), settings.interval.total_milliseconds()));
    msg_print!(Message::CalcDuration(
        settings.duration.to_string(),
        settings.duration.duration_milliseconds(),
        settings.duration_enabled
    ));
    Ok(())
}
