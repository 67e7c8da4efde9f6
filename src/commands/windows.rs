use crate::libs::activity::default_windows;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::msg_print;
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let windows = default_windows();
    msg_print!(Message::WindowsHeader);
    View::windows(&windows, &windows[0]);
    Ok(())
}
