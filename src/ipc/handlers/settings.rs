// License: MIT

use tokio::sync::mpsc::Sender;

use crate::core::{events::Event, manager_msg::ManagerMsg, utils};

use super::send_command;

pub async fn handle_set_goal(tx: &Sender<ManagerMsg>, args: &str) -> Result<String, String> {
    let seconds = utils::parse_hms(args)
        .ok_or_else(|| format!("'{}' is not a time (use HH:MM:SS or seconds)", args))?;

    send_command(
        tx,
        Event::SetGoal {
            seconds,
            now_ms: utils::now_ms(),
        },
    )
    .await
}

pub async fn handle_set_timeout(tx: &Sender<ManagerMsg>, args: &str) -> Result<String, String> {
    let seconds: u64 = args
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", args))?;

    send_command(
        tx,
        Event::SetIdleTimeout {
            seconds,
            now_ms: utils::now_ms(),
        },
    )
    .await
}

pub async fn handle_toggle_sound(tx: &Sender<ManagerMsg>) -> Result<String, String> {
    send_command(
        tx,
        Event::ToggleSound {
            now_ms: utils::now_ms(),
        },
    )
    .await
}

pub async fn handle_toggle_border(tx: &Sender<ManagerMsg>) -> Result<String, String> {
    send_command(
        tx,
        Event::ToggleBorder {
            now_ms: utils::now_ms(),
        },
    )
    .await
}
