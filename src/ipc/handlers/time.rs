// License: MIT

use tokio::sync::mpsc::Sender;

use crate::core::{events::Event, manager_msg::ManagerMsg, utils};

use super::send_command;

pub async fn handle_reset(tx: &Sender<ManagerMsg>) -> Result<String, String> {
    send_command(
        tx,
        Event::ResetTime {
            now_ms: utils::now_ms(),
        },
    )
    .await
}

pub async fn handle_resume(tx: &Sender<ManagerMsg>, args: &str) -> Result<String, String> {
    let index: usize = if args.is_empty() {
        0
    } else {
        args.parse()
            .map_err(|_| format!("'{}' is not a history index", args))?
    };

    send_command(
        tx,
        Event::ResumePrevious {
            index,
            now_ms: utils::now_ms(),
        },
    )
    .await
}

pub async fn handle_set_time(tx: &Sender<ManagerMsg>, args: &str) -> Result<String, String> {
    let seconds = utils::parse_hms(args)
        .ok_or_else(|| format!("'{}' is not a time (use HH:MM:SS or seconds)", args))?;

    send_command(
        tx,
        Event::SetTotal {
            seconds,
            now_ms: utils::now_ms(),
        },
    )
    .await
}
