// License: MIT

use tokio::sync::mpsc::Sender;

use crate::core::{events::Event, manager_msg::ManagerMsg, utils};

use super::send_command;

pub async fn handle_add(tx: &Sender<ManagerMsg>) -> Result<String, String> {
    send_command(
        tx,
        Event::ArmAddProgram {
            now_ms: utils::now_ms(),
        },
    )
    .await
}

pub async fn handle_remove(tx: &Sender<ManagerMsg>) -> Result<String, String> {
    send_command(
        tx,
        Event::ArmRemoveProgram {
            now_ms: utils::now_ms(),
        },
    )
    .await
}
