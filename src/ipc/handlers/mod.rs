// License: MIT

pub mod control;
pub mod info;
pub mod programs;
pub mod settings;
pub mod time;

use tokio::sync::{mpsc::Sender, oneshot};

use crate::core::{events::Event, manager_msg::ManagerMsg};

/// Post a manual operation onto the engine's queue and wait for the
/// daemon's reply. This is the marshaling boundary: handlers never touch
/// engine state from their own task.
pub(super) async fn send_command(tx: &Sender<ManagerMsg>, event: Event) -> Result<String, String> {
    let (reply_tx, reply_rx) = oneshot::channel();

    tx.send(ManagerMsg::Command {
        event,
        reply: reply_tx,
    })
    .await
    .map_err(|_| "daemon is shutting down".to_string())?;

    reply_rx
        .await
        .map_err(|_| "daemon dropped the request".to_string())?
}
