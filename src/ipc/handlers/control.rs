// License: MIT

use tokio::sync::{mpsc::Sender, oneshot};

use crate::core::manager_msg::ManagerMsg;

pub async fn handle_stop(tx: &Sender<ManagerMsg>) -> Result<String, String> {
    let (reply_tx, reply_rx) = oneshot::channel();

    tx.send(ManagerMsg::StopDaemon { reply: reply_tx })
        .await
        .map_err(|_| "daemon is already shutting down".to_string())?;

    reply_rx
        .await
        .map_err(|_| "daemon dropped the request".to_string())?
}
