// License: MIT

use tokio::sync::mpsc::Sender;
use tokio::time::{Duration, sleep};

use crate::core::events::Event;
use crate::core::manager_msg::ManagerMsg;
use crate::core::utils::now_ms;
use crate::twarn;

pub const AUTOSAVE_INTERVAL_SECS: u64 = 30;

pub async fn run_autosave(tx: Sender<ManagerMsg>) {
    loop {
        sleep(Duration::from_secs(AUTOSAVE_INTERVAL_SECS)).await;

        let tick = Event::AutosaveTick { now_ms: now_ms() };
        if tx.send(ManagerMsg::Event(tick)).await.is_err() {
            twarn!("Autosave", "ticker stopping (receiver dropped)");
            break;
        }
    }
}
