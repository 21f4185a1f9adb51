// License: MIT

use tokio::sync::oneshot;

use crate::core::{events::Event, info::InfoSnapshot};

#[derive(Debug)]
pub enum ManagerMsg {
    /// Fire-and-forget events from the tick services.
    Event(Event),

    /// A manual operation from the IPC surface. The daemon replies with a
    /// human-readable outcome after the engine has processed the event.
    Command {
        event: Event,
        reply: oneshot::Sender<Result<String, String>>,
    },

    GetInfo {
        reply: oneshot::Sender<InfoSnapshot>,
    },

    StopDaemon {
        reply: oneshot::Sender<Result<String, String>>,
    },
}
