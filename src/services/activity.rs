// License: MIT

use tokio::sync::mpsc::Sender;
use tokio::time::{Duration, sleep};

use crate::core::events::Event;
use crate::core::manager_msg::ManagerMsg;
use crate::core::utils::now_ms;
use crate::{tinfo, twarn};

pub const POLL_INTERVAL_MS: u64 = 200;

/// The narrow seam to the OS: who is foregrounded, and for how long has
/// the user been idle. Lookup failures surface as `None` / `0`, never as
/// errors; the engine treats a missing foreground as "not tracked".
pub trait ActivityProvider: Send {
    /// Exe path of the program owning the foreground window.
    fn foreground_program(&mut self) -> Option<String>;

    /// Milliseconds since the last user input.
    fn idle_ms(&mut self) -> u64;
}

/// Poll the provider and post one `ActivitySample` per interval until the
/// daemon drops the receiver.
pub async fn run_activity_poller<P>(mut provider: P, tx: Sender<ManagerMsg>)
where
    P: ActivityProvider + 'static,
{
    tinfo!("Activity", "poller started ({} ms interval)", POLL_INTERVAL_MS);

    loop {
        sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;

        let sample = Event::ActivitySample {
            foreground: provider.foreground_program(),
            idle_ms: provider.idle_ms(),
            now_ms: now_ms(),
        };

        if tx.send(ManagerMsg::Event(sample)).await.is_err() {
            twarn!("Activity", "poller stopping (receiver dropped)");
            break;
        }
    }
}

// Stub for development on platforms without a tracker backend.
#[cfg(not(target_os = "linux"))]
pub struct NullActivity;

#[cfg(not(target_os = "linux"))]
impl ActivityProvider for NullActivity {
    fn foreground_program(&mut self) -> Option<String> {
        None
    }

    fn idle_ms(&mut self) -> u64 {
        0
    }
}
