// License: MIT

use tokio::sync::{mpsc, watch};

use crate::core::{events::Event, manager_msg::ManagerMsg, utils};
use crate::services::activity::{ActivityProvider, run_activity_poller};
use crate::services::autosave::run_autosave;
use crate::{tinfo, twarn};

use super::Daemon;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

impl Daemon {
    pub async fn run<P>(
        &mut self,
        provider: P,
        mut shutdown: watch::Receiver<bool>,
        shutdown_tx: watch::Sender<bool>,
    ) -> Result<(), AnyError>
    where
        P: ActivityProvider + 'static,
    {
        tinfo!("Daemon", "starting");

        let (tx, mut rx) = mpsc::channel::<ManagerMsg>(256);

        // The control surface is how every gesture reaches the engine; a
        // daemon nobody can talk to is not worth keeping alive.
        crate::ipc::server::spawn_ipc_server(tx.clone()).await?;

        tokio::spawn(run_activity_poller(provider, tx.clone()));
        tokio::spawn(run_autosave(tx.clone()));

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        tinfo!("Daemon", "stopping (shutdown requested)");
                        break;
                    }
                }

                maybe = rx.recv() => {
                    let Some(msg) = maybe else {
                        tinfo!("Daemon", "stopping (event channel closed)");
                        break;
                    };

                    match msg {
                        ManagerMsg::Event(event) => {
                            match self.engine.handle_event(event) {
                                Ok(actions) => self.exec_actions(actions).await,
                                Err(e) => twarn!("Daemon", "event rejected: {}", e),
                            }
                        }

                        ManagerMsg::Command { event, reply } => {
                            let out = self.apply_command(event).await;
                            let _ = reply.send(out);
                        }

                        ManagerMsg::GetInfo { reply } => {
                            let _ = reply.send(self.engine.snapshot(utils::now_ms()));
                        }

                        ManagerMsg::StopDaemon { reply } => {
                            tinfo!("Daemon", "stopping (stop requested via IPC)");
                            let _ = reply.send(Ok("Stopping Stint daemon".to_string()));
                            let _ = shutdown_tx.send(true);
                            break;
                        }
                    }
                }
            }
        }

        // Final session boundary: the total survives the restart.
        let actions = self.engine.shutdown(utils::now_ms());
        self.exec_actions(actions).await;

        tinfo!("Daemon", "stopped");
        Ok(())
    }

    async fn apply_command(&mut self, event: Event) -> Result<String, String> {
        let before_total = self.engine.total_secs(event.now_ms());

        match self.engine.handle_event(event.clone()) {
            Ok(actions) => {
                self.exec_actions(actions).await;
                Ok(self.describe_outcome(&event, before_total))
            }
            Err(e) => Err(e.to_string()),
        }
    }

    /// Human-readable reply for the IPC client, built after the engine
    /// has applied the event.
    fn describe_outcome(&self, event: &Event, before_total: u64) -> String {
        match event {
            Event::ResetTime { .. } => {
                if before_total == 0 {
                    "Nothing to reset".to_string()
                } else {
                    format!("Time reset ({} saved to history)", utils::format_hms(before_total))
                }
            }

            Event::ResumePrevious { now_ms, .. } => {
                format!("Resumed {}", utils::format_hms(self.engine.total_secs(*now_ms)))
            }

            Event::SetTotal { seconds, .. } => {
                format!("Time set to {}", utils::format_hms(*seconds))
            }

            Event::SetGoal { seconds, .. } => {
                if *seconds == 0 {
                    "Goal disabled".to_string()
                } else {
                    format!("Goal set to {}", utils::format_hms(*seconds))
                }
            }

            Event::SetIdleTimeout { seconds, .. } => {
                format!("Idle timeout set to {} s", seconds)
            }

            Event::ToggleSound { .. } => {
                if self.engine.play_sound_on_idle() {
                    "Idle sound on".to_string()
                } else {
                    "Idle sound off".to_string()
                }
            }

            Event::ToggleBorder { .. } => {
                if self.engine.show_border_when_not_working() {
                    "Border on".to_string()
                } else {
                    "Border off".to_string()
                }
            }

            Event::ArmAddProgram { .. } => {
                "Focus the program you want to track".to_string()
            }

            Event::ArmRemoveProgram { .. } => {
                "Focus the program you want to stop tracking".to_string()
            }

            Event::ActivitySample { .. } | Event::AutosaveTick { .. } => "OK".to_string(),
        }
    }
}
