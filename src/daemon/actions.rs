// License: MIT

use std::process::Stdio;

use crate::core::action::Action;
use crate::{tdebug, terror, twarn};

use super::Daemon;

impl Daemon {
    pub(super) async fn exec_actions(&mut self, actions: Vec<Action>) {
        let mut persist = false;

        for action in actions {
            match action {
                Action::PlayAlert => self.play_alert(),

                Action::SetBorderVisible(visible) => self.set_border_visible(visible),

                Action::Notify { message } => notify(&message),

                Action::SavePreviousTime(secs) => {
                    self.settings.previous_secs = secs;
                    persist = true;
                }

                Action::SaveHistory(entries) => {
                    self.settings.time_history = entries;
                    persist = true;
                }

                Action::SaveSettings => {
                    persist = true;
                }
            }
        }

        if persist {
            self.persist_settings();
        }
    }

    fn persist_settings(&mut self) {
        self.settings.idle_timeout_secs = self.engine.idle_timeout_secs();
        self.settings.goal_secs = self.engine.goal_secs();
        self.settings.play_sound_on_idle = self.engine.play_sound_on_idle();
        self.settings.show_border_when_not_working = self.engine.show_border_when_not_working();
        self.settings.tracked_programs = self.engine.tracked_programs().clone();

        if let Err(e) = crate::config::save(&self.settings_path, &self.settings) {
            terror!("Daemon", "failed to save settings to {}: {}", self.settings_path.display(), e);
        }
    }

    /// Fire-and-forget; playback failure must never stop the tracker.
    fn play_alert(&self) {
        match &self.settings.alert_command {
            Some(cmd) => run_detached("Alert", cmd),
            None => tdebug!("Alert", "no alert command configured"),
        }
    }

    fn set_border_visible(&self, visible: bool) {
        let cmd = if visible {
            &self.settings.border_show_command
        } else {
            &self.settings.border_hide_command
        };

        match cmd {
            Some(cmd) => run_detached("Border", cmd),
            None => tdebug!("Border", "{}", if visible { "shown" } else { "hidden" }),
        }
    }
}

fn notify(message: &str) {
    let spawned = tokio::process::Command::new("notify-send")
        .arg("-a")
        .arg("stint")
        .arg(message)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    match spawned {
        Ok(mut child) => {
            tokio::spawn(async move {
                let _ = child.wait().await;
            });
        }
        Err(e) => twarn!("Daemon", "notify-send failed: {}", e),
    }
}

fn run_detached(scope: &'static str, command: &str) {
    let spawned = tokio::process::Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    match spawned {
        Ok(mut child) => {
            tdebug!(scope, "running: {}", command);
            tokio::spawn(async move {
                let _ = child.wait().await;
            });
        }
        Err(e) => twarn!(scope, "failed to run '{}': {}", command, e),
    }
}
