// License: MIT

use tokio::sync::mpsc::Sender;

use crate::core::manager_msg::ManagerMsg;
use crate::twarn;

use super::handlers::{control, info, programs, settings, time};

/// Routes incoming commands to appropriate handlers.
pub async fn route_command(cmd: &str, tx: &Sender<ManagerMsg>) -> String {
    let result: Result<String, String> = match cmd {
        cmd if cmd.starts_with("info") => {
            let as_json = cmd.contains("--json");
            info::handle_info(tx, as_json).await
        }

        "history" => info::handle_history(tx).await,

        "reset" => time::handle_reset(tx).await,

        cmd if cmd.starts_with("resume") => {
            let args = cmd.strip_prefix("resume").unwrap_or("").trim();
            time::handle_resume(tx, args).await
        }

        // "set-timeout" shares the "set-time" prefix; match it first
        cmd if cmd.starts_with("set-timeout") => {
            let args = cmd.strip_prefix("set-timeout").unwrap_or("").trim();
            settings::handle_set_timeout(tx, args).await
        }

        cmd if cmd.starts_with("set-time") => {
            let args = cmd.strip_prefix("set-time").unwrap_or("").trim();
            time::handle_set_time(tx, args).await
        }

        cmd if cmd.starts_with("set-goal") => {
            let args = cmd.strip_prefix("set-goal").unwrap_or("").trim();
            settings::handle_set_goal(tx, args).await
        }

        "toggle-sound" => settings::handle_toggle_sound(tx).await,

        "toggle-border" => settings::handle_toggle_border(tx).await,

        "add-program" => programs::handle_add(tx).await,

        "remove-program" => programs::handle_remove(tx).await,

        "stop" => control::handle_stop(tx).await,

        _ => {
            twarn!("Ipc", "unknown command: {}", cmd);
            Err(format!("unknown command '{}'", cmd))
        }
    };

    result.unwrap_or_else(|e| format!("ERROR: {}", e))
}
