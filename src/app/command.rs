// License: MIT

use crate::cli::{Args, Command};
use crate::ipc::client::send_raw;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

pub async fn run(args: Args) -> Result<(), AnyError> {
    // command mode: args.command is Some
    let Some(cmd) = args.command.as_ref() else {
        return Ok(());
    };

    match cmd {
        Command::Info { json } => {
            let msg = if *json { "info --json" } else { "info" };

            match send_raw(msg).await {
                Ok(resp) => {
                    if !resp.is_empty() {
                        println!("{resp}");
                    }
                    Ok(())
                }
                Err(e) => {
                    if *json {
                        // Status bars need valid JSON even when the daemon
                        // isn't running.
                        println!(
                            "{}",
                            r#"{"text":"","alt":"not_running","class":"not_running","tooltip":"Stint not running"}"#
                        );
                    } else {
                        eprintln!("stint: {e}");
                    }
                    Ok(())
                }
            }
        }

        Command::History => simple(send_raw("history").await, "History is empty"),

        Command::Reset => simple(send_raw("reset").await, "Time reset"),

        Command::Resume { index } => {
            let msg = match index {
                Some(i) => format!("resume {i}"),
                None => "resume".to_string(),
            };
            simple(send_raw(&msg).await, "Resumed previous time")
        }

        Command::SetTime { time } => {
            simple(send_raw(&format!("set-time {time}")).await, "Time set")
        }

        Command::SetGoal { time } => {
            simple(send_raw(&format!("set-goal {time}")).await, "Goal set")
        }

        Command::SetTimeout { seconds } => {
            simple(send_raw(&format!("set-timeout {seconds}")).await, "Idle timeout set")
        }

        Command::ToggleSound => simple(send_raw("toggle-sound").await, "Toggled idle sound"),

        Command::ToggleBorder => simple(send_raw("toggle-border").await, "Toggled border"),

        Command::AddProgram => {
            simple(send_raw("add-program").await, "Focus the program you want to track")
        }

        Command::RemoveProgram => {
            simple(send_raw("remove-program").await, "Focus the program you want to stop tracking")
        }

        Command::Stop => simple(send_raw("stop").await, "Stopping Stint daemon"),
    }
}

fn simple(result: Result<String, String>, fallback: &str) -> Result<(), AnyError> {
    match result {
        Ok(resp) => {
            let out = resp.trim_end();
            if out.is_empty() {
                println!("{fallback}");
            } else {
                println!("{out}");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("stint: {e}");
            Ok(())
        }
    }
}
