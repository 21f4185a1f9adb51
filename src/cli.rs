// License: MIT

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "stint",
    version = env!("CARGO_PKG_VERSION"),
    about = "Stint work-session tracker"
)]
pub struct Args {
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, action)]
    pub verbose: bool,

    #[arg(long, action)]
    pub no_console: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "Display the current session (use --json for status bars)")]
    Info {
        #[arg(long)]
        json: bool,
    },

    #[command(about = "List recent session totals, newest first")]
    History,

    #[command(about = "Save the current total to history and start over at zero")]
    Reset,

    #[command(about = "Restore a previous total from history (newest if no index)")]
    Resume {
        #[arg(value_name = "INDEX")]
        index: Option<usize>,
    },

    #[command(about = "Set the session total by hand (HH:MM:SS or seconds)")]
    SetTime {
        time: String,
    },

    #[command(about = "Set the goal time; 0 disables the goal alert")]
    SetGoal {
        time: String,
    },

    #[command(about = "Set the idle timeout in seconds (minimum 1)")]
    SetTimeout {
        seconds: u64,
    },

    #[command(about = "Toggle the one-shot sound when you go idle")]
    ToggleSound,

    #[command(about = "Toggle the border indicator while not working")]
    ToggleBorder,

    #[command(about = "Track the next focused program (bind this to a hotkey)")]
    AddProgram,

    #[command(about = "Stop tracking the next focused program")]
    RemoveProgram,

    #[command(about = "Stop the running Stint daemon")]
    Stop,
}
