// License: MIT

use serde::Serialize;

/// What the tracker is doing right now, derived from the latest sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackState {
    /// A tracked program is foregrounded and the user is active.
    Working,

    /// A tracked program is foregrounded but the user has gone idle.
    Idle,

    /// The foreground program is not tracked (or unknown).
    Untracked,
}

impl TrackState {
    pub fn label(&self) -> &'static str {
        match self {
            TrackState::Working => "working",
            TrackState::Idle => "idle",
            TrackState::Untracked => "untracked",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackedProgram {
    pub path: String,
    pub name: String,
}

/// Point-in-time view of the engine for `stint info` and status bars.
#[derive(Debug, Clone, Serialize)]
pub struct InfoSnapshot {
    pub state: TrackState,
    pub total_secs: u64,

    /// HH:MM:SS, clamped to 99:59:59.
    pub display: String,

    pub goal_secs: u64,
    pub goal_reached: bool,
    pub idle_timeout_secs: u64,
    pub play_sound_on_idle: bool,
    pub show_border_when_not_working: bool,

    /// Exe path of the current foreground program, if known.
    pub foreground: Option<String>,

    /// "add" or "remove" while a gesture is waiting for its focus change.
    pub pending_gesture: Option<&'static str>,

    pub tracked_programs: Vec<TrackedProgram>,

    /// Newest first.
    pub history: Vec<u64>,
}
