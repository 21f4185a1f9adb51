// License: MIT

/// Everything the engine reacts to, stamped with the time it happened.
///
/// Timestamps are supplied by the sender (services, IPC handlers), never
/// read inside the engine, so the whole state machine is replayable in
/// tests with a hand-rolled clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// One activity poll: the foregrounded program (exe path, if any) and
    /// how long the user has been idle at this instant.
    ActivitySample {
        foreground: Option<String>,
        idle_ms: u64,
        now_ms: u64,
    },

    /// Periodic checkpoint of the live total.
    AutosaveTick {
        now_ms: u64,
    },

    /// Save the current total to history and start over at zero.
    ResetTime {
        now_ms: u64,
    },

    /// Restore the index-th newest history entry (0 = most recent).
    ResumePrevious {
        index: usize,
        now_ms: u64,
    },

    /// Manual edit of the session total.
    SetTotal {
        seconds: u64,
        now_ms: u64,
    },

    /// Change the goal time; 0 disables the goal alert.
    SetGoal {
        seconds: u64,
        now_ms: u64,
    },

    SetIdleTimeout {
        seconds: u64,
        now_ms: u64,
    },

    ToggleSound {
        now_ms: u64,
    },

    ToggleBorder {
        now_ms: u64,
    },

    /// Arm the add-program gesture; completes on a later activity sample.
    ArmAddProgram {
        now_ms: u64,
    },

    /// Arm the remove-program gesture; completes on a later activity sample.
    ArmRemoveProgram {
        now_ms: u64,
    },
}

impl Event {
    pub fn now_ms(&self) -> u64 {
        match self {
            Event::ActivitySample { now_ms, .. }
            | Event::AutosaveTick { now_ms }
            | Event::ResetTime { now_ms }
            | Event::ResumePrevious { now_ms, .. }
            | Event::SetTotal { now_ms, .. }
            | Event::SetGoal { now_ms, .. }
            | Event::SetIdleTimeout { now_ms, .. }
            | Event::ToggleSound { now_ms }
            | Event::ToggleBorder { now_ms }
            | Event::ArmAddProgram { now_ms }
            | Event::ArmRemoveProgram { now_ms } => *now_ms,
        }
    }
}
