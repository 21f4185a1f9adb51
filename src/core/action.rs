// License: MIT

/// Effects the engine asks the runtime to perform.
///
/// The engine never touches the outside world itself; the daemon executes
/// these after each `handle_event` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Play the alert sound (idle entry, goal reached). Fire-and-forget;
    /// playback failure is logged and swallowed.
    PlayAlert,

    /// Show or hide the not-working border. Emitted once per edge, never
    /// repeated while the state holds.
    SetBorderVisible(bool),

    /// Notify the user (runtime decides how: notify-send, etc.)
    Notify {
        message: String,
    },

    /// Checkpoint the live total so a crash or restart can restore it.
    SavePreviousTime(u64),

    /// Persist the history ledger (insertion order, oldest first).
    SaveHistory(Vec<u64>),

    /// Persist settings after a toggle, threshold or tracked-set change.
    SaveSettings,
}
