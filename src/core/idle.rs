// License: MIT

use std::collections::BTreeMap;

/// Per-sample verdict from the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
    /// Foreground is a tracked program (and not ourselves).
    pub tracked_foreground: bool,

    /// Idle duration has reached the configured timeout.
    pub is_idle: bool,

    /// This sample is the idle-entry edge; fires at most once per idle
    /// span.
    pub idle_entered: bool,

    pub should_count: bool,
}

/// Decides, per activity sample, whether elapsed time counts as work.
///
/// Combines the tracked-program check with the idle timeout and owns the
/// one-shot latch for the idle alert. A missing foreground identifier is
/// "not tracked", never an error.
#[derive(Debug, Clone)]
pub struct IdleGate {
    idle_timeout_ms: u64,

    /// True from the idle-entry edge until idle ends.
    idle_latched: bool,
}

impl IdleGate {
    pub fn new(idle_timeout_secs: u64) -> Self {
        Self {
            idle_timeout_ms: idle_timeout_secs.max(1).saturating_mul(1000),
            idle_latched: false,
        }
    }

    pub fn idle_timeout_secs(&self) -> u64 {
        self.idle_timeout_ms / 1000
    }

    /// Caller validates `secs >= 1`.
    pub fn set_idle_timeout_secs(&mut self, secs: u64) {
        self.idle_timeout_ms = secs.saturating_mul(1000);
    }

    pub fn evaluate(
        &mut self,
        foreground: Option<&str>,
        idle_ms: u64,
        tracked: &BTreeMap<String, String>,
        self_exe: Option<&str>,
    ) -> GateDecision {
        let tracked_foreground = match foreground {
            Some(path) => tracked.contains_key(path) && Some(path) != self_exe,
            None => false,
        };

        let is_idle = idle_ms >= self.idle_timeout_ms;
        let idle_entered = is_idle && !self.idle_latched;
        self.idle_latched = is_idle;

        GateDecision {
            tracked_foreground,
            is_idle,
            idle_entered,
            should_count: tracked_foreground && !is_idle,
        }
    }
}
