// License: MIT

/// Counting state of the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Paused,
    Running,
}

/// The monotonic work-time accumulator.
///
/// Two states: Paused (`run_start_ms` empty) and Running (`run_start_ms`
/// holds the segment start). The total is always
/// `accumulated_ms + (running ? now - run_start : 0)` and never goes
/// backwards except through `reset` / `set_total_secs`.
#[derive(Debug, Clone)]
pub struct SessionAccumulator {
    /// Milliseconds counted before the current run segment.
    accumulated_ms: u64,

    /// Set only while Running.
    run_start_ms: Option<u64>,
}

impl SessionAccumulator {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            accumulated_ms: initial_secs.saturating_mul(1000),
            run_start_ms: None,
        }
    }

    pub fn run_state(&self) -> RunState {
        if self.run_start_ms.is_some() {
            RunState::Running
        } else {
            RunState::Paused
        }
    }

    /// Drive the state machine toward `should_count`. Idempotent when the
    /// state already matches.
    ///
    /// `pause_mark_ms` is where a closing segment ends. For a pause caused
    /// by the idle threshold the caller passes the moment input stopped
    /// (`now - idle_duration`), so the idle build-up is not counted as
    /// work; for a focus change it is simply `now_ms`.
    pub fn apply(&mut self, should_count: bool, now_ms: u64, pause_mark_ms: u64) {
        match (self.run_start_ms, should_count) {
            (None, true) => {
                self.run_start_ms = Some(now_ms);
            }
            (Some(start), false) => {
                let end = pause_mark_ms.max(start).min(now_ms.max(start));
                self.accumulated_ms = self.accumulated_ms.saturating_add(end - start);
                self.run_start_ms = None;
            }
            _ => {}
        }
    }

    /// Pure read; safe to call mid-tick without double counting.
    pub fn total_ms(&self, now_ms: u64) -> u64 {
        let live = self
            .run_start_ms
            .map(|start| now_ms.saturating_sub(start))
            .unwrap_or(0);
        self.accumulated_ms.saturating_add(live)
    }

    pub fn total_secs(&self, now_ms: u64) -> u64 {
        self.total_ms(now_ms) / 1000
    }

    /// Zero the accumulator. No-op when the total already is zero.
    /// Callers are responsible for recording the pre-reset total first.
    pub fn reset(&mut self, now_ms: u64) {
        if self.total_ms(now_ms) == 0 {
            return;
        }
        self.accumulated_ms = 0;
        self.run_start_ms = None;
    }

    /// Force the total to an exact value, discarding any in-flight
    /// segment. Leaves the machine Paused; the next sample restarts it.
    pub fn set_total_secs(&mut self, secs: u64) {
        self.accumulated_ms = secs.saturating_mul(1000);
        self.run_start_ms = None;
    }
}
