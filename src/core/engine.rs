// License: MIT

use std::collections::BTreeMap;

use crate::config::Settings;
use crate::core::{
    action::Action,
    error::Error,
    events::Event,
    history::HistoryLedger,
    idle::{GateDecision, IdleGate},
    info::{InfoSnapshot, TrackState, TrackedProgram},
    session::SessionAccumulator,
    thresholds::ThresholdWatcher,
    utils::format_hms,
};

/// A program add/remove gesture waiting for its focus change.
/// Arming again overwrites; the later request wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingGesture {
    Add,
    Remove,
}

/// The tracking engine: one owned context, no ambient globals.
///
/// All state lives here and is mutated only through `handle_event`, which
/// the daemon calls from its single consumer loop. The engine never
/// touches the outside world; it returns `Action`s for the runtime to
/// execute.
pub struct Engine {
    session: SessionAccumulator,
    gate: IdleGate,
    thresholds: ThresholdWatcher,
    history: HistoryLedger,

    /// Tracked programs, exe path -> display name.
    tracked: BTreeMap<String, String>,

    /// Our own executable; never counted, never added by a gesture.
    self_exe: Option<String>,

    play_sound_on_idle: bool,
    show_border_when_not_working: bool,

    pending: Option<PendingGesture>,

    /// Last commanded border visibility, so the collaborator is only
    /// poked on edges. The border starts hidden.
    border_visible: bool,

    last_decision: Option<GateDecision>,
    last_foreground: Option<String>,
}

impl Engine {
    pub fn new(settings: &Settings, self_exe: Option<String>) -> Self {
        Self {
            session: SessionAccumulator::new(settings.previous_secs),
            gate: IdleGate::new(settings.idle_timeout_secs),
            thresholds: ThresholdWatcher::new(settings.goal_secs, settings.previous_secs),
            history: HistoryLedger::from_saved(&settings.time_history),
            tracked: settings.tracked_programs.clone(),
            self_exe,
            play_sound_on_idle: settings.play_sound_on_idle,
            show_border_when_not_working: settings.show_border_when_not_working,
            pending: None,
            border_visible: false,
            last_decision: None,
            last_foreground: None,
        }
    }

    pub fn handle_event(&mut self, event: Event) -> Result<Vec<Action>, Error> {
        match event {
            Event::ActivitySample {
                foreground,
                idle_ms,
                now_ms,
            } => Ok(self.on_activity_sample(foreground, idle_ms, now_ms)),

            Event::AutosaveTick { now_ms } => {
                let total = self.session.total_secs(now_ms);
                Ok(vec![Action::SavePreviousTime(total)])
            }

            Event::ResetTime { now_ms } => {
                let total = self.session.total_secs(now_ms);
                if total == 0 {
                    return Ok(Vec::new());
                }

                self.history.record(total);
                self.session.reset(now_ms);
                self.thresholds.rearm(0);

                Ok(vec![
                    Action::SavePreviousTime(total),
                    Action::SaveHistory(self.history.entries().to_vec()),
                ])
            }

            Event::ResumePrevious { index, now_ms } => {
                let Some(target) = self.history.newest(index) else {
                    return Err(Error::NothingToResume);
                };
                Ok(self.replace_total(target, now_ms))
            }

            Event::SetTotal { seconds, now_ms } => Ok(self.replace_total(seconds, now_ms)),

            Event::SetGoal { seconds, now_ms } => {
                let total = self.session.total_secs(now_ms);
                self.thresholds.set_goal(seconds, total);
                Ok(vec![Action::SaveSettings])
            }

            Event::SetIdleTimeout { seconds, .. } => {
                if seconds == 0 {
                    return Err(Error::ZeroIdleTimeout);
                }
                self.gate.set_idle_timeout_secs(seconds);
                Ok(vec![Action::SaveSettings])
            }

            Event::ToggleSound { .. } => {
                self.play_sound_on_idle = !self.play_sound_on_idle;
                Ok(vec![Action::SaveSettings])
            }

            Event::ToggleBorder { .. } => {
                self.show_border_when_not_working = !self.show_border_when_not_working;
                let mut actions = Vec::new();
                self.sync_border(&mut actions);
                actions.push(Action::SaveSettings);
                Ok(actions)
            }

            Event::ArmAddProgram { .. } => {
                self.pending = Some(PendingGesture::Add);
                Ok(Vec::new())
            }

            Event::ArmRemoveProgram { .. } => {
                self.pending = Some(PendingGesture::Remove);
                Ok(Vec::new())
            }
        }
    }

    fn on_activity_sample(
        &mut self,
        foreground: Option<String>,
        idle_ms: u64,
        now_ms: u64,
    ) -> Vec<Action> {
        let mut actions = Vec::new();

        // Gestures first, so an added program starts counting on the same
        // sample that completed the gesture.
        self.consume_pending_gesture(foreground.as_deref(), &mut actions);

        let decision = self.gate.evaluate(
            foreground.as_deref(),
            idle_ms,
            &self.tracked,
            self.self_exe.as_deref(),
        );

        if decision.idle_entered && self.play_sound_on_idle {
            actions.push(Action::PlayAlert);
        }

        // A pause caused by the idle threshold closes the segment at the
        // moment input stopped; the idle build-up is not work.
        let pause_mark = if decision.is_idle {
            now_ms.saturating_sub(idle_ms)
        } else {
            now_ms
        };
        self.session.apply(decision.should_count, now_ms, pause_mark);

        let total = self.session.total_secs(now_ms);
        let crossings = self.thresholds.check(total);

        if crossings.goal_fired {
            actions.push(Action::Notify {
                message: format!("Goal reached: {}", format_hms(self.thresholds.goal_secs())),
            });
            actions.push(Action::PlayAlert);
        }

        if crossings.max_fired {
            actions.push(Action::Notify {
                message: "Display cap reached (99:59:59)".to_string(),
            });
        }

        self.last_decision = Some(decision);
        self.last_foreground = foreground;
        self.sync_border(&mut actions);

        actions
    }

    /// Manual total change: record the old total, force the new one,
    /// re-derive the threshold latches without firing.
    fn replace_total(&mut self, target_secs: u64, now_ms: u64) -> Vec<Action> {
        let mut actions = Vec::new();

        let total = self.session.total_secs(now_ms);
        if total > 0 && self.history.record(total) {
            actions.push(Action::SaveHistory(self.history.entries().to_vec()));
        }

        self.session.set_total_secs(target_secs);
        self.thresholds.rearm(target_secs);

        actions.push(Action::SavePreviousTime(target_secs));
        actions
    }

    fn consume_pending_gesture(&mut self, foreground: Option<&str>, actions: &mut Vec<Action>) {
        let Some(gesture) = self.pending else {
            return;
        };

        // No foreground yet, or it is us: stay armed for a later sample.
        let Some(path) = foreground else {
            return;
        };
        if Some(path) == self.self_exe.as_deref() {
            return;
        }

        match gesture {
            PendingGesture::Add => {
                if self.tracked.contains_key(path) {
                    actions.push(Action::Notify {
                        message: format!("Already tracking {}", program_name(path)),
                    });
                } else {
                    let name = program_name(path).to_string();
                    self.tracked.insert(path.to_string(), name.clone());
                    actions.push(Action::Notify {
                        message: format!("Now tracking {}", name),
                    });
                    actions.push(Action::SaveSettings);
                }
            }
            PendingGesture::Remove => {
                if self.tracked.remove(path).is_some() {
                    actions.push(Action::Notify {
                        message: format!("Stopped tracking {}", program_name(path)),
                    });
                    actions.push(Action::SaveSettings);
                } else {
                    actions.push(Action::Notify {
                        message: format!("Not tracking {}", program_name(path)),
                    });
                }
            }
        }

        self.pending = None;
    }

    fn sync_border(&mut self, actions: &mut Vec<Action>) {
        let not_working = self.last_decision.map_or(true, |d| !d.should_count);
        let desired = self.show_border_when_not_working && not_working;

        if desired != self.border_visible {
            actions.push(Action::SetBorderVisible(desired));
            self.border_visible = desired;
        }
    }

    /// Final session boundary before the process exits.
    pub fn shutdown(&mut self, now_ms: u64) -> Vec<Action> {
        let total = self.session.total_secs(now_ms);

        let mut actions = Vec::new();
        if self.history.record(total) {
            actions.push(Action::SaveHistory(self.history.entries().to_vec()));
        }
        actions.push(Action::SavePreviousTime(total));
        actions.push(Action::SaveSettings);
        actions
    }

    pub fn snapshot(&self, now_ms: u64) -> InfoSnapshot {
        let state = match self.last_decision {
            Some(d) if d.should_count => TrackState::Working,
            Some(d) if d.tracked_foreground && d.is_idle => TrackState::Idle,
            _ => TrackState::Untracked,
        };

        let total_secs = self.session.total_secs(now_ms);

        InfoSnapshot {
            state,
            total_secs,
            display: format_hms(total_secs),
            goal_secs: self.thresholds.goal_secs(),
            goal_reached: self.thresholds.goal_reached(),
            idle_timeout_secs: self.gate.idle_timeout_secs(),
            play_sound_on_idle: self.play_sound_on_idle,
            show_border_when_not_working: self.show_border_when_not_working,
            foreground: self.last_foreground.clone(),
            pending_gesture: self.pending.map(|g| match g {
                PendingGesture::Add => "add",
                PendingGesture::Remove => "remove",
            }),
            tracked_programs: self
                .tracked
                .iter()
                .map(|(path, name)| TrackedProgram {
                    path: path.clone(),
                    name: name.clone(),
                })
                .collect(),
            history: self.history.list(),
        }
    }

    // ---------------- accessors for the daemon ----------------

    pub fn total_secs(&self, now_ms: u64) -> u64 {
        self.session.total_secs(now_ms)
    }

    pub fn goal_secs(&self) -> u64 {
        self.thresholds.goal_secs()
    }

    pub fn idle_timeout_secs(&self) -> u64 {
        self.gate.idle_timeout_secs()
    }

    pub fn play_sound_on_idle(&self) -> bool {
        self.play_sound_on_idle
    }

    pub fn show_border_when_not_working(&self) -> bool {
        self.show_border_when_not_working
    }

    pub fn tracked_programs(&self) -> &BTreeMap<String, String> {
        &self.tracked
    }

    pub fn history_list(&self) -> Vec<u64> {
        self.history.list()
    }
}

/// File name of an executable path, for display.
fn program_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
