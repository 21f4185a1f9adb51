// License: MIT

use crate::config::Settings;
use crate::core::action::Action;
use crate::core::engine::Engine;
use crate::core::error::Error;
use crate::core::events::Event;
use crate::core::history::HistoryLedger;
use crate::core::info::TrackState;
use crate::core::session::{RunState, SessionAccumulator};
use crate::core::utils::{MAX_DISPLAY_SECS, format_hms, parse_hms};

const SELF_EXE: &str = "/usr/local/bin/stint";
const EDITOR: &str = "/usr/bin/emacs";
const BROWSER: &str = "/usr/bin/firefox";

fn settings(idle_timeout_secs: u64, goal_secs: u64, tracked: &[&str]) -> Settings {
    let mut s = Settings::default();
    s.idle_timeout_secs = idle_timeout_secs;
    s.goal_secs = goal_secs;
    for path in tracked {
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        s.tracked_programs.insert((*path).to_string(), name);
    }
    s
}

fn engine(settings: &Settings) -> Engine {
    Engine::new(settings, Some(SELF_EXE.to_string()))
}

fn sample(foreground: Option<&str>, idle_ms: u64, now_ms: u64) -> Event {
    Event::ActivitySample {
        foreground: foreground.map(str::to_string),
        idle_ms,
        now_ms,
    }
}

fn alerts(actions: &[Action]) -> usize {
    actions.iter().filter(|a| matches!(a, Action::PlayAlert)).count()
}

fn notifications(actions: &[Action]) -> Vec<String> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Notify { message } => Some(message.clone()),
            _ => None,
        })
        .collect()
}

fn border_edges(actions: &[Action]) -> Vec<bool> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::SetBorderVisible(v) => Some(*v),
            _ => None,
        })
        .collect()
}

// ---------------- accumulator ----------------

#[test]
fn accumulator_transitions_are_idempotent() {
    let mut acc = SessionAccumulator::new(0);
    assert_eq!(acc.run_state(), RunState::Paused);

    acc.apply(true, 1_000, 1_000);
    assert_eq!(acc.run_state(), RunState::Running);

    // same desired state: no-op, no double counting
    acc.apply(true, 2_000, 2_000);
    assert_eq!(acc.total_ms(3_000), 2_000);

    acc.apply(false, 3_000, 3_000);
    assert_eq!(acc.run_state(), RunState::Paused);

    acc.apply(false, 4_000, 4_000);
    assert_eq!(acc.total_ms(4_000), 2_000);
}

#[test]
fn accumulator_clamps_the_pause_mark_to_the_segment() {
    let mut acc = SessionAccumulator::new(0);
    acc.apply(true, 10_000, 10_000);

    // idle began before the segment did: nothing to subtract below zero
    acc.apply(false, 12_000, 8_000);
    assert_eq!(acc.total_ms(12_000), 0);
}

#[test]
fn accumulator_reset_is_a_noop_at_zero() {
    let mut acc = SessionAccumulator::new(0);
    acc.reset(5_000);
    assert_eq!(acc.total_ms(5_000), 0);
    assert_eq!(acc.run_state(), RunState::Paused);
}

#[test]
fn counts_continuously_while_tracked_and_active() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    eng.handle_event(sample(Some(EDITOR), 0, 0)).unwrap();
    eng.handle_event(sample(Some(EDITOR), 0, 65_000)).unwrap();

    let snap = eng.snapshot(65_000);
    assert_eq!(snap.total_secs, 65);
    assert_eq!(snap.display, "00:01:05");
    assert_eq!(snap.state, TrackState::Working);
}

#[test]
fn only_tracked_segments_accumulate() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    eng.handle_event(sample(Some(EDITOR), 0, 0)).unwrap();
    eng.handle_event(sample(Some(BROWSER), 0, 10_000)).unwrap();
    eng.handle_event(sample(Some(BROWSER), 0, 15_000)).unwrap();
    eng.handle_event(sample(Some(EDITOR), 0, 20_000)).unwrap();
    eng.handle_event(sample(None, 0, 30_000)).unwrap();

    assert_eq!(eng.total_secs(30_000), 20);
}

#[test]
fn missing_foreground_pauses_counting() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    eng.handle_event(sample(Some(EDITOR), 0, 0)).unwrap();
    eng.handle_event(sample(None, 0, 5_000)).unwrap();
    eng.handle_event(sample(None, 0, 60_000)).unwrap();

    assert_eq!(eng.total_secs(60_000), 5);
    assert_eq!(eng.snapshot(60_000).state, TrackState::Untracked);
}

#[test]
fn own_executable_never_counts() {
    let mut eng = engine(&settings(30, 0, &[EDITOR, SELF_EXE]));

    eng.handle_event(sample(Some(SELF_EXE), 0, 0)).unwrap();
    eng.handle_event(sample(Some(SELF_EXE), 0, 30_000)).unwrap();

    assert_eq!(eng.total_secs(30_000), 0);
}

#[test]
fn total_reads_mid_segment_without_mutating() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    eng.handle_event(sample(Some(EDITOR), 0, 0)).unwrap();

    assert_eq!(eng.total_secs(7_000), 7);
    assert_eq!(eng.total_secs(7_000), 7);

    eng.handle_event(sample(Some(EDITOR), 0, 10_000)).unwrap();
    assert_eq!(eng.total_secs(10_000), 10);
}

#[test]
fn restores_previous_total_on_startup() {
    let mut s = settings(30, 0, &[EDITOR]);
    s.previous_secs = 100;

    let eng = engine(&s);
    assert_eq!(eng.total_secs(0), 100);
}

// ---------------- idle gate ----------------

#[test]
fn idle_threshold_pauses_and_excludes_the_buildup() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    eng.handle_event(sample(Some(EDITOR), 0, 0)).unwrap();
    eng.handle_event(sample(Some(EDITOR), 0, 10_000)).unwrap();

    // user stopped touching the machine at t=10; threshold reached at t=40
    let actions = eng.handle_event(sample(Some(EDITOR), 30_000, 40_000)).unwrap();
    assert_eq!(alerts(&actions), 1);
    assert_eq!(eng.total_secs(40_000), 10);
    assert_eq!(eng.snapshot(40_000).state, TrackState::Idle);

    // idle continues: total holds, no second alert
    let actions = eng.handle_event(sample(Some(EDITOR), 40_000, 50_000)).unwrap();
    assert_eq!(alerts(&actions), 0);
    assert_eq!(eng.total_secs(50_000), 10);
}

#[test]
fn idle_sound_rearms_after_activity_returns() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    eng.handle_event(sample(Some(EDITOR), 0, 0)).unwrap();
    let first = eng.handle_event(sample(Some(EDITOR), 30_000, 30_000)).unwrap();
    assert_eq!(alerts(&first), 1);

    // activity returns, then a second idle span
    eng.handle_event(sample(Some(EDITOR), 0, 40_000)).unwrap();
    let second = eng.handle_event(sample(Some(EDITOR), 30_000, 70_000)).unwrap();
    assert_eq!(alerts(&second), 1);
}

#[test]
fn idle_sound_respects_the_toggle() {
    let mut s = settings(30, 0, &[EDITOR]);
    s.play_sound_on_idle = false;

    let mut eng = engine(&s);
    eng.handle_event(sample(Some(EDITOR), 0, 0)).unwrap();
    let actions = eng.handle_event(sample(Some(EDITOR), 30_000, 30_000)).unwrap();
    assert_eq!(alerts(&actions), 0);
}

#[test]
fn counting_resumes_when_idle_ends() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    eng.handle_event(sample(Some(EDITOR), 0, 0)).unwrap();
    eng.handle_event(sample(Some(EDITOR), 30_000, 30_000)).unwrap();
    assert_eq!(eng.total_secs(30_000), 0);

    eng.handle_event(sample(Some(EDITOR), 0, 60_000)).unwrap();
    eng.handle_event(sample(Some(EDITOR), 0, 70_000)).unwrap();
    assert_eq!(eng.total_secs(70_000), 10);
}

// ---------------- thresholds ----------------

#[test]
fn goal_fires_exactly_once_per_crossing() {
    let mut eng = engine(&settings(30, 5, &[EDITOR]));

    eng.handle_event(sample(Some(EDITOR), 0, 0)).unwrap();
    let actions = eng.handle_event(sample(Some(EDITOR), 0, 4_000)).unwrap();
    assert!(notifications(&actions).is_empty());

    let actions = eng.handle_event(sample(Some(EDITOR), 0, 5_000)).unwrap();
    let notes = notifications(&actions);
    assert_eq!(notes.len(), 1);
    assert!(notes[0].contains("Goal"));
    assert_eq!(alerts(&actions), 1);

    // still above goal: no re-fire
    let actions = eng.handle_event(sample(Some(EDITOR), 0, 20_000)).unwrap();
    assert!(notifications(&actions).is_empty());
}

#[test]
fn manual_edit_rederives_the_goal_latch() {
    let mut eng = engine(&settings(30, 5, &[EDITOR]));

    eng.handle_event(sample(Some(EDITOR), 0, 0)).unwrap();
    eng.handle_event(sample(Some(EDITOR), 0, 6_000)).unwrap();
    assert!(eng.snapshot(6_000).goal_reached);

    // dropping below the goal clears the latch...
    eng.handle_event(Event::SetTotal { seconds: 3, now_ms: 6_000 }).unwrap();
    assert!(!eng.snapshot(6_000).goal_reached);

    // ...and the next genuine crossing fires again
    eng.handle_event(sample(Some(EDITOR), 0, 7_000)).unwrap();
    let actions = eng.handle_event(sample(Some(EDITOR), 0, 9_000)).unwrap();
    assert_eq!(notifications(&actions).len(), 1);
}

#[test]
fn manual_edit_above_goal_sets_latch_without_firing() {
    let mut eng = engine(&settings(30, 5, &[EDITOR]));

    let actions = eng.handle_event(Event::SetTotal { seconds: 10, now_ms: 0 }).unwrap();
    assert!(notifications(&actions).is_empty());
    assert!(eng.snapshot(0).goal_reached);

    // already latched: the next sample does not fire
    eng.handle_event(sample(Some(EDITOR), 0, 1_000)).unwrap();
    let actions = eng.handle_event(sample(Some(EDITOR), 0, 2_000)).unwrap();
    assert!(notifications(&actions).is_empty());
}

#[test]
fn restored_total_above_goal_does_not_fire_at_startup() {
    let mut s = settings(30, 50, &[EDITOR]);
    s.previous_secs = 100;

    let mut eng = engine(&s);
    assert!(eng.snapshot(0).goal_reached);

    let actions = eng.handle_event(sample(Some(EDITOR), 0, 0)).unwrap();
    assert!(notifications(&actions).is_empty());
}

#[test]
fn zero_goal_never_fires() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    eng.handle_event(sample(Some(EDITOR), 0, 0)).unwrap();
    let actions = eng.handle_event(sample(Some(EDITOR), 0, 3_600_000)).unwrap();
    assert!(notifications(&actions).is_empty());
    assert!(!eng.snapshot(3_600_000).goal_reached);
}

#[test]
fn display_clamps_at_the_cap_and_max_fires_once() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    eng.handle_event(Event::SetTotal {
        seconds: MAX_DISPLAY_SECS - 1,
        now_ms: 0,
    })
    .unwrap();

    eng.handle_event(sample(Some(EDITOR), 0, 1_000)).unwrap();
    let actions = eng.handle_event(sample(Some(EDITOR), 0, 3_000)).unwrap();
    let notes = notifications(&actions);
    assert_eq!(notes.len(), 1);
    assert!(notes[0].contains("99:59:59"));

    // the accumulator keeps counting past the cap; the face does not
    let actions = eng.handle_event(sample(Some(EDITOR), 0, 10_000)).unwrap();
    assert!(notifications(&actions).is_empty());

    let snap = eng.snapshot(10_000);
    assert!(snap.total_secs > MAX_DISPLAY_SECS);
    assert_eq!(snap.display, "99:59:59");
}

// ---------------- history ledger ----------------

#[test]
fn ledger_deduplicates_re_recorded_values() {
    let mut ledger = HistoryLedger::default();
    assert!(ledger.record(120));
    assert!(ledger.record(120));

    assert_eq!(ledger.entries(), &[120]);
    assert_eq!(ledger.list(), vec![120]);
}

#[test]
fn ledger_moves_repeats_to_newest_without_growing() {
    let mut ledger = HistoryLedger::default();
    ledger.record(10);
    ledger.record(20);
    ledger.record(10);

    assert_eq!(ledger.entries(), &[20, 10]);
    assert_eq!(ledger.list(), vec![10, 20]);
}

#[test]
fn ledger_evicts_oldest_beyond_capacity() {
    let mut ledger = HistoryLedger::default();
    for secs in [10, 20, 30, 40, 50, 60] {
        ledger.record(secs);
    }

    assert_eq!(ledger.entries(), &[20, 30, 40, 50, 60]);
    assert_eq!(ledger.list(), vec![60, 50, 40, 30, 20]);
}

#[test]
fn ledger_ignores_empty_sessions() {
    let mut ledger = HistoryLedger::default();
    assert!(!ledger.record(0));
    assert!(ledger.is_empty());
}

#[test]
fn ledger_sanitizes_persisted_entries() {
    let ledger = HistoryLedger::from_saved(&[0, 5, 5, 10]);
    assert_eq!(ledger.entries(), &[5, 10]);
}

// ---------------- session boundaries ----------------

#[test]
fn reset_records_the_total_and_zeroes() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    eng.handle_event(sample(Some(EDITOR), 0, 0)).unwrap();
    eng.handle_event(sample(Some(EDITOR), 0, 30_000)).unwrap();

    let actions = eng.handle_event(Event::ResetTime { now_ms: 30_000 }).unwrap();
    assert!(actions.contains(&Action::SavePreviousTime(30)));
    assert!(actions.contains(&Action::SaveHistory(vec![30])));
    assert_eq!(eng.total_secs(30_000), 0);
    assert_eq!(eng.history_list(), vec![30]);
}

#[test]
fn reset_at_zero_is_a_noop() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    let actions = eng.handle_event(Event::ResetTime { now_ms: 0 }).unwrap();
    assert!(actions.is_empty());
    assert!(eng.history_list().is_empty());
}

#[test]
fn resume_restores_an_entry_and_records_the_current_total() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    // first session: 30 s, then reset
    eng.handle_event(sample(Some(EDITOR), 0, 0)).unwrap();
    eng.handle_event(sample(Some(EDITOR), 0, 30_000)).unwrap();
    eng.handle_event(Event::ResetTime { now_ms: 30_000 }).unwrap();

    // second session: 20 s
    eng.handle_event(sample(Some(EDITOR), 0, 40_000)).unwrap();
    eng.handle_event(sample(Some(EDITOR), 0, 60_000)).unwrap();
    assert_eq!(eng.total_secs(60_000), 20);

    eng.handle_event(Event::ResumePrevious { index: 0, now_ms: 60_000 }).unwrap();

    assert_eq!(eng.total_secs(60_000), 30);
    assert_eq!(eng.history_list(), vec![20, 30]);
}

#[test]
fn resume_with_empty_history_is_rejected() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    let err = eng
        .handle_event(Event::ResumePrevious { index: 0, now_ms: 0 })
        .unwrap_err();
    assert_eq!(err, Error::NothingToResume);
}

#[test]
fn set_total_discards_the_running_segment() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    eng.handle_event(sample(Some(EDITOR), 0, 0)).unwrap();
    eng.handle_event(Event::SetTotal { seconds: 7, now_ms: 100_000 }).unwrap();

    // still paused until the next sample
    assert_eq!(eng.total_secs(200_000), 7);

    eng.handle_event(sample(Some(EDITOR), 0, 200_000)).unwrap();
    assert_eq!(eng.total_secs(205_000), 12);
}

#[test]
fn autosave_checkpoints_the_live_total() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    eng.handle_event(sample(Some(EDITOR), 0, 0)).unwrap();
    let actions = eng.handle_event(Event::AutosaveTick { now_ms: 10_000 }).unwrap();

    assert_eq!(actions, vec![Action::SavePreviousTime(10)]);
    assert!(eng.history_list().is_empty());
}

#[test]
fn shutdown_records_the_final_total() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    eng.handle_event(sample(Some(EDITOR), 0, 0)).unwrap();
    eng.handle_event(sample(Some(EDITOR), 0, 42_000)).unwrap();

    let actions = eng.shutdown(42_000);
    assert!(actions.contains(&Action::SaveHistory(vec![42])));
    assert!(actions.contains(&Action::SavePreviousTime(42)));
    assert!(actions.contains(&Action::SaveSettings));
}

// ---------------- settings events ----------------

#[test]
fn zero_idle_timeout_is_rejected() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    let err = eng
        .handle_event(Event::SetIdleTimeout { seconds: 0, now_ms: 0 })
        .unwrap_err();
    assert_eq!(err, Error::ZeroIdleTimeout);
    assert_eq!(eng.idle_timeout_secs(), 30);
}

#[test]
fn idle_timeout_change_applies_to_the_gate() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    eng.handle_event(Event::SetIdleTimeout { seconds: 5, now_ms: 0 }).unwrap();

    eng.handle_event(sample(Some(EDITOR), 0, 0)).unwrap();
    eng.handle_event(sample(Some(EDITOR), 5_000, 10_000)).unwrap();

    // paused at now - idle = t=5
    assert_eq!(eng.total_secs(10_000), 5);
}

#[test]
fn goal_change_persists_and_rederives() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    eng.handle_event(Event::SetTotal { seconds: 10, now_ms: 0 }).unwrap();
    let actions = eng.handle_event(Event::SetGoal { seconds: 5, now_ms: 0 }).unwrap();

    assert!(actions.contains(&Action::SaveSettings));
    assert!(eng.snapshot(0).goal_reached);
}

// ---------------- gestures ----------------

#[test]
fn add_gesture_waits_for_a_foreground_and_tracks_it() {
    let mut eng = engine(&settings(30, 0, &[]));

    eng.handle_event(Event::ArmAddProgram { now_ms: 0 }).unwrap();

    // no foreground yet: stays armed
    eng.handle_event(sample(None, 0, 200)).unwrap();
    assert_eq!(eng.snapshot(200).pending_gesture, Some("add"));

    // our own window does not count as a target
    eng.handle_event(sample(Some(SELF_EXE), 0, 400)).unwrap();
    assert_eq!(eng.snapshot(400).pending_gesture, Some("add"));

    let actions = eng.handle_event(sample(Some(BROWSER), 0, 600)).unwrap();
    let notes = notifications(&actions);
    assert_eq!(notes.len(), 1);
    assert!(notes[0].contains("firefox"));
    assert!(actions.contains(&Action::SaveSettings));
    assert!(eng.tracked_programs().contains_key(BROWSER));
    assert_eq!(eng.snapshot(600).pending_gesture, None);

    // the added program counts from the very sample that completed the add
    eng.handle_event(sample(Some(BROWSER), 0, 5_600)).unwrap();
    assert_eq!(eng.total_secs(5_600), 5);
}

#[test]
fn add_gesture_on_an_already_tracked_program() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    eng.handle_event(Event::ArmAddProgram { now_ms: 0 }).unwrap();
    let actions = eng.handle_event(sample(Some(EDITOR), 0, 200)).unwrap();

    let notes = notifications(&actions);
    assert_eq!(notes.len(), 1);
    assert!(notes[0].contains("Already tracking"));
    assert!(!actions.contains(&Action::SaveSettings));
}

#[test]
fn remove_gesture_untracks_the_focused_program() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    eng.handle_event(Event::ArmRemoveProgram { now_ms: 0 }).unwrap();
    let actions = eng.handle_event(sample(Some(EDITOR), 0, 200)).unwrap();

    assert!(notifications(&actions)[0].contains("Stopped tracking"));
    assert!(actions.contains(&Action::SaveSettings));
    assert!(!eng.tracked_programs().contains_key(EDITOR));
}

#[test]
fn later_gesture_wins() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    eng.handle_event(Event::ArmAddProgram { now_ms: 0 }).unwrap();
    eng.handle_event(Event::ArmRemoveProgram { now_ms: 100 }).unwrap();

    let actions = eng.handle_event(sample(Some(EDITOR), 0, 200)).unwrap();
    assert!(notifications(&actions)[0].contains("Stopped tracking"));
}

// ---------------- border ----------------

#[test]
fn border_is_driven_on_edges_only() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    // not working at startup: one show
    let actions = eng.handle_event(sample(Some(BROWSER), 0, 0)).unwrap();
    assert_eq!(border_edges(&actions), vec![true]);

    // still not working: no repeat
    let actions = eng.handle_event(sample(Some(BROWSER), 0, 200)).unwrap();
    assert!(border_edges(&actions).is_empty());

    // work starts: one hide
    let actions = eng.handle_event(sample(Some(EDITOR), 0, 400)).unwrap();
    assert_eq!(border_edges(&actions), vec![false]);

    // goes idle: one show
    let actions = eng.handle_event(sample(Some(EDITOR), 30_000, 30_400)).unwrap();
    assert_eq!(border_edges(&actions), vec![true]);
}

#[test]
fn border_toggle_hides_an_active_border() {
    let mut eng = engine(&settings(30, 0, &[EDITOR]));

    let actions = eng.handle_event(sample(Some(BROWSER), 0, 0)).unwrap();
    assert_eq!(border_edges(&actions), vec![true]);

    let actions = eng.handle_event(Event::ToggleBorder { now_ms: 200 }).unwrap();
    assert_eq!(border_edges(&actions), vec![false]);
    assert!(actions.contains(&Action::SaveSettings));

    // disabled: no border activity on further samples
    let actions = eng.handle_event(sample(Some(BROWSER), 0, 400)).unwrap();
    assert!(border_edges(&actions).is_empty());
}

// ---------------- formatting ----------------

#[test]
fn formats_and_clamps_hms() {
    assert_eq!(format_hms(0), "00:00:00");
    assert_eq!(format_hms(65), "00:01:05");
    assert_eq!(format_hms(MAX_DISPLAY_SECS), "99:59:59");
    assert_eq!(format_hms(MAX_DISPLAY_SECS + 500), "99:59:59");
}

#[test]
fn parses_times() {
    assert_eq!(parse_hms("90"), Some(90));
    assert_eq!(parse_hms("01:30"), Some(90));
    assert_eq!(parse_hms("01:00:05"), Some(3605));
    assert_eq!(parse_hms(""), None);
    assert_eq!(parse_hms("abc"), None);
    assert_eq!(parse_hms("1:2:3:4"), None);
}
