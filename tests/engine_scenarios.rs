//! Scenario tests for the timer engine and countdown driver.
//!
//! These tests drive the public API the same way the terminal session does:
//! - TC-S-001: Full work interval with chime and rotation
//! - TC-S-002: Long break after the fourth work session
//! - TC-S-003: Reset during an active countdown
//! - TC-S-004: Breaks always return to work

use std::sync::Arc;

use tokio::sync::mpsc;

use pomodoro_term::sound::{MockSoundPlayer, SoundPlayer};
use pomodoro_term::timer::{CountdownDriver, TimerEngine, TimerEvent};
use pomodoro_term::types::{format_time, DurationTable, Mode, WorkLength};

// ============================================================================
// Test Helpers
// ============================================================================

fn create_engine(
    work_length: WorkLength,
) -> (
    TimerEngine,
    Arc<MockSoundPlayer>,
    mpsc::UnboundedReceiver<TimerEvent>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let sound = Arc::new(MockSoundPlayer::new());
    let engine = TimerEngine::new(
        DurationTable::new(work_length),
        Some(sound.clone() as Arc<dyn SoundPlayer>),
        tx,
    );
    (engine, sound, rx)
}

/// Starts the current interval and ticks it down to zero.
fn run_interval(engine: &mut TimerEngine) {
    engine.toggle();
    let ticks = engine.get_state().remaining_seconds;
    for _ in 0..ticks {
        engine.tick();
    }
}

// ============================================================================
// TC-S-001: Full work interval
// ============================================================================

#[tokio::test(start_paused = true)]
async fn tc_s_001_full_work_interval_through_driver() {
    let (engine, sound, mut rx) = create_engine(WorkLength::Classic);
    let mut driver = CountdownDriver::new(engine);

    driver.toggle();
    for _ in 0..1500 {
        driver.next_tick().await;
    }

    assert_eq!(sound.play_count(), 1, "Chime should fire exactly once");

    let state = driver.state();
    assert_eq!(state.mode, Mode::ShortBreak);
    assert_eq!(state.completed_work_sessions, 1);
    assert_eq!(state.remaining_seconds, 300);
    assert!(!state.is_running);
    assert!(!driver.has_ticker());

    let completions: Vec<TimerEvent> = std::iter::from_fn(|| rx.try_recv().ok())
        .filter(|event| matches!(event, TimerEvent::Completed { .. }))
        .collect();
    assert_eq!(
        completions,
        vec![TimerEvent::Completed {
            mode: Mode::Work,
            completed_work_sessions: 1,
            next: Mode::ShortBreak
        }]
    );
}

#[test]
fn tc_s_001_short_work_length_interval() {
    let (mut engine, sound, _rx) = create_engine(WorkLength::Short);

    assert_eq!(engine.get_state().remaining_seconds, 1200);
    run_interval(&mut engine);

    assert_eq!(sound.play_count(), 1);
    assert_eq!(engine.get_state().mode, Mode::ShortBreak);
}

// ============================================================================
// TC-S-002: Long break after four work sessions
// ============================================================================

#[test]
fn tc_s_002_full_cycle_of_four() {
    let (mut engine, sound, _rx) = create_engine(WorkLength::Classic);

    let mut visited = Vec::new();
    for _ in 0..8 {
        run_interval(&mut engine);
        visited.push(engine.get_state().mode);
    }

    assert_eq!(
        visited,
        vec![
            Mode::ShortBreak,
            Mode::Work,
            Mode::ShortBreak,
            Mode::Work,
            Mode::ShortBreak,
            Mode::Work,
            Mode::LongBreak,
            Mode::Work,
        ]
    );
    assert_eq!(engine.get_state().completed_work_sessions, 4);
    assert_eq!(sound.play_count(), 8);
}

#[test]
fn tc_s_002_partial_sessions_are_not_counted() {
    let (mut engine, _sound, _rx) = create_engine(WorkLength::Classic);

    engine.toggle();
    for _ in 0..1000 {
        engine.tick();
    }
    engine.switch_mode(Mode::ShortBreak);

    assert_eq!(engine.get_state().completed_work_sessions, 0);
}

// ============================================================================
// TC-S-003: Reset during an active countdown
// ============================================================================

#[test]
fn tc_s_003_reset_during_work() {
    let (mut engine, _sound, _rx) = create_engine(WorkLength::Classic);

    engine.toggle();
    for _ in 0..800 {
        engine.tick();
    }
    assert_eq!(engine.get_state().remaining_seconds, 700);

    engine.reset();

    let state = engine.get_state();
    assert_eq!(state.mode, Mode::Work);
    assert_eq!(state.remaining_seconds, 1500);
    assert_eq!(state.completed_work_sessions, 0);
    assert!(!state.is_running);
    assert_eq!(format_time(state.remaining_seconds), "25:00");
}

// ============================================================================
// TC-S-004: Breaks return to work
// ============================================================================

#[test]
fn tc_s_004_breaks_return_to_work() {
    for mode in [Mode::ShortBreak, Mode::LongBreak] {
        let (mut engine, _sound, _rx) = create_engine(WorkLength::Classic);
        engine.switch_mode(mode);

        run_interval(&mut engine);

        let state = engine.get_state();
        assert_eq!(state.mode, Mode::Work);
        assert_eq!(state.remaining_seconds, 1500);
        assert!(!state.is_running, "Next interval needs an explicit start");
    }
}

#[test]
fn tc_s_004_failing_chime_does_not_block_rotation() {
    let (mut engine, sound, _rx) = create_engine(WorkLength::Classic);
    sound.set_should_fail(true);

    run_interval(&mut engine);
    run_interval(&mut engine);

    assert_eq!(engine.get_state().mode, Mode::Work);
    assert_eq!(engine.get_state().completed_work_sessions, 1);
}
