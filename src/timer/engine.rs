//! Timer engine for the Pomodoro Timer.
//!
//! This module provides the core timer functionality:
//! - Mode switching (Work / ShortBreak / LongBreak)
//! - Start/pause toggling and reset
//! - One-second countdown steps
//! - Session rotation with a long break after every 4 work sessions
//! - Completion chime through an injected sound player

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::sound::{SoundPlayer, Tone};
use crate::types::{DurationTable, Mode, TimerState, SESSIONS_UNTIL_LONG_BREAK};

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// The mode was selected and a full interval loaded
    ModeSwitched {
        /// New mode
        mode: Mode,
    },
    /// Countdown started
    Started {
        /// Mode being counted down
        mode: Mode,
        /// Remaining seconds at start
        remaining_seconds: u32,
    },
    /// Countdown paused by the user
    Paused {
        /// Remaining seconds at pause
        remaining_seconds: u32,
    },
    /// Current interval refilled
    Reset {
        /// Mode that was reset
        mode: Mode,
    },
    /// One second elapsed
    Tick {
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// An interval ran to zero
    Completed {
        /// The mode that completed
        mode: Mode,
        /// Completed work sessions after this completion
        completed_work_sessions: u32,
        /// Mode the rotation switched to
        next: Mode,
    },
}

/// Selects the mode that follows a completed interval.
///
/// `completed_work_sessions` is the count *after* the completed interval has
/// been recorded.
pub fn next_mode(completed: Mode, completed_work_sessions: u32) -> Mode {
    match completed {
        Mode::Work if completed_work_sessions % SESSIONS_UNTIL_LONG_BREAK == 0 => Mode::LongBreak,
        Mode::Work => Mode::ShortBreak,
        Mode::ShortBreak | Mode::LongBreak => Mode::Work,
    }
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that owns the timer state and applies user intents and ticks.
///
/// The engine is synchronous; the periodic tick is supplied by
/// [`CountdownDriver`](super::CountdownDriver).
pub struct TimerEngine {
    /// Current timer state
    state: TimerState,
    /// Mode → duration table
    durations: DurationTable,
    /// Completion chime (None when audio is unavailable or disabled)
    sound: Option<Arc<dyn SoundPlayer>>,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerEngine {
    /// Creates a new TimerEngine in a paused, full work interval.
    pub fn new(
        durations: DurationTable,
        sound: Option<Arc<dyn SoundPlayer>>,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        Self {
            state: TimerState::new(&durations),
            durations,
            sound,
            event_tx,
        }
    }

    /// Stops the countdown and loads a full interval of `mode`.
    pub fn switch_mode(&mut self, mode: Mode) {
        self.state.switch_mode(mode, &self.durations);
        debug!(mode = mode.as_str(), "Mode switched");
        self.emit(TimerEvent::ModeSwitched { mode });
    }

    /// Starts a paused countdown or pauses a running one.
    pub fn toggle(&mut self) {
        if self.state.is_running {
            self.state.pause();
            debug!(remaining = self.state.remaining_seconds, "Countdown paused");
            self.emit(TimerEvent::Paused {
                remaining_seconds: self.state.remaining_seconds,
            });
        } else if self.state.start() {
            debug!(
                mode = self.state.mode.as_str(),
                remaining = self.state.remaining_seconds,
                "Countdown started"
            );
            self.emit(TimerEvent::Started {
                mode: self.state.mode,
                remaining_seconds: self.state.remaining_seconds,
            });
        }
    }

    /// Stops the countdown and refills the current mode's interval.
    pub fn reset(&mut self) {
        let mode = self.state.mode;
        self.state.switch_mode(mode, &self.durations);
        debug!(mode = mode.as_str(), "Countdown reset");
        self.emit(TimerEvent::Reset { mode });
    }

    /// Advances the countdown by one second.
    ///
    /// Ticks while paused are ignored. Returns true if this tick completed
    /// the interval.
    pub fn tick(&mut self) -> bool {
        if !self.state.is_running {
            return false;
        }

        let completed = self.state.tick();

        self.emit(TimerEvent::Tick {
            remaining_seconds: self.state.remaining_seconds,
        });

        if completed {
            self.handle_timer_complete();
        }
        completed
    }

    /// Handles timer completion: stop, chime, rotate.
    fn handle_timer_complete(&mut self) {
        let completed = self.state.mode;
        self.state.pause();
        self.play_chime();

        if completed == Mode::Work {
            self.state.increment_completed_work_sessions();
        }
        let next = next_mode(completed, self.state.completed_work_sessions);

        debug!(
            completed = completed.as_str(),
            next = next.as_str(),
            sessions = self.state.completed_work_sessions,
            "Interval completed"
        );
        self.emit(TimerEvent::Completed {
            mode: completed,
            completed_work_sessions: self.state.completed_work_sessions,
            next,
        });

        self.switch_mode(next);
    }

    fn play_chime(&self) {
        let Some(player) = &self.sound else {
            return;
        };
        if let Err(e) = player.play_tone(&Tone::chime()) {
            debug!("Chime failed, ignoring: {}", e);
        }
    }

    fn emit(&self, event: TimerEvent) {
        // A closed receiver is ignored.
        if self.event_tx.send(event).is_err() {
            debug!("Event receiver dropped");
        }
    }

    /// Returns true if the countdown is running.
    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    /// Returns a reference to the current timer state.
    pub fn get_state(&self) -> &TimerState {
        &self.state
    }

    /// Returns the duration table.
    pub fn durations(&self) -> &DurationTable {
        &self.durations
    }

    /// Returns a mutable reference to the timer state (for testing).
    #[cfg(test)]
    pub fn get_state_mut(&mut self) -> &mut TimerState {
        &mut self.state
    }
}

// ============================================================================
// Tests
// ============================================================================
