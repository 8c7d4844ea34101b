//! Core data types for the Pomodoro Timer.
//!
//! This module defines the data structures used for:
//! - Timer modes and their display themes
//! - The mode → duration table
//! - Timer state management
//! - Serializable state snapshots for the JSON output

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Number of completed work sessions after which a long break is taken.
pub const SESSIONS_UNTIL_LONG_BREAK: u32 = 4;

/// Classic work interval (25 minutes).
pub const WORK_SECONDS_CLASSIC: u32 = 25 * 60;
/// Shorter work interval variant (20 minutes).
pub const WORK_SECONDS_SHORT: u32 = 20 * 60;
/// Short break interval (5 minutes).
pub const SHORT_BREAK_SECONDS: u32 = 5 * 60;
/// Long break interval (15 minutes).
pub const LONG_BREAK_SECONDS: u32 = 15 * 60;

// ============================================================================
// Mode
// ============================================================================

/// The kind of interval the timer is counting down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Focused work interval
    #[default]
    Work,
    /// Short break between work intervals
    ShortBreak,
    /// Long break after every fourth work interval
    LongBreak,
}

impl Mode {
    /// All modes, in display order.
    pub const ALL: [Mode; 3] = [Mode::Work, Mode::ShortBreak, Mode::LongBreak];

    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Work => "work",
            Mode::ShortBreak => "short_break",
            Mode::LongBreak => "long_break",
        }
    }

    /// Returns the label shown on screen.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Work => "作業",
            Mode::ShortBreak => "短い休憩",
            Mode::LongBreak => "長い休憩",
        }
    }

    /// Returns the display theme for this mode.
    pub fn theme(&self) -> Theme {
        match self {
            Mode::Work => Theme { accent: "\x1b[31m" },
            Mode::ShortBreak => Theme { accent: "\x1b[32m" },
            Mode::LongBreak => Theme { accent: "\x1b[34m" },
        }
    }

    /// Returns true for either kind of break.
    pub fn is_break(&self) -> bool {
        matches!(self, Mode::ShortBreak | Mode::LongBreak)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal colouring associated with a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// ANSI escape sequence that starts the accent colour
    pub accent: &'static str,
}

impl Theme {
    /// ANSI escape sequence that resets all attributes.
    pub const RESET: &'static str = "\x1b[0m";

    /// Wraps `text` in the accent colour.
    pub fn paint(&self, text: &str) -> String {
        format!("{}{}{}", self.accent, text, Self::RESET)
    }
}

// ============================================================================
// DurationTable
// ============================================================================

/// Length of the work interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum WorkLength {
    /// 25 minute work sessions
    #[default]
    #[value(alias = "25")]
    Classic,
    /// 20 minute work sessions
    #[value(alias = "20")]
    Short,
}

impl WorkLength {
    /// Returns the work interval in seconds.
    pub fn seconds(&self) -> u32 {
        match self {
            WorkLength::Classic => WORK_SECONDS_CLASSIC,
            WorkLength::Short => WORK_SECONDS_SHORT,
        }
    }
}

/// Fixed mapping from mode to its countdown duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationTable {
    work: u32,
    short_break: u32,
    long_break: u32,
}

impl DurationTable {
    /// Creates the table for the given work length.
    pub fn new(work_length: WorkLength) -> Self {
        Self {
            work: work_length.seconds(),
            short_break: SHORT_BREAK_SECONDS,
            long_break: LONG_BREAK_SECONDS,
        }
    }

    /// Returns the configured duration of `mode` in seconds.
    pub fn duration(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Work => self.work,
            Mode::ShortBreak => self.short_break,
            Mode::LongBreak => self.long_break,
        }
    }
}

impl Default for DurationTable {
    fn default() -> Self {
        Self::new(WorkLength::default())
    }
}

// ============================================================================
// PomodoroConfig
// ============================================================================

/// How the session presents state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// A single status line rewritten in place
    #[default]
    Status,
    /// One JSON snapshot per line
    Json,
}

/// Configuration for a timer session, resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroConfig {
    /// Work interval length
    pub work_length: WorkLength,
    /// Whether to play a chime when an interval completes
    pub sound: bool,
    /// Output format
    pub output: OutputFormat,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_length: WorkLength::Classic,
            sound: true,
            output: OutputFormat::Status,
        }
    }
}

impl PomodoroConfig {
    /// Sets the work interval length.
    pub fn with_work_length(mut self, work_length: WorkLength) -> Self {
        self.work_length = work_length;
        self
    }

    /// Enables or disables the completion chime.
    pub fn with_sound(mut self, sound: bool) -> Self {
        self.sound = sound;
        self
    }

    /// Sets the output format.
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Builds the duration table for this configuration.
    pub fn duration_table(&self) -> DurationTable {
        DurationTable::new(self.work_length)
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Represents the current state of the timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    /// Current mode
    pub mode: Mode,
    /// Remaining seconds in the current interval
    pub remaining_seconds: u32,
    /// Whether the countdown is running
    pub is_running: bool,
    /// Number of work intervals that ran to zero
    pub completed_work_sessions: u32,
}

impl TimerState {
    /// Creates a fresh state: a full, paused work interval.
    pub fn new(durations: &DurationTable) -> Self {
        Self {
            mode: Mode::Work,
            remaining_seconds: durations.duration(Mode::Work),
            is_running: false,
            completed_work_sessions: 0,
        }
    }

    /// Stops the countdown and loads a full interval of `mode`.
    pub fn switch_mode(&mut self, mode: Mode, durations: &DurationTable) {
        self.is_running = false;
        self.mode = mode;
        self.remaining_seconds = durations.duration(mode);
    }

    /// Starts the countdown.
    ///
    /// Returns false (and stays paused) if there is no time left.
    pub fn start(&mut self) -> bool {
        if self.remaining_seconds == 0 {
            return false;
        }
        self.is_running = true;
        true
    }

    /// Pauses the countdown, keeping the remaining time.
    pub fn pause(&mut self) {
        self.is_running = false;
    }

    /// Decrements the timer by one second.
    ///
    /// Returns true if the timer has completed (reached 0).
    pub fn tick(&mut self) -> bool {
        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
        }
        self.remaining_seconds == 0
    }

    /// Increments the completed work session count.
    pub fn increment_completed_work_sessions(&mut self) {
        self.completed_work_sessions += 1;
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Serializable view of the timer state for the JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Current mode
    pub mode: Mode,
    /// Remaining seconds
    #[serde(rename = "remainingSeconds")]
    pub remaining_seconds: u32,
    /// Remaining time formatted as MM:SS
    pub display: String,
    /// Whether the countdown is running
    #[serde(rename = "isRunning")]
    pub is_running: bool,
    /// Completed work sessions
    #[serde(rename = "completedWorkSessions")]
    pub completed_work_sessions: u32,
}

impl Snapshot {
    /// Creates a snapshot from timer state.
    pub fn from_timer_state(state: &TimerState) -> Self {
        Self {
            mode: state.mode,
            remaining_seconds: state.remaining_seconds,
            display: format_time(state.remaining_seconds),
            is_running: state.is_running,
            completed_work_sessions: state.completed_work_sessions,
        }
    }
}

/// Formats seconds as zero-padded `MM:SS`.
///
/// Minutes are not wrapped at 60, so 3600 seconds renders as `60:00`.
pub fn format_time(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

// ============================================================================
// Tests
// ============================================================================
