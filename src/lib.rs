//! Pomodoro Timer Library
//!
//! This library provides the core functionality for the terminal Pomodoro
//! timer. It includes:
//! - Timer engine cycling between work and break intervals
//! - A scoped one-second countdown driver
//! - Sound playback for the completion chime
//! - CLI command parsing, display utilities and the interactive session
//! - Type definitions for modes, durations and state

pub mod cli;
pub mod sound;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    format_time, DurationTable, Mode, OutputFormat, PomodoroConfig, Snapshot, TimerState,
    WorkLength, SESSIONS_UNTIL_LONG_BREAK,
};

pub use timer::{CountdownDriver, TimerEngine, TimerEvent};

// Re-export sound types
pub use sound::{try_create_player, MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer, Tone};
