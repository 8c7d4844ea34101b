//! Sound playback for the Pomodoro Timer.
//!
//! The timer engine only knows the [`SoundPlayer`] trait. It is handed an
//! optional player at construction time and calls [`SoundPlayer::play_tone`]
//! when an interval completes, ignoring the result:
//!
//! ```text
//! ┌──────────────────┐      ┌──────────────────┐
//! │   TimerEngine    │─────▶│   SoundPlayer    │
//! └──────────────────┘      └────────┬─────────┘
//!                                    │
//!                  ┌─────────────────┼─────────────────┐
//!                  ▼                                   ▼
//!        ┌──────────────────┐                ┌──────────────────┐
//!        │ RodioSoundPlayer │                │ MockSoundPlayer  │
//!        │  (sine wave)     │                │  (tests)         │
//!        └──────────────────┘                └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use pomodoro_term::sound::{RodioSoundPlayer, SoundPlayer, Tone};
//!
//! // Create a player (may fail if no audio device)
//! let player = RodioSoundPlayer::new().expect("audio init");
//! player.play_tone(&Tone::chime()).expect("playback failed");
//! ```

mod error;
mod player;
mod tone;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use tone::{Tone, C5_HZ, EIGHTH_NOTE};

/// Capability to play a short tone.
///
/// Implementations should be non-blocking; the tone plays in the background.
pub trait SoundPlayer {
    /// Starts playing `tone`.
    ///
    /// # Errors
    ///
    /// Returns an error if playback could not be started.
    fn play_tone(&self, tone: &Tone) -> Result<(), SoundError>;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play_tone(&self, tone: &Tone) -> Result<(), SoundError> {
        RodioSoundPlayer::play_tone(self, tone)
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<Tone>>,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `play_tone` call return an error.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<Tone> {
        self.play_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play_tone(&self, tone: &Tone) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        if let Ok(mut calls) = self.play_calls.lock() {
            calls.push(*tone);
        }
        Ok(())
    }
}
