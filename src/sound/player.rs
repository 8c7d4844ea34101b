//! Sound player implementation using rodio.
//!
//! The chime is synthesized rather than decoded from a file, so no sound
//! assets need to be shipped or discovered.

use std::sync::Arc;

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::SoundError;
use super::tone::Tone;

/// A sound player that uses rodio for audio playback.
///
/// Playback is non-blocking; tones continue playing in the background.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
}

impl RodioSoundPlayer {
    /// Creates a new sound player on the default output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Plays a sine tone in the background.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::StreamError` if a sink cannot be attached to the
    /// output stream.
    pub fn play_tone(&self, tone: &Tone) -> Result<(), SoundError> {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;

        let source = SineWave::new(tone.frequency_hz)
            .take_duration(tone.duration)
            .amplify(tone.volume);

        sink.append(source);
        sink.detach(); // Non-blocking: sound continues after function returns

        debug!(
            frequency_hz = tone.frequency_hz,
            duration_ms = tone.duration.as_millis() as u64,
            "Tone playback started (detached)"
        );
        Ok(())
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer").finish_non_exhaustive()
    }
}

/// Creates a sound player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and None is returned.
#[must_use]
pub fn try_create_player() -> Option<Arc<RodioSoundPlayer>> {
    match RodioSoundPlayer::new() {
        Ok(player) => Some(Arc::new(player)),
        Err(e) => {
            warn!("{}", disabled_notice(&e));
            None
        }
    }
}

/// Describes why sound was turned off at startup.
fn disabled_notice(e: &SoundError) -> String {
    if e.is_device_error() {
        format!("Audio not available, sound disabled: {} ({})", e, e.suggestion())
    } else {
        format!("Audio setup failed, sound disabled: {}", e)
    }
}
