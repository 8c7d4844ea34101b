//! Tone description for the completion chime.

use std::time::Duration;

/// Frequency of C5 in Hz.
pub const C5_HZ: f32 = 523.25;

/// Length of an eighth note at 120 BPM.
pub const EIGHTH_NOTE: Duration = Duration::from_millis(250);

/// A short sine tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Pitch in Hz
    pub frequency_hz: f32,
    /// How long the tone sounds
    pub duration: Duration,
    /// Linear amplitude, 0.0 to 1.0
    pub volume: f32,
}

impl Tone {
    /// Creates a tone at full volume.
    #[must_use]
    pub fn new(frequency_hz: f32, duration: Duration) -> Self {
        Self {
            frequency_hz,
            duration,
            volume: 1.0,
        }
    }

    /// Sets the amplitude, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    /// The interval-completion chime: an eighth-note C5.
    #[must_use]
    pub fn chime() -> Self {
        Self::new(C5_HZ, EIGHTH_NOTE).with_volume(0.3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chime_is_eighth_note_c5() {
        let tone = Tone::chime();
        assert_eq!(tone.frequency_hz, C5_HZ);
        assert_eq!(tone.duration, Duration::from_millis(250));
        assert!(tone.volume > 0.0 && tone.volume <= 1.0);
    }

    #[test]
    fn test_volume_is_clamped() {
        let tone = Tone::new(440.0, EIGHTH_NOTE).with_volume(3.0);
        assert_eq!(tone.volume, 1.0);

        let tone = Tone::new(440.0, EIGHTH_NOTE).with_volume(-1.0);
        assert_eq!(tone.volume, 0.0);
    }
}
