// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tone playback for generated scales.
//!
//! Playback sits behind the [`TonePlayer`] trait so the music core never
//! depends on an output device. The concrete player is picked once at
//! startup from [`PlaybackConfig`].

#[cfg(feature = "audio")]
pub mod audio;

#[cfg(feature = "audio")]
pub use audio::AudioPlayer;

use tracing::debug;

use crate::config::{PlaybackConfig, PlayerKind};
use crate::error::Result;
use crate::music::Scale;

/// Something that can sound out a scale
pub trait TonePlayer {
    /// Play every note of `scale` in order, blocking until done
    fn play(&mut self, scale: &Scale) -> Result<()>;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}

/// MIDI note numbers for a scale voiced upward from `octave`.
///
/// Steps accumulate without wrapping, so a scale that spans more than an
/// octave keeps climbing. Notes above the MIDI range are clamped to 127.
pub fn midi_notes(scale: &Scale, octave: i8) -> Vec<u8> {
    let base = (i64::from(octave) + 1) * 12 + scale.root().pitch_class() as i64;
    let mut notes = Vec::with_capacity(scale.len());
    let mut current = base;
    notes.push(current.clamp(0, 127) as u8);
    for &step in scale.intervals().steps() {
        current += i64::from(step);
        notes.push(current.clamp(0, 127) as u8);
    }
    notes
}

/// Equal-tempered frequency of a MIDI note (A4 = 440 Hz)
pub fn frequency(midi_note: u8) -> f32 {
    440.0 * 2f32.powf((f32::from(midi_note) - 69.0) / 12.0)
}

/// Player that only logs what it would play
#[derive(Debug, Clone)]
pub struct SilentPlayer {
    octave: i8,
}

impl SilentPlayer {
    /// Create a silent player voicing from `octave`
    pub fn new(octave: i8) -> Self {
        Self { octave }
    }
}

impl TonePlayer for SilentPlayer {
    fn play(&mut self, scale: &Scale) -> Result<()> {
        for (pitch, note) in scale.notes().iter().zip(midi_notes(scale, self.octave)) {
            debug!(%pitch, note, hz = frequency(note), "silent tone");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "silent"
    }
}

/// Pick the player named in the settings.
///
/// Falls back to [`SilentPlayer`] when audio output is not compiled in.
pub fn select_player(config: &PlaybackConfig) -> Box<dyn TonePlayer> {
    let player: Box<dyn TonePlayer> = match config.player {
        PlayerKind::Silent => Box::new(SilentPlayer::new(config.octave)),
        #[cfg(feature = "audio")]
        PlayerKind::Audio => Box::new(AudioPlayer::new(config.clone())),
        #[cfg(not(feature = "audio"))]
        PlayerKind::Audio => {
            tracing::warn!("audio playback not compiled in, using silent player");
            Box::new(SilentPlayer::new(config.octave))
        }
    };
    debug!(player = player.name(), "selected tone player");
    player
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::{IntervalSequence, Pitch};

    #[test]
    fn test_midi_notes_climb_past_octave() {
        let scale = Scale::new(Pitch::C, IntervalSequence::new(vec![2, 2, 1, 2, 2, 2, 1]));
        assert_eq!(midi_notes(&scale, 4), vec![60, 62, 64, 65, 67, 69, 71, 72]);

        let fifths = Scale::new(Pitch::A, IntervalSequence::new(vec![7, 7, 7]));
        assert_eq!(midi_notes(&fifths, 3), vec![57, 64, 71, 78]);
    }

    #[test]
    fn test_midi_notes_clamp() {
        let scale = Scale::new(Pitch::B, IntervalSequence::new(vec![12, 100]));
        assert_eq!(midi_notes(&scale, 9), vec![127, 127, 127]);
        assert_eq!(midi_notes(&Scale::new(Pitch::C, IntervalSequence::default()), -2), vec![0]);
    }

    #[test]
    fn test_frequency() {
        assert!((frequency(69) - 440.0).abs() < 0.001);
        assert!((frequency(81) - 880.0).abs() < 0.01);
        assert!((frequency(60) - 261.63).abs() < 0.01);
    }

    #[test]
    fn test_select_silent_player() {
        let mut player = select_player(&PlaybackConfig::default());
        assert_eq!(player.name(), "silent");
        let scale = Scale::new(Pitch::E, IntervalSequence::new(vec![3, 4]));
        assert!(player.play(&scale).is_ok());
    }
}
