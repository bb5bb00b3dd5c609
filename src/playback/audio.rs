// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Sine-tone playback via cpal.

use std::f32::consts::TAU;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, StreamConfig};
use tracing::debug;

use super::{frequency, midi_notes, TonePlayer};
use crate::config::PlaybackConfig;
use crate::error::{Result, ScalesError};
use crate::music::Scale;

/// Oscillator state shared with the audio callback
#[derive(Debug, Default)]
struct Tone {
    /// Current frequency in Hz, 0.0 for silence
    freq: f32,
    /// Phase in cycles (0.0 - 1.0)
    phase: f32,
}

/// Plays each note as a sine tone on the default output device
pub struct AudioPlayer {
    config: PlaybackConfig,
}

impl AudioPlayer {
    /// Create a player; the device is opened on each `play`
    pub fn new(config: PlaybackConfig) -> Self {
        Self { config }
    }
}

impl TonePlayer for AudioPlayer {
    fn play(&mut self, scale: &Scale) -> Result<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| ScalesError::Playback("No audio device available".to_string()))?;

        let supported = device.default_output_config().map_err(|e| {
            ScalesError::Playback(format!("Failed to get default config: {}", e))
        })?;
        if supported.sample_format() != SampleFormat::F32 {
            return Err(ScalesError::Playback(format!(
                "Unsupported sample format: {:?}",
                supported.sample_format()
            )));
        }

        let stream_config: StreamConfig = supported.config();
        let sample_rate = stream_config.sample_rate.0 as f32;
        let channels = stream_config.channels as usize;
        let volume = self.config.volume;

        let tone = Arc::new(Mutex::new(Tone::default()));
        let callback_tone = Arc::clone(&tone);

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let Ok(mut tone) = callback_tone.lock() else {
                        data.fill(0.0);
                        return;
                    };
                    for frame in data.chunks_mut(channels) {
                        let sample = if tone.freq > 0.0 {
                            (tone.phase * TAU).sin() * volume
                        } else {
                            0.0
                        };
                        tone.phase = (tone.phase + tone.freq / sample_rate) % 1.0;
                        frame.fill(sample);
                    }
                },
                move |err| {
                    tracing::error!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| ScalesError::Playback(format!("Failed to build stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| ScalesError::Playback(format!("Failed to start stream: {}", e)))?;

        let note_length = Duration::from_millis(self.config.note_ms);
        for note in midi_notes(scale, self.config.octave) {
            let hz = frequency(note);
            debug!(note, hz, "tone");
            if let Ok(mut tone) = tone.lock() {
                tone.freq = hz;
            }
            thread::sleep(note_length);
        }

        if let Ok(mut tone) = tone.lock() {
            tone.freq = 0.0;
        }
        // Let the last buffer drain before the stream is dropped
        thread::sleep(Duration::from_millis(50));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "audio"
    }
}
