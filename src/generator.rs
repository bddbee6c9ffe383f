// src/generator.rs
// Precomputed tone buffers for Morse playback

use crate::error::MorseError;
use crate::{RAMP_SAMPLES, SAMPLE_RATE, TONE_FREQUENCY, UNIT_DURATION};
use std::f64::consts::PI;

/// Longest accepted dit, in samples (about six minutes at 44.1 kHz).
pub const MAX_DIT_SAMPLES: usize = 1 << 24;

/// Sample rate, timing unit and pitch of the synthesized tones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneConfig {
    pub sample_rate: u32,
    /// Length of one dit, in seconds.
    pub unit_duration: f64,
    pub frequency: f64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            unit_duration: UNIT_DURATION,
            frequency: TONE_FREQUENCY,
        }
    }
}

impl ToneConfig {
    pub fn new(sample_rate: u32, unit_duration: f64, frequency: f64) -> Self {
        Self {
            sample_rate,
            unit_duration,
            frequency,
        }
    }

    /// Rejects non-positive values and dits outside `1..=MAX_DIT_SAMPLES`
    /// samples. Returns the dit length in samples.
    pub fn validate(&self) -> Result<usize, MorseError> {
        if self.sample_rate == 0 {
            return Err(MorseError::InvalidParameter {
                name: "sample_rate",
                value: 0.0,
            });
        }
        if !(self.unit_duration.is_finite() && self.unit_duration > 0.0) {
            return Err(MorseError::InvalidParameter {
                name: "unit_duration",
                value: self.unit_duration,
            });
        }
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(MorseError::InvalidParameter {
                name: "frequency",
                value: self.frequency,
            });
        }

        // Checked as f64 so a huge duration cannot saturate the cast.
        let dit_samples = (self.sample_rate as f64 * self.unit_duration).round();
        if !(1.0..=MAX_DIT_SAMPLES as f64).contains(&dit_samples) {
            return Err(MorseError::InvalidParameter {
                name: "unit_duration",
                value: self.unit_duration,
            });
        }
        Ok(dit_samples as usize)
    }
}

/// The three canonical buffers every transmission is assembled from.
///
/// Built once by [`ToneSet::synthesize`] and read-only afterwards, so one
/// instance can back any number of playbacks by shared reference.
#[derive(Debug, Clone)]
pub struct ToneSet {
    config: ToneConfig,
    short_tone: Vec<f32>,
    long_tone: Vec<f32>,
    silence: Vec<f32>,
}

impl ToneSet {
    /// Synthesizes the dit, dah and silence buffers for `config`.
    ///
    /// The dit lasts `round(sample_rate * unit_duration)` samples, the dah
    /// exactly three times that and the silence exactly twice that. Both tones
    /// get a linear fade over [`RAMP_SAMPLES`] samples at each end.
    pub fn synthesize(config: ToneConfig) -> Result<Self, MorseError> {
        let dit_samples = config.validate()?;

        let (Some(long_samples), Some(silence_samples)) =
            (dit_samples.checked_mul(3), dit_samples.checked_mul(2))
        else {
            return Err(MorseError::InvalidParameter {
                name: "unit_duration",
                value: config.unit_duration,
            });
        };

        let mut short_tone = sine_wave(config.frequency, config.sample_rate, dit_samples);
        let mut long_tone = sine_wave(config.frequency, config.sample_rate, long_samples);
        let silence = vec![0.0; silence_samples];

        apply_ramp(&mut short_tone, RAMP_SAMPLES);
        apply_ramp(&mut long_tone, RAMP_SAMPLES);

        log::debug!(
            "Synthesized tones at {} Hz: short={} long={} silence={} samples",
            config.frequency,
            short_tone.len(),
            long_tone.len(),
            silence.len()
        );

        Ok(Self {
            config,
            short_tone,
            long_tone,
            silence,
        })
    }

    pub fn config(&self) -> &ToneConfig {
        &self.config
    }

    pub fn short_tone(&self) -> &[f32] {
        &self.short_tone
    }

    pub fn long_tone(&self) -> &[f32] {
        &self.long_tone
    }

    pub fn silence(&self) -> &[f32] {
        &self.silence
    }
}

fn sine_wave(frequency: f64, sample_rate: u32, len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            (2.0 * PI * frequency * t).sin() as f32
        })
        .collect()
}

/// Scales the sample `t` positions in from either end by `t / ramp_len`.
/// The ramp never reaches past the middle of the buffer.
fn apply_ramp(wave: &mut [f32], ramp_len: usize) {
    let len = wave.len();
    let ramp = ramp_len.min(len / 2);
    for t in 0..ramp {
        let gain = t as f32 / ramp_len as f32;
        wave[t] *= gain;
        wave[len - 1 - t] *= gain;
    }
}
