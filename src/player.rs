// src/player.rs
// Streams precomputed tone buffers to an open audio sink

use crate::error::SinkError;
use crate::generator::ToneSet;
use crate::translator::MorseToken;

/// Destination for mono f32 samples at the tone set's sample rate.
///
/// `write` blocks until the whole buffer has been accepted.
pub trait AudioSink {
    fn write(&mut self, samples: &[f32]) -> Result<(), SinkError>;

    /// Called before the sink is released. Implementations that queue
    /// audio should wait here until it has been played.
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Renders into memory.
impl AudioSink for Vec<f32> {
    fn write(&mut self, samples: &[f32]) -> Result<(), SinkError> {
        self.extend_from_slice(samples);
        Ok(())
    }
}

/// Plays token sequences using a shared, read-only [`ToneSet`].
///
/// Each token writes its own buffer (dit, dah, or silence for a gap)
/// followed by one silence buffer, so all spacing comes from buffer lengths.
#[derive(Debug, Clone, Copy)]
pub struct Player<'a> {
    tones: &'a ToneSet,
}

impl<'a> Player<'a> {
    pub fn new(tones: &'a ToneSet) -> Self {
        Self { tones }
    }

    fn buffer_for(&self, token: MorseToken) -> &'a [f32] {
        match token {
            MorseToken::Dot => self.tones.short_tone(),
            MorseToken::Dash => self.tones.long_tone(),
            MorseToken::Gap => self.tones.silence(),
        }
    }

    /// Writes every token in order. Stops at the first failed write and
    /// returns its error; nothing is retried or skipped.
    pub fn play<I, S>(&self, tokens: I, sink: &mut S) -> Result<(), SinkError>
    where
        I: IntoIterator<Item = MorseToken>,
        S: AudioSink + ?Sized,
    {
        let mut count = 0usize;
        for token in tokens {
            log::trace!("Playing {:?}", token);
            sink.write(self.buffer_for(token))?;
            sink.write(self.tones.silence())?;
            count += 1;
        }
        log::debug!("Played {} tokens", count);
        Ok(())
    }

    /// Number of samples `play` writes for `tokens`.
    pub fn samples_for(&self, tokens: &[MorseToken]) -> usize {
        tokens
            .iter()
            .map(|&t| self.buffer_for(t).len() + self.tones.silence().len())
            .sum()
    }

    /// Playback length of `tokens` in seconds.
    pub fn duration_of(&self, tokens: &[MorseToken]) -> f64 {
        self.samples_for(tokens) as f64 / self.tones.config().sample_rate as f64
    }
}
