// src/stream.rs
// Open/close lifecycle of the audio output stream

use crate::error::{MorseError, SinkError};
use crate::player::{AudioSink, Player};
use crate::translator::MorseToken;

/// Something that can open a fresh audio sink.
pub trait OutputDevice {
    type Sink: AudioSink;

    fn open(&mut self) -> Result<Self::Sink, SinkError>;
}

/// Owns at most one open sink for a device.
///
/// `open` and `close` are idempotent. The sink is closed on drop.
pub struct StreamManager<D: OutputDevice> {
    device: D,
    sink: Option<D::Sink>,
}

impl<D: OutputDevice> StreamManager<D> {
    pub fn new(device: D) -> Self {
        Self { device, sink: None }
    }

    pub fn is_open(&self) -> bool {
        self.sink.is_some()
    }

    /// Returns the open sink, opening one first if needed.
    pub fn open(&mut self) -> Result<&mut D::Sink, SinkError> {
        let sink = match self.sink.take() {
            Some(sink) => sink,
            None => {
                log::info!("Opening audio output stream");
                self.device.open()?
            }
        };
        Ok(self.sink.insert(sink))
    }

    /// Drains and releases the sink. A no-op when already closed.
    ///
    /// The sink is released even if draining fails.
    pub fn close(&mut self) -> Result<(), SinkError> {
        let Some(mut sink) = self.sink.take() else {
            return Ok(());
        };
        log::info!("Closing audio output stream");
        let result = sink.finish();
        drop(sink);
        result
    }

    /// Opens the stream if necessary, then plays `tokens` on it.
    pub fn ensure_open_and_play<I>(
        &mut self,
        player: &Player<'_>,
        tokens: I,
    ) -> Result<(), MorseError>
    where
        I: IntoIterator<Item = MorseToken>,
    {
        let sink = self.open()?;
        player.play(tokens, sink)?;
        Ok(())
    }
}

impl<D: OutputDevice> Drop for StreamManager<D> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::warn!("Failed to close audio stream cleanly: {}", e);
        }
    }
}
