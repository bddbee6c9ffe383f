// src/transmitter.rs
// Text-to-audio Morse transmitter

use crate::error::MorseError;
use crate::generator::{ToneConfig, ToneSet};
use crate::normalize::{KanaNormalizer, Normalize};
use crate::output::CpalDevice;
use crate::player::Player;
use crate::stream::{OutputDevice, StreamManager};
use crate::table::SymbolTable;
use crate::translator::{MorseToken, Translator};

/// Translates text and plays it on an output device.
///
/// Tones are synthesized once in the constructor. The output stream opens
/// on the first `play`/`transmit` (or an explicit `open`) and stays open
/// until `close` or drop.
pub struct MorseTransmitter<D: OutputDevice = CpalDevice, N = KanaNormalizer> {
    tones: ToneSet,
    translator: Translator<N>,
    stream: StreamManager<D>,
}

impl MorseTransmitter {
    /// Transmitter on the default audio output with the built-in table.
    pub fn new(sample_rate: u32, unit_duration: f64, frequency: f64) -> Result<Self, MorseError> {
        let config = ToneConfig::new(sample_rate, unit_duration, frequency);
        Self::with_device(config, CpalDevice::new(sample_rate))
    }
}

impl<D: OutputDevice> MorseTransmitter<D> {
    pub fn with_device(config: ToneConfig, device: D) -> Result<Self, MorseError> {
        Ok(Self {
            tones: ToneSet::synthesize(config)?,
            translator: Translator::default(),
            stream: StreamManager::new(device),
        })
    }
}

impl<D: OutputDevice, N: Normalize> MorseTransmitter<D, N> {
    /// Swaps in a different symbol table, keeping the normalizer.
    pub fn with_table(self, table: SymbolTable) -> Self {
        let Self {
            tones,
            translator,
            stream,
        } = self;
        let (_, normalizer) = translator.into_parts();
        Self {
            tones,
            translator: Translator::with_normalizer(table, normalizer),
            stream,
        }
    }

    /// Swaps in a different normalizer, keeping the symbol table.
    pub fn with_normalizer<M: Normalize>(self, normalizer: M) -> MorseTransmitter<D, M> {
        let Self {
            tones,
            translator,
            stream,
        } = self;
        let (table, _) = translator.into_parts();
        MorseTransmitter {
            tones,
            translator: Translator::with_normalizer(table, normalizer),
            stream,
        }
    }

    pub fn tones(&self) -> &ToneSet {
        &self.tones
    }

    pub fn table(&self) -> &SymbolTable {
        self.translator.table()
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_open()
    }

    pub fn open(&mut self) -> Result<(), MorseError> {
        self.stream.open()?;
        Ok(())
    }

    pub fn close(&mut self) -> Result<(), MorseError> {
        self.stream.close()?;
        Ok(())
    }

    pub fn translate(&self, text: &str) -> Vec<MorseToken> {
        self.translator.translate(text)
    }

    /// Plays `tokens`, opening the output stream first if needed.
    pub fn play<I>(&mut self, tokens: I) -> Result<(), MorseError>
    where
        I: IntoIterator<Item = MorseToken>,
    {
        let player = Player::new(&self.tones);
        self.stream.ensure_open_and_play(&player, tokens)
    }

    /// `translate` followed by `play`.
    pub fn transmit(&mut self, text: &str) -> Result<(), MorseError> {
        let tokens = self.translate(text);
        log::info!(
            "Transmitting {} characters as {} tokens",
            text.chars().count(),
            tokens.len()
        );
        self.play(tokens)
    }
}
