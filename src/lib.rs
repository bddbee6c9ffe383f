// src/lib.rs
// Library interface for denbun

pub mod error;
pub mod generator;
pub mod normalize;
pub mod output;
pub mod player;
pub mod stream;
pub mod table;
pub mod translator;
pub mod transmitter;

pub use error::{MorseError, SinkError, TableError};
pub use generator::{ToneConfig, ToneSet};
pub use normalize::{KanaNormalizer, Normalize};
pub use output::{CpalDevice, CpalSink};
pub use player::{AudioSink, Player};
pub use stream::{OutputDevice, StreamManager};
pub use table::{Element, SymbolTable};
pub use translator::{MorseToken, Translator, parse_code, render, translate_normalized};
pub use transmitter::MorseTransmitter;

pub const SAMPLE_RATE: u32 = 44100;
/// Length of one dit, in seconds.
pub const UNIT_DURATION: f64 = 0.033;
pub const TONE_FREQUENCY: f64 = 880.0;
/// Samples faded in and out at each end of a tone to avoid clicks.
pub const RAMP_SAMPLES: usize = 72;
