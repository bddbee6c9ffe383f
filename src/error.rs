// src/error.rs
// Error types shared by the synthesis, translation and playback layers

use thiserror::Error;

/// Failures reported by an audio output sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("no audio output device available")]
    NoDevice,

    #[error("failed to open output stream: {0}")]
    Open(String),

    /// A write to an open stream failed (device lost, stream stalled, ...).
    #[error("output stream write failed: {0}")]
    Write(String),
}

#[derive(Debug, Error)]
pub enum MorseError {
    /// Non-positive or non-finite configuration value, raised before any buffer is allocated.
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Errors raised while loading a symbol table from its text form.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read symbol table: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: duplicate entry for {ch:?}")]
    Duplicate { line: usize, ch: char },
}
