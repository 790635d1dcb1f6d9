//! Error types for the tone generator.

use thiserror::Error;

/// Result type for fallible tonesynth operations.
pub type Result<T> = std::result::Result<T, SynthError>;

/// Errors raised while configuring the generator or its output.
///
/// None of these come out of the steady-state engine path: `pull`,
/// `note_on`, `note_off` and `set_octave` never fail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SynthError {
    /// Note name is not one of the 13 entries in the note table.
    #[error("unknown note: {0:?}")]
    UnknownNote(String),

    /// Audio format the engine cannot be built from.
    #[error("invalid audio format: {sample_rate} Hz, {channels} channel(s)")]
    InvalidFormat {
        /// Requested sample rate in Hz.
        sample_rate: u32,
        /// Requested channel count.
        channels: u16,
    },

    /// Output device cannot render the engine's format.
    #[error("output device {device:?} does not support {sample_rate} Hz f32 output")]
    FormatUnsupported {
        /// Human readable device name.
        device: String,
        /// Sample rate the engine renders at.
        sample_rate: u32,
    },

    /// Session setting out of range.
    #[error("invalid setting '{name}': {message}")]
    InvalidConfig {
        /// Setting name.
        name: &'static str,
        /// What is wrong with it.
        message: String,
    },
}
