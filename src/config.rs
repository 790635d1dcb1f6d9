//! Session settings owned by the surrounding application.
//!
//! None of this is persisted. The engine itself only sees the sample rate
//! (through [`AudioFormat`]) and the initial octave.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, SynthError},
    format::AudioFormat,
    synth::engine::DEFAULT_OCTAVE,
};

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
pub const DEFAULT_BUFFER_MS: u32 = 100;
pub const DEFAULT_VOLUME: f32 = 0.5;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Output sample rate in Hz
    pub sample_rate: u32,
    /// Requested output buffer length in milliseconds
    pub buffer_ms: u32,
    /// Octave the first note plays in
    pub octave: i32,
    /// Output volume on the logarithmic 0.0-1.0 scale
    pub volume: f32,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            buffer_ms: DEFAULT_BUFFER_MS,
            octave: DEFAULT_OCTAVE,
            volume: DEFAULT_VOLUME,
        }
    }

    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn buffer_ms(mut self, buffer_ms: u32) -> Self {
        self.buffer_ms = buffer_ms;
        self
    }

    pub fn octave(mut self, octave: i32) -> Self {
        self.octave = octave;
        self
    }

    pub fn volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    pub fn buffer_duration(&self) -> Duration {
        Duration::from_millis(self.buffer_ms as u64)
    }

    pub fn format(&self) -> Result<AudioFormat> {
        AudioFormat::mono_f32(self.sample_rate)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(SynthError::InvalidConfig {
                name: "sample_rate",
                message: "must be positive".into(),
            });
        }
        if self.buffer_ms == 0 {
            return Err(SynthError::InvalidConfig {
                name: "buffer_ms",
                message: "must be positive".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(SynthError::InvalidConfig {
                name: "volume",
                message: format!("{} is outside 0.0-1.0", self.volume),
            });
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.octave, 3);
        assert_eq!(config.buffer_duration(), Duration::from_millis(100));
        assert_eq!(config.format().unwrap().sample_rate(), 44_100);
    }

    #[test]
    fn builder_overrides() {
        let config = SessionConfig::new()
            .sample_rate(48_000)
            .buffer_ms(150)
            .octave(5)
            .volume(0.8);
        assert_eq!(config.sample_rate, 48_000);
        assert_eq!(config.buffer_ms, 150);
        assert_eq!(config.octave, 5);
        assert_eq!(config.volume, 0.8);
    }

    #[test]
    fn rejects_out_of_range_settings() {
        assert!(SessionConfig::new().sample_rate(0).validate().is_err());
        assert!(SessionConfig::new().buffer_ms(0).validate().is_err());
        assert!(SessionConfig::new().volume(1.5).validate().is_err());
        assert!(SessionConfig::new().volume(f32::NAN).validate().is_err());
    }
}
