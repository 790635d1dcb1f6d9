//! Audio format the engine renders in.
//!
//! The engine only ever produces mono 32-bit float PCM. The format is fixed
//! at construction; everything that depends on the sample rate (ramp
//! lengths, phase increments, buffer sizes) is derived from it once.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SynthError};

/// Sample representation. Only `F32` is rendered by the engine.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    F32,
}

impl SampleFormat {
    pub fn bytes(self) -> usize {
        match self {
            SampleFormat::F32 => std::mem::size_of::<f32>(),
        }
    }
}

/// Immutable description of the PCM stream.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    sample_rate: u32,
    channels: u16,
    sample_format: SampleFormat,
}

impl AudioFormat {
    /// Mono f32 at the given rate. Fails for a zero sample rate.
    pub fn mono_f32(sample_rate: u32) -> Result<Self> {
        Self::new(sample_rate, 1, SampleFormat::F32)
    }

    /// Validate and build a format. The engine is single-channel, so any
    /// channel count other than 1 is rejected.
    pub fn new(sample_rate: u32, channels: u16, sample_format: SampleFormat) -> Result<Self> {
        if sample_rate == 0 || channels != 1 {
            return Err(SynthError::InvalidFormat {
                sample_rate,
                channels,
            });
        }

        Ok(Self {
            sample_rate,
            channels,
            sample_format,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_format(&self) -> SampleFormat {
        self.sample_format
    }

    /// Bytes in one sample of one channel.
    pub fn bytes_per_sample(&self) -> usize {
        self.sample_format.bytes()
    }

    /// Bytes in one frame (one sample for every channel).
    pub fn bytes_per_frame(&self) -> usize {
        self.bytes_per_sample() * self.channels as usize
    }

    /// Whole frames that fit in `duration`, rounded down.
    pub fn frames_for_duration(&self, duration: Duration) -> usize {
        (duration.as_micros() * self.sample_rate as u128 / 1_000_000) as usize
    }

    pub fn bytes_for_duration(&self, duration: Duration) -> usize {
        self.frames_for_duration(duration) * self.bytes_per_frame()
    }

    pub fn duration_for_frames(&self, frames: usize) -> Duration {
        Duration::from_micros((frames as u64 * 1_000_000) / self.sample_rate as u64)
    }

    /// Playback time of `bytes`; a trailing partial frame is ignored.
    pub fn duration_for_bytes(&self, bytes: usize) -> Duration {
        self.duration_for_frames(bytes / self.bytes_per_frame())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_rate_and_multichannel() {
        assert!(AudioFormat::mono_f32(0).is_err());
        assert!(AudioFormat::new(44_100, 2, SampleFormat::F32).is_err());
        assert!(AudioFormat::mono_f32(44_100).is_ok());
    }

    #[test]
    fn buffer_time_conversions() {
        let format = AudioFormat::mono_f32(44_100).unwrap();

        // 100 ms at 44.1 kHz mono f32
        let bytes = format.bytes_for_duration(Duration::from_millis(100));
        assert_eq!(bytes, 4_410 * 4);
        assert_eq!(format.duration_for_bytes(bytes), Duration::from_millis(100));

        // Partial frames are dropped
        assert_eq!(format.duration_for_bytes(3), Duration::ZERO);
    }
}
