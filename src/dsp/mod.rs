//! Low-level DSP primitives used by the tone engine.
//!
//! These components are allocation-free and realtime-safe, so the engine can
//! own them directly and step them from the audio callback.

/// Linear attack/sustain/release envelope generator.
pub mod envelope;
/// Sine oscillator with a wrapped phase accumulator.
pub mod oscillator;

pub use envelope::{Envelope, EnvelopeState};
pub use oscillator::SineOscillator;
