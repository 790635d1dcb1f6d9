/*
Attack/Sustain/Release Envelope
===============================

A linear three-stage envelope that shapes the amplitude of the tone so note
starts and stops do not click.

  Volume
    1.0 ┐      ___________________
        │     ╱                   ╲
        │    ╱                     ╲
    0.0 └───╱───────────────────────╲────→ Samples
           Attack     Sustain      Release
          (20 ms)                  (20 ms)

Both ramps have the same length, fixed once from the sample rate:

    ramp_samples = floor(0.02 * sample_rate)     (at least 1)
    delta        = 1.0 / ramp_samples

At 44.1 kHz that is 882 samples and a step of ~0.001134 per sample.


The State Machine
-----------------

    Silent ──note_on──→ Attack ──ramp done──→ Sustain
      ↑                   │                     │
      │                   └─────note_off────────┤
      │                                         ↓
      └────────────ramp done─────────────── Release

  - note_on from ANY stage restarts Attack from volume 0.
  - note_off from ANY stage (Silent included) starts Release with a full
    countdown, ramping down from the current volume.

Each stage ramp is driven by a sample countdown, not by comparing the level
against a target. The step that uses up the countdown lands on the exact
target (1.0 or 0.0) and changes stage in the same sample, so after exactly
`ramp_samples` steps the envelope is in Sustain (or Silent).

Release clamps at 0.0: releasing from partway through an attack, or from
silence, never drives the volume negative.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ramp length in seconds for both attack and release.
pub const RAMP_SECONDS: f64 = 0.02;

/// Current stage of the envelope state machine.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Silent,  // no output, volume = 0
    Attack,  // ramping 0 → 1
    Sustain, // holding at 1
    Release, // ramping current → 0
}

#[derive(Debug, Clone)]
pub struct Envelope {
    // Fixed at construction
    attack_samples: u64,
    release_samples: u64,
    delta: f64,

    // Runtime state
    state: EnvelopeState,
    volume: f64,
    count: u64, // samples left in the current ramp
}

impl Envelope {
    /// 20 ms attack and release at `sample_rate`.
    pub fn new(sample_rate: u32) -> Self {
        let ramp = (RAMP_SECONDS * sample_rate as f64) as u64;
        Self::with_ramp_samples(ramp)
    }

    /// Envelope with explicit ramp length in samples (clamped to at least 1).
    pub fn with_ramp_samples(ramp_samples: u64) -> Self {
        let ramp_samples = ramp_samples.max(1);

        Self {
            attack_samples: ramp_samples,
            release_samples: ramp_samples,
            delta: 1.0 / ramp_samples as f64,

            state: EnvelopeState::Silent,
            volume: 0.0,
            count: 0,
        }
    }

    /// Restart the attack from zero.
    pub fn note_on(&mut self) {
        self.state = EnvelopeState::Attack;
        self.count = self.attack_samples;
        self.volume = 0.0;
    }

    /// Start the release from the current volume, whatever the stage.
    pub fn note_off(&mut self) {
        self.state = EnvelopeState::Release;
        self.count = self.release_samples;
    }

    /// Advance by one sample and return the new volume.
    #[inline]
    pub fn next_sample(&mut self) -> f64 {
        match self.state {
            EnvelopeState::Silent | EnvelopeState::Sustain => {}

            EnvelopeState::Attack => {
                if self.count > 0 {
                    self.volume += self.delta;
                    self.count -= 1;
                }
                if self.count == 0 {
                    self.volume = 1.0;
                    self.state = EnvelopeState::Sustain;
                }
            }

            EnvelopeState::Release => {
                if self.count > 0 {
                    self.volume = (self.volume - self.delta).max(0.0);
                    self.count -= 1;
                }
                if self.count == 0 {
                    self.volume = 0.0;
                    self.state = EnvelopeState::Silent;
                }
            }
        }

        debug_assert!((0.0..=1.0 + 1e-9).contains(&self.volume));
        self.volume
    }

    pub fn is_silent(&self) -> bool {
        matches!(self.state, EnvelopeState::Silent)
    }

    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Per-sample volume step.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Samples left in the current ramp.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn attack_samples(&self) -> u64 {
        self.attack_samples
    }

    pub fn release_samples(&self) -> u64 {
        self.release_samples
    }
}
