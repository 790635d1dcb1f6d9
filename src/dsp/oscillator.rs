use std::f64::consts::TAU;

/// Sine oscillator driven by a phase accumulator.
///
/// The phase is kept in `[0, 2π)`: it is wrapped after every increment so a
/// note held for hours keeps full precision.
#[derive(Debug, Clone, Default)]
pub struct SineOscillator {
    angle: f64,
    angle_delta: f64,
}

impl SineOscillator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retune to `frequency` Hz. Does not touch the phase.
    pub fn set_frequency(&mut self, frequency: f64, sample_rate: u32) {
        let cycles_per_sample = frequency / sample_rate as f64;
        self.angle_delta = cycles_per_sample * TAU;
    }

    pub fn reset_phase(&mut self) {
        self.angle = 0.0;
    }

    /// Current sample, then advance by one step.
    #[inline]
    pub fn next_sample(&mut self) -> f64 {
        let value = self.angle.sin();
        self.angle += self.angle_delta;
        if self.angle >= TAU {
            self.angle = self.angle.rem_euclid(TAU);
        }
        value
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Phase increment per sample, in radians.
    pub fn angle_delta(&self) -> f64 {
        self.angle_delta
    }
}
