//! Volume scale conversion for the output gain.
//!
//! A volume control feels even when it moves on a logarithmic scale, but the
//! output stage multiplies samples by a linear gain. The engine itself
//! always renders at full scale; the gain is the pipeline's business.

/// Map a logarithmic-scale volume in `[0, 1]` to a linear gain in `[0, 1]`.
///
/// `gain = -ln(1 - v) / ln(100)`, saturating to 1.0 from 0.99 up.
pub fn log_to_linear(volume: f32) -> f32 {
    let volume = volume.clamp(0.0, 1.0);
    if volume >= 0.99 {
        return 1.0;
    }

    // f32 rounding can land a hair above unity just below the knee
    (-(1.0 - volume).ln() / 100.0_f32.ln()).min(1.0)
}
