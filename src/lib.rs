pub mod config; // Session settings
pub mod dsp;
pub mod error;
pub mod format;
pub mod io;
pub mod monitor; // Stall/underrun watchdog
pub mod notes;
pub mod synth; // Tone engine and control plumbing

pub use config::SessionConfig;
pub use error::{Result, SynthError};
pub use format::AudioFormat;
pub use monitor::{Fault, Monitor, Severity, UnderrunSignal};
pub use notes::Note;
pub use synth::{SampleStream, ToneEngine};
#[cfg(feature = "rtrb")]
pub use synth::{SharedToneEngine, ToneHandle};

/// Largest block the reference application renders in one pull.
pub const MAX_BLOCK_SIZE: usize = 2048;
