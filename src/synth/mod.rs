// Purpose: the tone engine and the plumbing between it, the UI and the
// audio pipeline

pub mod engine;
#[cfg(feature = "rtrb")]
pub mod handle;
pub mod message;
pub mod meter;
#[cfg(feature = "rtrb")]
pub mod shared;
pub mod stream;

pub use engine::ToneEngine;
#[cfg(feature = "rtrb")]
pub use handle::ToneHandle;
pub use message::ControlMessage;
pub use meter::BlockMeter;
#[cfg(feature = "rtrb")]
pub use shared::SharedToneEngine;
pub use stream::{Gate, SampleStream};
