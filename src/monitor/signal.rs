use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Underrun flag raised by the output pipeline.
///
/// The pipeline raises it from whatever context its error reports arrive
/// on; the monitor drains it when it polls. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct UnderrunSignal {
    raised: Arc<AtomicBool>,
}

impl UnderrunSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    /// Read and clear the flag.
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::AcqRel)
    }

    pub fn clear(&self) {
        self.raised.store(false, Ordering::Release);
    }
}
