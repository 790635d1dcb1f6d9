use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Size of the most recent block pulled from the engine.
///
/// Written by the audio thread after every pull, read and cleared by the
/// stall monitor. Clones share the same cell.
#[derive(Debug, Clone, Default)]
pub struct BlockMeter {
    last_block_size: Arc<AtomicUsize>,
}

impl BlockMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed pull of `samples` samples.
    #[inline]
    pub fn record(&self, samples: usize) {
        self.last_block_size.store(samples, Ordering::Release);
    }

    pub fn last_block_size(&self) -> usize {
        self.last_block_size.load(Ordering::Acquire)
    }

    pub fn reset(&self) {
        self.last_block_size.store(0, Ordering::Release);
    }

    /// Read and clear in one atomic step, so a pull landing between the read
    /// and the reset is never lost.
    pub fn take(&self) -> usize {
        self.last_block_size.swap(0, Ordering::AcqRel)
    }
}
