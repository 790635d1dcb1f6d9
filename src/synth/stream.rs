use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Pull-based source of mono f32 samples.
///
/// The audio pipeline calls `pull` from its delivery context whenever it
/// needs more data. Implementations must fill the whole slice and must not
/// block or allocate.
pub trait SampleStream: Send {
    fn pull(&mut self, out: &mut [f32]);

    /// Whether the pipeline should be pulling from this stream.
    fn is_open(&self) -> bool {
        true
    }

    /// Pipeline-side entry point: pull while open, silence while closed.
    fn render(&mut self, out: &mut [f32]) {
        if self.is_open() {
            self.pull(out);
        } else {
            out.fill(0.0);
        }
    }
}

/// Open/closed state of the channel between a stream and the pipeline.
///
/// Toggled from the control context; read by the pipeline before each pull.
#[derive(Debug, Clone, Default)]
pub struct Gate {
    open: Arc<AtomicBool>,
}

impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self) {
        self.open.store(true, Ordering::Release);
    }

    pub fn close(&self) {
        self.open.store(false, Ordering::Release);
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }
}
