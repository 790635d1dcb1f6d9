use rtrb::{Consumer, RingBuffer};

use crate::{
    format::AudioFormat,
    synth::{
        engine::ToneEngine,
        handle::ToneHandle,
        message::ControlMessage,
        stream::SampleStream,
    },
};

/// Capacity of the control queue between the UI and the audio thread.
pub const CONTROL_QUEUE_SIZE: usize = 256;

/// Engine fed by a control queue.
///
/// Lives on the audio thread. Pending control messages are applied at the
/// start of every pull, so each block renders from one consistent set of
/// control values and no lock is ever taken on the audio path.
pub struct SharedToneEngine {
    engine: ToneEngine,
    rx: Consumer<ControlMessage>,
}

impl SharedToneEngine {
    /// Build an engine and the handle that controls it.
    pub fn new(format: AudioFormat) -> (Self, ToneHandle) {
        let engine = ToneEngine::new(format);
        let (tx, rx) = RingBuffer::<ControlMessage>::new(CONTROL_QUEUE_SIZE);

        let handle = ToneHandle::new(tx, engine.gate());
        let node = Self { engine, rx };

        (node, handle)
    }

    /// Apply every queued control message.
    pub fn drain(&mut self) {
        while let Ok(msg) = self.rx.pop() {
            self.engine.apply(msg);
        }
    }

    pub fn engine(&self) -> &ToneEngine {
        &self.engine
    }
}

impl SampleStream for SharedToneEngine {
    fn pull(&mut self, out: &mut [f32]) {
        self.drain();
        self.engine.pull(out);
    }

    fn is_open(&self) -> bool {
        self.engine.is_open()
    }
}
