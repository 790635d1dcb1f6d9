use rtrb::Producer;

use crate::{
    notes::Note,
    synth::{message::ControlMessage, stream::Gate},
};

/// Control-side handle on a [`SharedToneEngine`](super::shared::SharedToneEngine).
///
/// Every call is fire-and-forget: nothing is returned and nothing fails.
/// Requests are queued and take effect at the start of the next pull.
pub struct ToneHandle {
    tx: Producer<ControlMessage>,
    gate: Gate,
}

impl ToneHandle {
    pub(crate) fn new(tx: Producer<ControlMessage>, gate: Gate) -> Self {
        Self { tx, gate }
    }

    /// Start the note called `name`. Names outside the note table are
    /// ignored.
    pub fn note_on(&mut self, name: &str) {
        match Note::from_name(name) {
            Some(note) => self.play(note),
            None => log::debug!("ignoring note-on for unknown note {name:?}"),
        }
    }

    pub fn play(&mut self, note: Note) {
        self.send(ControlMessage::NoteOn { note });
    }

    pub fn note_off(&mut self) {
        self.send(ControlMessage::NoteOff);
    }

    /// Takes effect at the next note-on.
    pub fn set_octave(&mut self, octave: i32) {
        self.send(ControlMessage::SetOctave { octave });
    }

    /// Open the channel to the pipeline.
    pub fn start(&self) {
        self.gate.open();
    }

    /// Close the channel to the pipeline.
    pub fn stop(&self) {
        self.gate.close();
    }

    pub fn is_open(&self) -> bool {
        self.gate.is_open()
    }

    fn send(&mut self, msg: ControlMessage) {
        if self.tx.push(msg).is_err() {
            log::warn!("control queue full, dropping {msg:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtrb::RingBuffer;

    #[test]
    fn full_queue_drops_without_panicking() {
        let (tx, mut rx) = RingBuffer::<ControlMessage>::new(2);
        let mut handle = ToneHandle::new(tx, Gate::new());

        handle.note_on("C");
        handle.note_off();
        handle.set_octave(4);

        assert_eq!(rx.pop().ok(), Some(ControlMessage::NoteOn { note: Note::C }));
        assert_eq!(rx.pop().ok(), Some(ControlMessage::NoteOff));
        assert!(rx.pop().is_err());
    }
}
