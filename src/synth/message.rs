use crate::notes::Note;

/// Control requests sent from the UI context to the audio context.
///
/// Note names are resolved before they are queued, so an unknown name never
/// reaches the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ControlMessage {
    NoteOn { note: Note },
    NoteOff,
    SetOctave { octave: i32 },
}
