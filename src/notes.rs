/*
Note Table
==========

One octave of the equal-tempered scale, from C up to the C above it, at the
reference octave 3 (A3 = 220 Hz).

  Name   Hz        Name   Hz
  ----   -------   ----   -------
  C      130.813   F#     184.997
  C#     138.591   G      195.998
  D      146.832   G#     207.652
  D#     155.563   A      220.000
  E      164.814   A#     233.082
  F      174.614   B      246.942
                   C'     261.626

Octave transposition doubles or halves the frequency per octave:

    frequency(note, octave) = base(note) * 2^(octave - 3)

So A at octave 5 is 220 * 4 = 880 Hz, and A at octave 1 is 55 Hz.

The table is const data. It is safe to read from any thread, including the
audio callback, without synchronization.
*/

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SynthError};

/// Octave the base frequencies are tuned to.
pub const REFERENCE_OCTAVE: i32 = 3;

/// One of the 13 playable notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Note {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
    /// C one octave above `C`.
    CHigh,
}

// (note, name, Hz at the reference octave), ascending pitch
const TABLE: [(Note, &str, f64); 13] = [
    (Note::C, "C", 130.813),
    (Note::Cs, "C#", 138.591),
    (Note::D, "D", 146.832),
    (Note::Ds, "D#", 155.563),
    (Note::E, "E", 164.814),
    (Note::F, "F", 174.614),
    (Note::Fs, "F#", 184.997),
    (Note::G, "G", 195.998),
    (Note::Gs, "G#", 207.652),
    (Note::A, "A", 220.000),
    (Note::As, "A#", 233.082),
    (Note::B, "B", 246.942),
    (Note::CHigh, "C'", 261.626),
];

impl Note {
    /// All notes in ascending pitch order.
    pub const ALL: [Note; 13] = [
        Note::C,
        Note::Cs,
        Note::D,
        Note::Ds,
        Note::E,
        Note::F,
        Note::Fs,
        Note::G,
        Note::Gs,
        Note::A,
        Note::As,
        Note::B,
        Note::CHigh,
    ];

    fn entry(self) -> &'static (Note, &'static str, f64) {
        &TABLE[self as usize]
    }

    /// Display name as used by the keyboard ("C#", "C'", ...).
    pub fn name(self) -> &'static str {
        self.entry().1
    }

    /// Frequency in Hz at the reference octave.
    pub fn base_frequency(self) -> f64 {
        self.entry().2
    }

    /// Frequency in Hz transposed to `octave`.
    pub fn frequency(self, octave: i32) -> f64 {
        self.base_frequency() * 2.0_f64.powi(octave.saturating_sub(REFERENCE_OCTAVE))
    }

    /// Look up a note by name. Returns `None` for names outside the table.
    pub fn from_name(name: &str) -> Option<Note> {
        TABLE
            .iter()
            .find(|(_, entry_name, _)| *entry_name == name)
            .map(|(note, _, _)| *note)
    }
}

impl FromStr for Note {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self> {
        Note::from_name(s).ok_or_else(|| SynthError::UnknownNote(s.to_string()))
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Base frequency (reference octave) for a note name.
pub fn frequency_of(name: &str) -> Result<f64> {
    name.parse::<Note>().map(Note::base_frequency)
}
