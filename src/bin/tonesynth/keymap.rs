//! Computer keyboard to note mapping.
//!
//! Naturals sit on the letter row, sharps on the number row above them:
//!
//!    2   3       5   6   7
//!  Q   W   E   R   T   Y   U   I
//!  C   D   E   F   G   A   B   C'

use tonesynth::Note;

pub fn note_for_key(key: char) -> Option<Note> {
    let note = match key.to_ascii_lowercase() {
        'q' => Note::C,
        '2' => Note::Cs,
        'w' => Note::D,
        '3' => Note::Ds,
        'e' => Note::E,
        'r' => Note::F,
        '5' => Note::Fs,
        't' => Note::G,
        '6' => Note::Gs,
        'y' => Note::A,
        '7' => Note::As,
        'u' => Note::B,
        'i' => Note::CHigh,
        _ => return None,
    };
    Some(note)
}

/// Key label for a note, for the on-screen keyboard.
pub fn key_for_note(note: Note) -> char {
    match note {
        Note::C => 'Q',
        Note::Cs => '2',
        Note::D => 'W',
        Note::Ds => '3',
        Note::E => 'E',
        Note::F => 'R',
        Note::Fs => '5',
        Note::G => 'T',
        Note::Gs => '6',
        Note::A => 'Y',
        Note::As => '7',
        Note::B => 'U',
        Note::CHigh => 'I',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_note_has_a_key_and_back() {
        for note in Note::ALL {
            assert_eq!(note_for_key(key_for_note(note)), Some(note));
        }
    }

    #[test]
    fn case_insensitive_and_sparse() {
        assert_eq!(note_for_key('Y'), Some(Note::A));
        assert_eq!(note_for_key('4'), None);
        assert_eq!(note_for_key('z'), None);
    }
}
