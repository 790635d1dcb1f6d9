//! On-screen keyboard: which key plays which note, and what is held.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tonesynth::Note;

use crate::keymap::key_for_note;

// Column layout of the two key rows; None is a gap between black keys
const SHARPS: [Option<Note>; 7] = [
    Some(Note::Cs),
    Some(Note::Ds),
    None,
    Some(Note::Fs),
    Some(Note::Gs),
    Some(Note::As),
    None,
];
const NATURALS: [Note; 8] = [
    Note::C,
    Note::D,
    Note::E,
    Note::F,
    Note::G,
    Note::A,
    Note::B,
    Note::CHigh,
];

fn key_span(note: Note, held: Option<Note>) -> Span<'static> {
    let label = format!("{}:{:<3}", key_for_note(note), note.name());
    if held == Some(note) {
        Span::styled(
            label,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::raw(label)
    }
}

pub fn render_keyboard(frame: &mut Frame, area: Rect, held: Option<Note>) {
    let block = Block::default().title(" Keys ").borders(Borders::ALL);

    let mut sharps = vec![Span::raw("    ")];
    for slot in SHARPS {
        match slot {
            Some(note) => sharps.push(key_span(note, held)),
            None => sharps.push(Span::raw("      ")),
        }
        sharps.push(Span::raw("  "));
    }

    let mut naturals = vec![Span::raw(" ")];
    for note in NATURALS {
        naturals.push(key_span(note, held));
        naturals.push(Span::raw("  "));
    }

    let lines = vec![Line::from(sharps), Line::from(naturals)];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
