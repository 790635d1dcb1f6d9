//! Fault log panel

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use tonesynth::Severity;

use super::state::FaultEntry;

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Warning => Style::default().fg(Color::Yellow),
        Severity::Critical => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

/// Newest fault first; the newest one also gets its full message.
pub fn render_faults<'a>(
    frame: &mut Frame,
    area: Rect,
    faults: impl DoubleEndedIterator<Item = &'a FaultEntry>,
) {
    let block = Block::default().title(" Faults ").borders(Borders::ALL);
    let mut faults = faults.rev().peekable();

    let Some(latest) = faults.peek().copied() else {
        let idle = Paragraph::new(Line::styled(
            " No faults",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(idle, area);
        return;
    };

    let mut items = vec![
        ListItem::new(Span::styled(
            format!(" {:>7.1}s  {}", latest.at.as_secs_f32(), latest.fault.title()),
            severity_style(latest.fault.severity()),
        )),
        ListItem::new(Line::styled(
            format!("           {}", latest.fault.message()),
            Style::default().fg(Color::Gray),
        )),
    ];
    items.extend(faults.skip(1).map(|entry| {
        ListItem::new(Span::styled(
            format!(" {:>7.1}s  {}", entry.at.as_secs_f32(), entry.fault.title()),
            severity_style(entry.fault.severity()),
        ))
    }));

    frame.render_widget(List::new(items).block(block), area);
}
