//! Status bar - device, buffer, octave, volume, monitor state, output level

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::state::{MonitorStatus, StatusView};

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

pub fn render_status(frame: &mut Frame, area: Rect, status: &StatusView, stats: &AudioStats) {
    let block = Block::default()
        .title(format!(" tonesynth - {} ", status.device))
        .borders(Borders::ALL);

    let (monitor_label, monitor_color) = match status.monitor {
        MonitorStatus::Stopped => ("stopped", Color::DarkGray),
        MonitorStatus::Priming => ("priming", Color::DarkGray),
        MonitorStatus::Armed => ("armed", Color::Green),
        MonitorStatus::Stalled => ("STALLED", Color::Red),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {:.1}kHz x{}  ", status.sample_rate as f32 / 1000.0, status.channels),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Buffer: {} ms  ", status.buffer.as_millis()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Octave: {}  ", status.octave),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Volume: {:.0}%  ", status.volume * 100.0),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Monitor: {monitor_label}  "),
            Style::default().fg(monitor_color),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
