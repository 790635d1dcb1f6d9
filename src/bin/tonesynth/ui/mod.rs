//! TUI for tonesynth
//!
//! Shows the output waveform and spectrum, the session settings, the
//! on-screen keyboard, and the faults raised by the stall monitor.

mod faults;
mod keyboard;
pub mod spectrum;
pub mod state;
mod status;
mod waveform;

use std::collections::VecDeque;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use rtrb::Consumer;

pub use state::{FaultEntry, MonitorStatus, StatusView};

use faults::render_faults;
use keyboard::render_keyboard;
use spectrum::{render_spectrum, SpectrumAnalyzer};
use status::{render_status, AudioStats};
use waveform::render_waveform;

/// Audio visualization buffer size (also the FFT length)
const VIS_BUFFER_SIZE: usize = 1024;
/// Faults kept in the log
const FAULT_HISTORY: usize = 32;

pub struct Ui {
    /// Most recent output samples
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    faults: VecDeque<FaultEntry>,
}

impl Ui {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate),
            faults: VecDeque::with_capacity(FAULT_HISTORY),
        }
    }

    /// Pull new output samples from the audio thread, keeping the last
    /// VIS_BUFFER_SIZE.
    pub fn poll_audio(&mut self, audio_rx: &mut Consumer<f32>) {
        let before = self.audio_buffer.len();
        while let Ok(sample) = audio_rx.pop() {
            self.audio_buffer.push(sample);
        }

        if self.audio_buffer.len() > before {
            let excess = self.audio_buffer.len().saturating_sub(VIS_BUFFER_SIZE);
            self.audio_buffer.drain(0..excess);
            self.spectrum.update(&self.audio_buffer);
        }
    }

    pub fn push_fault(&mut self, entry: FaultEntry) {
        if self.faults.len() == FAULT_HISTORY {
            self.faults.pop_front();
        }
        self.faults.push_back(entry);
    }

    pub fn render(&self, frame: &mut Frame, status: &StatusView) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Length(4), // Keys
                Constraint::Min(8),    // Scope + spectrum
                Constraint::Length(7), // Faults
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_status(frame, chunks[0], status, &stats);
        render_keyboard(frame, chunks[1], status.held);

        let scopes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);
        render_waveform(frame, scopes[0], &self.audio_buffer);
        render_spectrum(frame, scopes[1], self.spectrum.data(), status.held_hz);

        render_faults(frame, chunks[3], self.faults.iter());

        let release_hint = if status.release_events {
            ""
        } else {
            "  (notes auto-release)"
        };
        let help = Paragraph::new(format!(
            " [Q-I/2-7] Play  [↑↓] Octave  [←→] Volume  [+/-] Buffer  [Esc] Quit{release_hint}"
        ))
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[4]);
    }
}
