//! Spectrum widget
//!
//! FFT of the most recent output window, sampled at log-spaced frequencies,
//! with a marker at the pitch of the note being played.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Number of frequency points to display
const SPECTRUM_POINTS: usize = 64;
/// Floor for the magnitude axis
const FLOOR_DB: f64 = -100.0;

pub struct SpectrumAnalyzer {
    /// Hann window coefficients
    window: Vec<f32>,
    /// (frequency Hz, FFT bin) per display point
    points: Vec<(f64, usize)>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// (log10 frequency, magnitude dB) per display point
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    /// `window_len` samples per FFT at `sample_rate` Hz.
    pub fn new(window_len: usize, sample_rate: u32) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(window_len);

        let window = (0..window_len)
            .map(|i| {
                if window_len > 1 {
                    let denom = (window_len - 1) as f32;
                    0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos())
                } else {
                    1.0
                }
            })
            .collect();

        // Log-spaced from 20 Hz to Nyquist
        let nyquist = (sample_rate as f64 / 2.0).max(21.0);
        let min_freq = 20.0;
        let ratio = nyquist / min_freq;
        let last_bin = (window_len / 2).saturating_sub(1);

        let points: Vec<(f64, usize)> = (0..SPECTRUM_POINTS)
            .map(|i| {
                let t = i as f64 / (SPECTRUM_POINTS - 1) as f64;
                let freq = min_freq * ratio.powf(t);
                let bin = (freq * window_len as f64 / sample_rate as f64).round() as usize;
                (freq, bin.min(last_bin))
            })
            .collect();

        let spectrum = points.iter().map(|&(f, _)| (f.log10(), FLOOR_DB)).collect();

        Self {
            window,
            points,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); window_len],
            spectrum,
        }
    }

    /// Recompute from a full window of samples. Other lengths are ignored.
    pub fn update(&mut self, samples: &[f32]) {
        if samples.len() != self.window.len() {
            return;
        }

        for ((bin, &sample), &w) in self.scratch.iter_mut().zip(samples).zip(&self.window) {
            *bin = Complex::new(sample * w, 0.0);
        }

        self.fft.process(&mut self.scratch);

        for (point, &(_, index)) in self.spectrum.iter_mut().zip(&self.points) {
            let bin = self.scratch[index];
            let power = (bin.re * bin.re + bin.im * bin.im).max(1e-12);
            point.1 = (10.0 * (power as f64).log10()).max(FLOOR_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

/// Render the spectrum, marking `note_hz` when a note is held.
pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)], note_hz: Option<f64>) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    let min_x = spectrum.first().map(|p| p.0).unwrap_or(1.0);
    let max_x = spectrum.last().map(|p| p.0).unwrap_or(4.5);
    let max_db = spectrum.iter().map(|p| p.1).fold(FLOOR_DB, f64::max);
    let top = max_db.max(0.0) + 10.0;

    let marker: Vec<(f64, f64)> = note_hz
        .filter(|hz| *hz > 0.0)
        .map(|hz| vec![(hz.log10(), FLOOR_DB), (hz.log10(), top)])
        .unwrap_or_default();

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(spectrum),
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&marker),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([min_x, max_x])
                .labels(vec!["20", "200", "2k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, top])
                .labels(vec!["-100", "-60", "-20", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
