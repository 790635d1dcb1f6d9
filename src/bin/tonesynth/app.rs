//! App - owns the output stream, the stall monitor and the TUI

use std::io::stdout;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result as EyreResult;
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::supports_keyboard_enhancement,
};
use ratatui::DefaultTerminal;
use tonesynth::{Fault, Monitor, Note, SessionConfig};

use super::audio::{AudioOutput, Gain};
use super::keymap::note_for_key;
use super::ui::{FaultEntry, MonitorStatus, StatusView, Ui};

const MIN_OCTAVE: i32 = 0;
const MAX_OCTAVE: i32 = 8;
const VOLUME_STEP: f32 = 0.05;
const BUFFER_STEP_MS: i64 = 10;
const MIN_BUFFER_MS: i64 = 10;
const MAX_BUFFER_MS: i64 = 1000;
/// How long a note sounds when the terminal cannot report key releases
const AUTO_RELEASE: Duration = Duration::from_millis(300);
/// UI redraw / monitor poll period (~60fps)
const FRAME_TIME: Duration = Duration::from_millis(16);

struct HeldNote {
    note: Note,
    key: char,
    hz: f64,
    /// Auto-release deadline, when key releases are not reported
    release_at: Option<Instant>,
}

pub struct App {
    config: SessionConfig,
    gain: Gain,
    output: AudioOutput,
    monitor: Monitor,
    ui: Ui,
    held: Option<HeldNote>,
    release_events: bool,
    started: Instant,
    should_quit: bool,
}

impl App {
    /// Open the output device and arm the monitor.
    pub fn start(config: SessionConfig) -> EyreResult<Self> {
        let gain = Gain::from_volume(config.volume);
        let output = AudioOutput::open(&config, &gain)?;

        let started = Instant::now();
        let mut monitor = Monitor::new(
            output.meter.clone(),
            output.underruns.clone(),
            output.buffer,
        );
        monitor.start(started);

        Ok(Self {
            ui: Ui::new(config.sample_rate),
            config,
            gain,
            output,
            monitor,
            held: None,
            release_events: false,
            started,
            should_quit: false,
        })
    }

    /// Take over the terminal until the user quits.
    pub fn run(mut self) -> EyreResult<()> {
        let mut terminal = ratatui::init();

        self.release_events = matches!(supports_keyboard_enhancement(), Ok(true));
        if self.release_events {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }

        let result = self.event_loop(&mut terminal);

        if self.release_events {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        ratatui::restore();
        self.output.stop();

        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            let now = Instant::now();
            self.expire_held(now);

            if let Some(fault) = self.monitor.poll(now) {
                self.on_fault(fault, now);
            }

            self.ui.poll_audio(&mut self.output.scope_rx);
            terminal.draw(|frame| self.ui.render(frame, &self.status()))?;

            if event::poll(FRAME_TIME)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key)?;
                }
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> EyreResult<()> {
        match key.kind {
            KeyEventKind::Press => {}
            // Held keys do not retrigger
            KeyEventKind::Repeat => return Ok(()),
            KeyEventKind::Release => {
                if let KeyCode::Char(c) = key.code {
                    self.key_released(c);
                }
                return Ok(());
            }
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Up => self.change_octave(1),
            KeyCode::Down => self.change_octave(-1),
            KeyCode::Right => self.change_volume(VOLUME_STEP),
            KeyCode::Left => self.change_volume(-VOLUME_STEP),
            KeyCode::Char('+') | KeyCode::Char('=') => self.change_buffer(BUFFER_STEP_MS)?,
            KeyCode::Char('-') => self.change_buffer(-BUFFER_STEP_MS)?,
            KeyCode::Char(c) => self.key_pressed(c),
            _ => {}
        }

        Ok(())
    }

    fn key_pressed(&mut self, c: char) {
        let Some(note) = note_for_key(c) else {
            return;
        };
        let key = c.to_ascii_lowercase();
        let now = Instant::now();

        // Without release events, key autorepeat arrives as fresh presses
        if !self.release_events {
            if let Some(held) = self.held.as_mut().filter(|held| held.key == key) {
                held.release_at = Some(now + AUTO_RELEASE);
                return;
            }
        }

        self.output.handle.play(note);
        self.held = Some(HeldNote {
            note,
            key,
            hz: note.frequency(self.config.octave),
            release_at: (!self.release_events).then(|| now + AUTO_RELEASE),
        });
    }

    fn key_released(&mut self, c: char) {
        let key = c.to_ascii_lowercase();
        if self.held.as_ref().is_some_and(|held| held.key == key) {
            self.output.handle.note_off();
            self.held = None;
        }
    }

    fn expire_held(&mut self, now: Instant) {
        let expired = self
            .held
            .as_ref()
            .and_then(|held| held.release_at)
            .is_some_and(|deadline| now >= deadline);

        if expired {
            self.output.handle.note_off();
            self.held = None;
        }
    }

    fn change_octave(&mut self, delta: i32) {
        let octave = (self.config.octave + delta).clamp(MIN_OCTAVE, MAX_OCTAVE);
        self.config.octave = octave;
        self.output.handle.set_octave(octave);
    }

    fn change_volume(&mut self, delta: f32) {
        self.config.volume = (self.config.volume + delta).clamp(0.0, 1.0);
        self.gain.set_volume(self.config.volume);
    }

    fn change_buffer(&mut self, delta_ms: i64) -> EyreResult<()> {
        let buffer_ms = (self.config.buffer_ms as i64 + delta_ms).clamp(MIN_BUFFER_MS, MAX_BUFFER_MS);
        if buffer_ms == self.config.buffer_ms as i64 {
            return Ok(());
        }

        self.config.buffer_ms = buffer_ms as u32;
        self.restart()
    }

    /// Tear down the stream and open a fresh one with the current settings.
    /// This is also the only way to re-arm the monitor after a stall.
    fn restart(&mut self) -> EyreResult<()> {
        self.monitor.stop();
        self.output.stop();
        self.held = None;

        self.output = AudioOutput::open(&self.config, &self.gain)?;
        self.monitor = Monitor::new(
            self.output.meter.clone(),
            self.output.underruns.clone(),
            self.output.buffer,
        );
        self.monitor.start(Instant::now());

        log::info!(
            "output restarted with a {} ms buffer",
            self.output.buffer.as_millis()
        );
        Ok(())
    }

    fn on_fault(&mut self, fault: Fault, now: Instant) {
        self.ui.push_fault(FaultEntry {
            fault,
            at: now.duration_since(self.started),
        });
    }

    fn status(&self) -> StatusView<'_> {
        StatusView {
            device: &self.output.device_name,
            sample_rate: self.config.sample_rate,
            channels: self.output.channels,
            buffer: self.output.buffer,
            octave: self.config.octave,
            volume: self.config.volume,
            held: self.held.as_ref().map(|held| held.note),
            held_hz: self.held.as_ref().map(|held| held.hz),
            monitor: MonitorStatus::of(&self.monitor),
            release_events: self.release_events,
        }
    }
}
