/*
Tone Engine
===========

A monophonic sine generator with a linear attack/sustain/release envelope.
One note sounds at a time; a new note-on always restarts the phase and the
attack, even over a note that is still ringing.

Per sample, in order:

  1. step the envelope once (see dsp::envelope)
  2. if the envelope is Silent, emit 0.0
     otherwise emit volume * sin(angle), then angle += angle_delta

The phase increment encodes the pitch:

    note_frequency = base(note) * 2^(octave - 3)
    angle_delta    = 2π * note_frequency / sample_rate

The octave is only read at note-on. Changing it never retunes a note that is
already sounding.

`pull` records how many samples it produced in the BlockMeter. That is the
only coupling to the stall monitor.
*/

use crate::{
    dsp::{Envelope, EnvelopeState, SineOscillator},
    format::AudioFormat,
    notes::{Note, REFERENCE_OCTAVE},
    synth::{
        message::ControlMessage,
        meter::BlockMeter,
        stream::{Gate, SampleStream},
    },
};

/// Octave a fresh engine plays in.
pub const DEFAULT_OCTAVE: i32 = REFERENCE_OCTAVE;

pub struct ToneEngine {
    format: AudioFormat,
    octave: i32,
    note_frequency: f64,
    oscillator: SineOscillator,
    envelope: Envelope,
    meter: BlockMeter,
    gate: Gate,
}

impl ToneEngine {
    pub fn new(format: AudioFormat) -> Self {
        Self {
            format,
            octave: DEFAULT_OCTAVE,
            note_frequency: 0.0,
            oscillator: SineOscillator::new(),
            envelope: Envelope::new(format.sample_rate()),
            meter: BlockMeter::new(),
            gate: Gate::new(),
        }
    }

    /// Start the note called `name`. Names outside the note table are
    /// ignored.
    pub fn note_on(&mut self, name: &str) {
        if let Some(note) = Note::from_name(name) {
            self.play(note);
        }
    }

    /// Start `note` at the current octave.
    pub fn play(&mut self, note: Note) {
        let frequency = note.frequency(self.octave);
        // Octaves far outside the audible range overflow to infinity
        if !frequency.is_finite() {
            return;
        }

        self.note_frequency = frequency;
        self.oscillator
            .set_frequency(frequency, self.format.sample_rate());
        self.oscillator.reset_phase();
        self.envelope.note_on();
    }

    /// Release whatever is sounding. Unconditional, even from Silent.
    pub fn note_off(&mut self) {
        self.envelope.note_off();
    }

    /// Takes effect at the next note-on.
    pub fn set_octave(&mut self, octave: i32) {
        self.octave = octave;
    }

    pub fn apply(&mut self, message: ControlMessage) {
        match message {
            ControlMessage::NoteOn { note } => self.play(note),
            ControlMessage::NoteOff => self.note_off(),
            ControlMessage::SetOctave { octave } => self.set_octave(octave),
        }
    }

    #[inline]
    fn next_sample(&mut self) -> f32 {
        let volume = self.envelope.next_sample();
        if self.envelope.is_silent() {
            return 0.0;
        }

        (volume * self.oscillator.next_sample()) as f32
    }

    /// Fill `out` with the next `out.len()` samples.
    pub fn pull(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }

        self.meter.record(out.len());
    }

    /// Fill `out` with little-endian f32 samples and return the number of
    /// bytes written. A trailing partial sample is left untouched.
    pub fn pull_bytes(&mut self, out: &mut [u8]) -> usize {
        let bytes_per_sample = self.format.bytes_per_sample();
        let samples = out.len() / bytes_per_sample;

        for chunk in out.chunks_exact_mut(bytes_per_sample) {
            chunk.copy_from_slice(&self.next_sample().to_le_bytes());
        }

        self.meter.record(samples);
        samples * bytes_per_sample
    }

    /// Open the channel to the pipeline.
    pub fn start(&self) {
        self.gate.open();
    }

    /// Close the channel to the pipeline. An in-flight pull is not affected.
    pub fn stop(&self) {
        self.gate.close();
    }

    pub fn is_open(&self) -> bool {
        self.gate.is_open()
    }

    pub fn gate(&self) -> Gate {
        self.gate.clone()
    }

    /// Handle on the block meter for the stall monitor.
    pub fn meter(&self) -> BlockMeter {
        self.meter.clone()
    }

    pub fn last_block_size(&self) -> usize {
        self.meter.last_block_size()
    }

    pub fn reset_last_block_size(&self) {
        self.meter.reset();
    }

    pub fn format(&self) -> &AudioFormat {
        &self.format
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Frequency of the last note started, in Hz (0 before the first).
    pub fn note_frequency(&self) -> f64 {
        self.note_frequency
    }

    pub fn current_angle(&self) -> f64 {
        self.oscillator.angle()
    }

    pub fn angle_delta(&self) -> f64 {
        self.oscillator.angle_delta()
    }

    pub fn envelope_state(&self) -> EnvelopeState {
        self.envelope.state()
    }

    pub fn envelope_volume(&self) -> f64 {
        self.envelope.volume()
    }

    pub fn envelope_delta(&self) -> f64 {
        self.envelope.delta()
    }

    pub fn envelope_count(&self) -> u64 {
        self.envelope.count()
    }

    pub fn attack_samples(&self) -> u64 {
        self.envelope.attack_samples()
    }

    pub fn release_samples(&self) -> u64 {
        self.envelope.release_samples()
    }
}

impl SampleStream for ToneEngine {
    fn pull(&mut self, out: &mut [f32]) {
        ToneEngine::pull(self, out)
    }

    fn is_open(&self) -> bool {
        ToneEngine::is_open(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    fn engine(sample_rate: u32) -> ToneEngine {
        ToneEngine::new(AudioFormat::mono_f32(sample_rate).unwrap())
    }

    fn pull_n(engine: &mut ToneEngine, n: usize) -> Vec<f32> {
        let mut buffer = vec![1.0f32; n];
        engine.pull(&mut buffer);
        buffer
    }

    #[test]
    fn starts_silent_in_octave_three() {
        let engine = engine(44_100);
        assert_eq!(engine.octave(), 3);
        assert_eq!(engine.envelope_state(), EnvelopeState::Silent);
        assert_eq!(engine.envelope_volume(), 0.0);
        assert!(!engine.is_open());
    }

    #[test]
    fn silent_output_is_exactly_zero() {
        let mut engine = engine(44_100);
        assert!(pull_n(&mut engine, 256).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn note_on_computes_phase_increment() {
        let mut engine = engine(44_100);
        engine.note_on("A");

        assert_eq!(engine.note_frequency(), 220.0);
        let expected = TAU * 220.0 / 44_100.0;
        assert!((engine.angle_delta() - expected).abs() < 1e-12);
        assert_eq!(engine.current_angle(), 0.0);
        assert_eq!(engine.envelope_state(), EnvelopeState::Attack);
        assert_eq!(engine.envelope_count(), engine.attack_samples());
    }

    #[test]
    fn octave_applies_at_next_note_on() {
        let mut engine = engine(44_100);
        engine.note_on("A");
        engine.set_octave(5);

        // still sounding at the old pitch
        assert_eq!(engine.note_frequency(), 220.0);

        engine.note_on("A");
        assert!((engine.note_frequency() - 880.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_note_leaves_state_untouched() {
        let mut engine = engine(44_100);
        engine.note_on("E");
        pull_n(&mut engine, 100);

        let angle = engine.current_angle();
        let delta = engine.angle_delta();
        let volume = engine.envelope_volume();
        let count = engine.envelope_count();

        engine.note_on("H#");

        assert_eq!(engine.current_angle(), angle);
        assert_eq!(engine.angle_delta(), delta);
        assert_eq!(engine.envelope_volume(), volume);
        assert_eq!(engine.envelope_count(), count);
        assert_eq!(engine.envelope_state(), EnvelopeState::Attack);
    }

    #[test]
    fn absurd_octave_is_ignored_at_note_on() {
        let mut engine = engine(44_100);
        engine.set_octave(i32::MAX);
        engine.note_on("A");
        assert_eq!(engine.envelope_state(), EnvelopeState::Silent);
    }

    #[test]
    fn pull_records_block_size() {
        let mut engine = engine(44_100);
        pull_n(&mut engine, 441);
        assert_eq!(engine.last_block_size(), 441);

        engine.reset_last_block_size();
        assert_eq!(engine.last_block_size(), 0);
    }

    #[test]
    fn pull_bytes_rounds_down_to_whole_samples() {
        let mut engine = engine(44_100);
        engine.note_on("C");

        let mut bytes = [0xAAu8; 4 * 10 + 3];
        let written = engine.pull_bytes(&mut bytes);

        assert_eq!(written, 40);
        assert_eq!(engine.last_block_size(), 10);
        assert_eq!(&bytes[40..], &[0xAA, 0xAA, 0xAA]);

        let first = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        assert_eq!(first, 0.0);
    }

    #[test]
    fn samples_stay_in_range() {
        let mut engine = engine(48_000);
        engine.set_octave(6);
        engine.note_on("B");
        let samples = pull_n(&mut engine, 4_800);
        assert!(samples.iter().all(|s| (-1.0..=1.0).contains(s)));
        assert!(samples.iter().any(|s| s.abs() > 0.5));
    }

    #[test]
    fn messages_drive_the_same_transitions() {
        let mut engine = engine(44_100);
        engine.apply(ControlMessage::SetOctave { octave: 4 });
        engine.apply(ControlMessage::NoteOn { note: Note::A });
        assert!((engine.note_frequency() - 440.0).abs() < 1e-9);

        engine.apply(ControlMessage::NoteOff);
        assert_eq!(engine.envelope_state(), EnvelopeState::Release);
    }

    #[test]
    fn closed_engine_renders_silence_without_pulling() {
        let mut engine = engine(44_100);
        engine.note_on("A");

        let mut buffer = [1.0f32; 64];
        SampleStream::render(&mut engine, &mut buffer);
        assert!(buffer.iter().all(|&s| s == 0.0));
        assert_eq!(engine.last_block_size(), 0);

        engine.start();
        SampleStream::render(&mut engine, &mut buffer);
        assert_eq!(engine.last_block_size(), 64);
    }
}
