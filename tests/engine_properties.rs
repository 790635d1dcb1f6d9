use tonesynth::{dsp::EnvelopeState, notes, AudioFormat, Note, ToneEngine};

const SAMPLE_RATE: u32 = 44_100;

fn engine() -> ToneEngine {
    ToneEngine::new(AudioFormat::mono_f32(SAMPLE_RATE).unwrap())
}

fn pull(engine: &mut ToneEngine, n: usize) -> Vec<f32> {
    let mut out = vec![f32::NAN; n];
    engine.pull(&mut out);
    out
}

/// Drive the engine into each envelope state.
fn engine_in(state: EnvelopeState) -> ToneEngine {
    let mut engine = engine();
    match state {
        EnvelopeState::Silent => {}
        EnvelopeState::Attack => {
            engine.note_on("G");
            pull(&mut engine, 100);
        }
        EnvelopeState::Sustain => {
            engine.note_on("G");
            pull(&mut engine, 2_000);
        }
        EnvelopeState::Release => {
            engine.note_on("G");
            pull(&mut engine, 2_000);
            engine.note_off();
            pull(&mut engine, 100);
        }
    }
    assert_eq!(engine.envelope_state(), state);
    engine
}

#[test]
fn attack_lands_in_sustain_for_every_note_and_octave() {
    for octave in -1..=8 {
        for note in Note::ALL {
            let mut engine = engine();
            engine.set_octave(octave);
            engine.note_on(note.name());

            let attack = engine.attack_samples() as usize;
            pull(&mut engine, attack);

            assert_eq!(engine.envelope_state(), EnvelopeState::Sustain, "{note} @ {octave}");
            assert!((engine.envelope_volume() - 1.0).abs() < 1e-9);
        }
    }
}

#[test]
fn release_lands_in_silence_from_every_state() {
    for state in [
        EnvelopeState::Silent,
        EnvelopeState::Attack,
        EnvelopeState::Sustain,
        EnvelopeState::Release,
    ] {
        let mut engine = engine_in(state);
        engine.note_off();

        let release = engine.release_samples() as usize;
        pull(&mut engine, release);

        assert_eq!(engine.envelope_state(), EnvelopeState::Silent, "from {state:?}");
        assert_eq!(engine.envelope_volume(), 0.0);
    }
}

#[test]
fn pull_fills_exactly_what_was_asked() {
    for state in [
        EnvelopeState::Silent,
        EnvelopeState::Attack,
        EnvelopeState::Sustain,
        EnvelopeState::Release,
    ] {
        let mut engine = engine_in(state);
        for n in [0, 1, 7, 64, 441, 4_096] {
            let out = pull(&mut engine, n);
            assert_eq!(out.len(), n);
            assert!(out.iter().all(|s| s.is_finite()), "every slot written");
            assert_eq!(engine.last_block_size(), n);
        }
    }
}

#[test]
fn silence_is_exact_zero() {
    let mut engine = engine();
    assert!(pull(&mut engine, 1_024).iter().all(|&s| s == 0.0));

    // and again after a note has fully released
    engine.note_on("A");
    pull(&mut engine, 5_000);
    engine.note_off();
    let release = engine.release_samples() as usize;
    pull(&mut engine, release);
    assert!(pull(&mut engine, 1_024).iter().all(|&s| s == 0.0));
}

#[test]
fn unknown_note_is_a_no_op_in_every_state() {
    for state in [
        EnvelopeState::Silent,
        EnvelopeState::Attack,
        EnvelopeState::Sustain,
        EnvelopeState::Release,
    ] {
        let mut engine = engine_in(state);
        let before = (
            engine.envelope_state(),
            engine.envelope_volume(),
            engine.envelope_count(),
            engine.current_angle(),
            engine.angle_delta(),
            engine.octave(),
        );

        engine.note_on("X");
        engine.note_on("a");
        engine.note_on("C''");

        let after = (
            engine.envelope_state(),
            engine.envelope_volume(),
            engine.envelope_count(),
            engine.current_angle(),
            engine.angle_delta(),
            engine.octave(),
        );
        assert_eq!(before, after);
    }
}

#[test]
fn octave_scaling_of_a() {
    assert_eq!(notes::frequency_of("A").unwrap(), 220.0);

    let mut engine = engine();
    for (octave, expected) in [(1, 55.0), (3, 220.0), (5, 880.0)] {
        engine.set_octave(octave);
        engine.note_on("A");
        assert!((engine.note_frequency() - expected).abs() < 1e-9);

        let expected_delta = std::f64::consts::TAU * expected / SAMPLE_RATE as f64;
        assert!((engine.angle_delta() - expected_delta).abs() < 1e-12);
    }
}

#[test]
fn end_to_end_a_at_44100() {
    let mut engine = engine();
    engine.note_on("A");

    let first = pull(&mut engine, 1);
    assert_eq!(first[0], 0.0);
    assert!((engine.envelope_volume() - engine.envelope_delta()).abs() < 1e-12);

    let rest = engine.attack_samples() as usize - 1;
    pull(&mut engine, rest);
    assert!((engine.envelope_volume() - 1.0).abs() < 1e-9);
    assert_eq!(engine.envelope_state(), EnvelopeState::Sustain);
}

#[test]
fn phase_continues_across_pull_boundaries() {
    let mut whole = engine();
    whole.note_on("E");
    let reference = pull(&mut whole, 3_000);

    let mut split = engine();
    split.note_on("E");
    let mut pieces = Vec::new();
    for size in [1, 127, 512, 1_000, 1_360] {
        pieces.extend(pull(&mut split, size));
    }

    assert_eq!(reference, pieces);
}

#[test]
fn retrigger_restarts_phase_and_attack() {
    let mut engine = engine();
    engine.note_on("C");
    pull(&mut engine, 3_000);

    engine.note_on("D");
    assert_eq!(engine.current_angle(), 0.0);
    assert_eq!(engine.envelope_volume(), 0.0);
    assert_eq!(engine.envelope_state(), EnvelopeState::Attack);

    let first = pull(&mut engine, 1);
    assert_eq!(first[0], 0.0);
}

#[test]
fn sustained_tone_matches_a_sine() {
    let mut engine = engine();
    engine.note_on("A");
    let attack = engine.attack_samples() as usize;
    pull(&mut engine, attack);

    // Sustain: unit amplitude sine continuing from phase `attack`
    let out = pull(&mut engine, 100);
    let step = std::f64::consts::TAU * 220.0 / SAMPLE_RATE as f64;
    for (i, &sample) in out.iter().enumerate() {
        let expected = ((attack + i) as f64 * step).sin() as f32;
        assert!((sample - expected).abs() < 1e-4, "sample {i}");
    }
}
