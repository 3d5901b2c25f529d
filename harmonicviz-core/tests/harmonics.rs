//! End-to-end checks of the public API against known string-player facts.

use harmonicviz_core::fret::fret_position;
use harmonicviz_core::{
    ArtificialDifficulty, InputMode, Instrument, StopInput, artificial_harmonic_touch_positions,
    artificial_harmonics, frequency_from_note_name, harmonic_nodes, instrument_table,
    note_from_frequency, position_to_fret, stop_position, stop_position_from_input,
};

#[test]
fn concert_a_round_trips_through_the_note_table() {
    let freq = frequency_from_note_name("A4").unwrap();
    let note = note_from_frequency(freq);
    assert_eq!(note.name, "A4");
    assert!(note.cents.abs() < 1e-9);
}

#[test]
fn every_standard_string_names_itself() {
    for (instrument, strings) in instrument_table() {
        assert_eq!(strings.len(), 4, "{instrument}");
        for string in strings {
            let note = note_from_frequency(string.frequency);
            assert_eq!(note.name, string.name);
            assert!(note.cents.abs() < 1e-6);
        }
    }
    assert_eq!(Instrument::Violin.open_string_frequency("A4"), Some(440.0));
}

#[test]
fn harmonic_nodes_of_six() {
    let positions: Vec<f64> = harmonic_nodes(6).iter().map(|p| p.position).collect();
    assert_eq!(positions, vec![1.0 / 6.0, 5.0 / 6.0]);
}

#[test]
fn every_fret_position_is_found_again() {
    for k in 0..=48 {
        let found = position_to_fret(fret_position(k));
        assert_eq!(found.fret, k);
        assert!(found.cents.abs() < 1e-9);
    }
}

#[test]
fn open_stop_degenerates_to_the_open_string() {
    let harmonics = artificial_harmonics(196.0, StopInput::Fret(0));
    assert_eq!(harmonics.len(), 8);
    assert_eq!(harmonics[0].touch_position, 0.0);
    assert_eq!(harmonics[0].touch_fret, 0);
    assert_eq!(harmonics[0].result_note, note_from_frequency(196.0));
    assert!(artificial_harmonic_touch_positions(StopInput::Fret(0)).is_empty());

    // With nothing stopped, the touch points are the first natural nodes 1/n
    for harmonic in &harmonics[1..] {
        let expected = 1.0 / harmonic.number as f64;
        assert!((harmonic.touch_position - expected).abs() < 1e-12);
    }
}

#[test]
fn octave_stop_matches_the_reference_values() {
    let stop = StopInput::from_mode(InputMode::Fret, 12, 0);
    let stop_pos = stop_position(stop);
    let harmonics = artificial_harmonics(196.0, stop);

    assert_eq!(harmonics[0].result_frequency, 392.0);
    assert_eq!(harmonics[1].result_frequency, 784.0);
    assert_eq!(harmonics[1].touch_position, stop_pos + 0.5 * (1.0 - stop_pos));
    assert_eq!(harmonics[1].difficulty, ArtificialDifficulty::Unreachable);
}

#[test]
fn cents_input_matches_fret_input() {
    assert_eq!(
        stop_position_from_input(InputMode::Cents, 0, 500),
        stop_position_from_input(InputMode::Fret, 5, 0)
    );
    let by_fret = artificial_harmonics(293.66, StopInput::Fret(5));
    let by_cents = artificial_harmonics(293.66, StopInput::Cents(500));
    assert_eq!(by_fret, by_cents);
}

#[test]
fn repeated_calls_are_bit_identical() {
    let stop = StopInput::Cents(437);
    assert_eq!(artificial_harmonics(130.81, stop), artificial_harmonics(130.81, stop));
    assert_eq!(harmonic_nodes(15), harmonic_nodes(15));

    let a = position_to_fret(0.4321);
    let b = position_to_fret(0.4321);
    assert_eq!(a.fret, b.fret);
    assert_eq!(a.cents.to_bits(), b.cents.to_bits());
}
