//! # Artificial Harmonics Module
//!
//! An artificial harmonic is played by stopping the string firmly and lightly
//! touching a node of the shortened string. Given the open-string frequency
//! and the stop, this module derives the eight producible harmonics, the
//! pitch each one sounds and where on the fretboard the touch finger goes.
//!
//! ## Features
//! - Stop input as a fret number or as cents above the open string
//! - Result pitch for harmonic ratios 1 through 8
//! - Touch point located on the fretboard, named against the open string
//! - Difficulty labels, including the unreachable second harmonic

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::fret::{frequency_at_fret, position_to_fret};
use crate::note::{Note, note_from_frequency};

/// Number of artificial harmonics derived from a stop.
pub const ARTIFICIAL_HARMONIC_COUNT: usize = 8;

/// Interval names of the artificial harmonics, relative to the stopped note.
const ARTIFICIAL_NAMES: [&str; ARTIFICIAL_HARMONIC_COUNT] = [
    "Base Note (Stopped String)",
    "Octave",
    "Octave + Fifth",
    "2 Octaves",
    "2 Octaves + Major Third",
    "2 Octaves + Fifth",
    "2 Octaves + Minor Seventh",
    "3 Octaves",
];

/// How the stop position is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Fret,
    Cents,
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::Fret => f.write_str("Fret Number"),
            InputMode::Cents => f.write_str("Cents Above Base"),
        }
    }
}

/// Where the stopping finger presses the string.
///
/// A value of zero or below is the open string (no stop).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "lowercase")]
pub enum StopInput {
    /// Semitones above the open string (fret 0..=12 in the UI)
    Fret(i32),
    /// Cents above the open string (0..=1200 in the UI)
    Cents(i32),
}

impl Default for StopInput {
    fn default() -> Self {
        StopInput::Fret(0)
    }
}

impl StopInput {
    /// Builds a stop from the two-value form where only the selected mode's value counts.
    pub fn from_mode(mode: InputMode, fret: i32, cents: i32) -> Self {
        match mode {
            InputMode::Fret => StopInput::Fret(fret),
            InputMode::Cents => StopInput::Cents(cents),
        }
    }

    /// The open string in the given mode.
    pub fn open(mode: InputMode) -> Self {
        StopInput::from_mode(mode, 0, 0)
    }

    pub fn mode(self) -> InputMode {
        match self {
            StopInput::Fret(_) => InputMode::Fret,
            StopInput::Cents(_) => InputMode::Cents,
        }
    }

    pub fn value(self) -> i32 {
        match self {
            StopInput::Fret(v) | StopInput::Cents(v) => v,
        }
    }

    pub fn is_open(self) -> bool {
        self.value() <= 0
    }

    /// Distance of the stop above the open string in cents.
    pub fn cents_above_open(self) -> f64 {
        match self {
            StopInput::Fret(fret) => fret as f64 * 100.0,
            StopInput::Cents(cents) => cents as f64,
        }
    }

    /// Distance of the stop above the open string in semitones.
    pub fn semitones(self) -> f64 {
        self.cents_above_open() / 100.0
    }
}

/// Converts a stop to a position along the string (0 = nut).
///
/// Uses the same law as fret spacing: `1 - 2^(-semitones/12)`. Open stops
/// map to 0.
pub fn stop_position(stop: StopInput) -> f64 {
    if stop.is_open() {
        return 0.0;
    }
    1.0 - 2.0_f64.powf(-stop.semitones() / 12.0)
}

/// Stop position from the mode + two-value form.
pub fn stop_position_from_input(mode: InputMode, fret: i32, cents: i32) -> f64 {
    stop_position(StopInput::from_mode(mode, fret, cents))
}

/// Frequency of the stopped string.
pub fn stopped_frequency(base_frequency: f64, stop: StopInput) -> f64 {
    base_frequency * 2.0_f64.powf(stop.cents_above_open() / 1200.0)
}

/// Touch position for harmonic `n` above a stop.
///
/// The first node of the remaining length (stop to bridge) divided into `n`
/// equal parts. Harmonic 1 is the stop itself.
pub fn touch_position(stop_position: f64, n: u32) -> f64 {
    if n <= 1 {
        stop_position
    } else {
        stop_position + (1.0 / n as f64) * (1.0 - stop_position)
    }
}

/// Playing difficulty of an artificial harmonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtificialDifficulty {
    Easy,
    Medium,
    Hard,
    /// Ratio 2: the touch point lies at the stop's own octave node, out of reach of the hand.
    Unreachable,
}

impl ArtificialDifficulty {
    pub fn for_ratio(n: u32) -> Self {
        match n {
            1 | 4 => ArtificialDifficulty::Easy,
            3 | 5 => ArtificialDifficulty::Medium,
            2 => ArtificialDifficulty::Unreachable,
            _ => ArtificialDifficulty::Hard,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ArtificialDifficulty::Easy => "Easy",
            ArtificialDifficulty::Medium => "Medium",
            ArtificialDifficulty::Hard => "Hard",
            ArtificialDifficulty::Unreachable => "Unreachable",
        }
    }
}

/// One harmonic producible from a stopped string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtificialHarmonic {
    /// Harmonic ratio, 1..=8
    pub number: u32,
    pub name: &'static str,
    pub result_frequency: f64,
    pub result_note: Note,
    /// Position of the light-touch finger (0 = nut)
    pub touch_position: f64,
    pub touch_fret: u32,
    /// Pitch of `touch_fret` on the open string
    pub touch_note: Note,
    pub touch_cents: f64,
    pub difficulty: ArtificialDifficulty,
}

/// Derives the eight artificial harmonics for a stop.
///
/// The list always has eight entries; ratio 2 is computed like the others
/// and only flagged [`ArtificialDifficulty::Unreachable`]. The touch note is
/// named relative to the open string, because the performer reads the touch
/// point as a position on the full-length string.
///
/// # Arguments
/// * `base_frequency` - Open-string frequency in Hz
/// * `stop` - Where the string is stopped
///
/// # Returns
/// * `Vec<ArtificialHarmonic>` - Harmonics for ratios 1 through 8
pub fn artificial_harmonics(base_frequency: f64, stop: StopInput) -> Vec<ArtificialHarmonic> {
    let stopped = stopped_frequency(base_frequency, stop);
    let stop_pos = stop_position(stop);

    (1..=ARTIFICIAL_HARMONIC_COUNT as u32)
        .zip(ARTIFICIAL_NAMES)
        .map(|(n, name)| {
            let result_frequency = stopped * n as f64;
            let touch = touch_position(stop_pos, n);
            let nearest = position_to_fret(touch);

            ArtificialHarmonic {
                number: n,
                name,
                result_frequency,
                result_note: note_from_frequency(result_frequency),
                touch_position: touch,
                touch_fret: nearest.fret,
                touch_note: frequency_at_fret(nearest.fret, base_frequency),
                touch_cents: nearest.cents,
                difficulty: ArtificialDifficulty::for_ratio(n),
            }
        })
        .collect()
}

/// A touch marker for the string visualizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPosition {
    pub number: u32,
    pub position: f64,
}

/// Touch positions of the eight artificial harmonics, without naming pitches.
///
/// Returns an empty list for an open stop.
pub fn artificial_harmonic_touch_positions(stop: StopInput) -> Vec<TouchPosition> {
    let stop_pos = stop_position(stop);
    if stop_pos == 0.0 {
        return Vec::new();
    }

    (1..=ARTIFICIAL_HARMONIC_COUNT as u32)
        .map(|n| TouchPosition {
            number: n,
            position: touch_position(stop_pos, n),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_stop_is_position_zero() {
        assert_eq!(stop_position(StopInput::Fret(0)), 0.0);
        assert_eq!(stop_position(StopInput::Cents(0)), 0.0);
        assert_eq!(stop_position(StopInput::Fret(-3)), 0.0);
        assert!(StopInput::Cents(-1).is_open());
    }

    #[test]
    fn fret_and_cents_stops_agree() {
        assert_eq!(
            stop_position(StopInput::Fret(7)),
            stop_position(StopInput::Cents(700))
        );
        assert_eq!(stop_position(StopInput::Fret(12)), 0.5);
    }

    #[test]
    fn from_mode_reads_only_the_selected_value() {
        assert_eq!(StopInput::from_mode(InputMode::Fret, 5, 250), StopInput::Fret(5));
        assert_eq!(StopInput::from_mode(InputMode::Cents, 5, 250), StopInput::Cents(250));
        assert_eq!(stop_position_from_input(InputMode::Cents, 12, 0), 0.0);
    }

    #[test]
    fn always_eight_harmonics() {
        assert_eq!(artificial_harmonics(196.0, StopInput::Fret(0)).len(), 8);
        assert_eq!(artificial_harmonics(196.0, StopInput::Cents(333)).len(), 8);
    }

    #[test]
    fn octave_stop_on_g_string() {
        let harmonics = artificial_harmonics(196.0, StopInput::Fret(12));

        assert_eq!(stopped_frequency(196.0, StopInput::Fret(12)), 392.0);
        assert_eq!(harmonics[0].result_frequency, 392.0);
        assert_eq!(harmonics[1].result_frequency, 784.0);
        assert_eq!(harmonics[1].result_note.name, "G5");
        assert_eq!(harmonics[1].touch_position, 0.5 + 0.5 * 0.5);
        assert_eq!(harmonics[1].touch_fret, 24);
        assert_eq!(harmonics[1].touch_note.name, "G5");
        assert_eq!(harmonics[1].difficulty, ArtificialDifficulty::Unreachable);
    }

    #[test]
    fn touch_fourth_from_first_position() {
        // Stop at fret 2, touch a just fourth higher for two octaves up.
        // A just fourth is about 2 cents narrower than five tempered frets.
        let harmonics = artificial_harmonics(196.0, StopInput::Fret(2));
        let fourth = &harmonics[3];
        assert_eq!(fourth.number, 4);
        assert_eq!(fourth.name, "2 Octaves");
        assert_eq!(fourth.touch_fret, 7);
        assert!((fourth.touch_cents + 1.955).abs() < 1e-3);
        assert_eq!(fourth.result_note.name, "A5");
        assert_eq!(fourth.difficulty, ArtificialDifficulty::Easy);
    }

    #[test]
    fn touch_note_is_named_on_the_open_string() {
        let harmonics = artificial_harmonics(196.0, StopInput::Fret(5));
        for harmonic in &harmonics {
            let expected = frequency_at_fret(harmonic.touch_fret, 196.0);
            assert_eq!(harmonic.touch_note, expected);
        }
    }

    #[test]
    fn first_harmonic_touches_the_stop() {
        let stop = StopInput::Cents(350);
        let harmonics = artificial_harmonics(220.0, stop);
        assert_eq!(harmonics[0].touch_position, stop_position(stop));
        assert_eq!(harmonics[0].result_note, note_from_frequency(stopped_frequency(220.0, stop)));
    }

    #[test]
    fn difficulty_labels() {
        let labels: Vec<_> = (1..=8)
            .map(|n| ArtificialDifficulty::for_ratio(n).label())
            .collect();
        assert_eq!(
            labels,
            ["Easy", "Unreachable", "Medium", "Easy", "Medium", "Hard", "Hard", "Hard"]
        );
    }

    #[test]
    fn touch_positions_are_empty_without_a_stop() {
        assert!(artificial_harmonic_touch_positions(StopInput::Fret(0)).is_empty());
        assert!(artificial_harmonic_touch_positions(StopInput::Cents(0)).is_empty());
    }

    #[test]
    fn touch_positions_match_full_harmonics() {
        let stop = StopInput::Fret(3);
        let light = artificial_harmonic_touch_positions(stop);
        let full = artificial_harmonics(196.0, stop);
        assert_eq!(light.len(), 8);
        for (touch, harmonic) in light.iter().zip(&full) {
            assert_eq!(touch.number, harmonic.number);
            assert_eq!(touch.position, harmonic.touch_position);
        }
    }

    #[test]
    fn touch_points_move_toward_the_bridge() {
        let stop_pos = stop_position(StopInput::Fret(4));
        for n in 2..=8 {
            let touch = touch_position(stop_pos, n);
            assert!(touch > stop_pos && touch < 1.0);
        }
        // Higher ratios touch closer to the stop
        assert!(touch_position(stop_pos, 5) < touch_position(stop_pos, 4));
    }
}
