//! # Fret Geometry Module
//!
//! Maps positions along the vibrating length (0 = nut, 1 = bridge) to the
//! nearest equal-tempered fret and the cents adjustment from that fret.
//!
//! Fret `k` sits at `1 - 2^(-k/12)`: each fret shortens the remaining length
//! by one equal-tempered semitone.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::note::{Note, cents_between, note_from_frequency};

/// Number of frets searched when naming an arbitrary string position.
pub const SEARCH_FRET_COUNT: usize = 48;

/// Number of fret lines drawn by the string visualizer.
pub const DISPLAY_FRET_COUNT: u32 = 36;

/// Position of fret `k` measured from the nut. Fret 0 is the open string.
pub fn fret_position(fret: u32) -> f64 {
    1.0 - 2.0_f64.powf(-(fret as f64) / 12.0)
}

/// Positions of frets 1..=48, computed once.
static FRET_TABLE: Lazy<[f64; SEARCH_FRET_COUNT]> =
    Lazy::new(|| std::array::from_fn(|i| fret_position(i as u32 + 1)));

/// Nearest fret to a string position and the pitch adjustment from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FretPosition {
    /// Nearest tabulated fret (0 = open string)
    pub fret: u32,
    /// Cents from the fret's pitch to the position's pitch (positive = position is higher)
    pub cents: f64,
}

/// Pitch distance in cents between a fret edge and a position.
///
/// Frequency is inversely proportional to vibrating length, so the ratio is
/// the remaining length at the edge over the remaining length at the position.
fn cents_from_edge(edge_position: f64, position: f64) -> f64 {
    cents_between(1.0 - edge_position, 1.0 - position)
}

/// Finds the nearest fret to a string position.
///
/// The two tabulated frets bracketing `position` are located with a linear
/// search; the closer one in cents wins, ties going to the lower fret.
/// Positions before fret 1 are bracketed by the open string and fret 1.
/// Positions beyond the last tabulated fret are not clamped: they keep the
/// open-string bracket and extrapolate.
///
/// # Arguments
/// * `position` - Fractional distance from the nut, nominally in [0, 1)
///
/// # Returns
/// * `FretPosition` - Nearest fret and signed cents adjustment
pub fn position_to_fret(position: f64) -> FretPosition {
    let table = &*FRET_TABLE;

    let (mut lower_fret, mut upper_fret) = (0, 1);
    let (mut lower_pos, mut upper_pos) = (0.0, table[0]);

    if let Some(i) = table
        .windows(2)
        .position(|pair| position >= pair[0] && position <= pair[1])
    {
        lower_fret = i as u32 + 1;
        upper_fret = i as u32 + 2;
        lower_pos = table[i];
        upper_pos = table[i + 1];
    }

    let cents_from_lower = cents_from_edge(lower_pos, position);
    let cents_from_upper = cents_from_edge(upper_pos, position);

    if cents_from_lower.abs() <= cents_from_upper.abs() {
        FretPosition { fret: lower_fret, cents: cents_from_lower }
    } else {
        FretPosition { fret: upper_fret, cents: cents_from_upper }
    }
}

/// Names the pitch sounded by stopping the string at `fret`.
///
/// # Arguments
/// * `fret` - Fret number (0 = open string)
/// * `base_frequency` - Open-string frequency in Hz
pub fn frequency_at_fret(fret: u32, base_frequency: f64) -> Note {
    note_from_frequency(base_frequency * 2.0_f64.powf(fret as f64 / 12.0))
}

/// A fret line for the string visualizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FretMarker {
    pub fret: u32,
    pub position: f64,
    pub note: Note,
}

/// Fret lines 1..=count with the note each fret sounds on this string.
pub fn fret_markers(base_frequency: f64, count: u32) -> Vec<FretMarker> {
    (1..=count)
        .map(|fret| FretMarker {
            fret,
            position: fret_position(fret),
            note: frequency_at_fret(fret, base_frequency),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octave_fret_is_half_way() {
        assert_eq!(fret_position(0), 0.0);
        assert!((fret_position(12) - 0.5).abs() < 1e-12);
        assert!((fret_position(24) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn tabulated_positions_map_back_to_their_fret() {
        for k in 1..=SEARCH_FRET_COUNT as u32 {
            let found = position_to_fret(fret_position(k));
            assert_eq!(found.fret, k);
            assert!(found.cents.abs() < 1e-9, "fret {k}: {}", found.cents);
        }
    }

    #[test]
    fn open_string_is_fret_zero() {
        assert_eq!(position_to_fret(0.0), FretPosition { fret: 0, cents: 0.0 });
    }

    #[test]
    fn picks_the_closer_fret_in_cents() {
        // 30 cents above fret 5
        let position = 1.0 - 2.0_f64.powf(-5.3 / 12.0);
        let found = position_to_fret(position);
        assert_eq!(found.fret, 5);
        assert!((found.cents - 30.0).abs() < 1e-9);

        // 30 cents below fret 6
        let position = 1.0 - 2.0_f64.powf(-5.7 / 12.0);
        let found = position_to_fret(position);
        assert_eq!(found.fret, 6);
        assert!((found.cents + 30.0).abs() < 1e-9);
    }

    #[test]
    fn third_of_the_string_is_near_fret_seven() {
        // 3/2 ratio is a just fifth: about 2 cents above fret 7
        let found = position_to_fret(1.0 / 3.0);
        assert_eq!(found.fret, 7);
        assert!((found.cents - 1.955).abs() < 1e-3);
    }

    #[test]
    fn adjustment_is_the_pitch_distance_to_the_fret() {
        // Touching at 1/3 sounds 3/2 of the open string
        let found = position_to_fret(1.0 / 3.0);
        let fret_ratio = 2.0_f64.powf(found.fret as f64 / 12.0);
        assert!((found.cents - cents_between(1.5, fret_ratio)).abs() < 1e-9);
    }

    #[test]
    fn positions_past_the_table_extrapolate() {
        let found = position_to_fret(0.99);
        assert_eq!(found.fret, 1);
        assert!(found.cents > 7000.0);
    }

    #[test]
    fn fret_twelve_is_an_octave_up() {
        let note = frequency_at_fret(12, 196.0);
        assert_eq!(note.frequency, 392.0);
        assert_eq!(note.name, "G4");
    }

    #[test]
    fn markers_carry_their_pitch_class() {
        let markers = fret_markers(440.0, DISPLAY_FRET_COUNT);
        assert_eq!(markers.len(), 36);
        assert_eq!(markers[0].fret, 1);
        assert_eq!(markers[0].note.pitch_class(), "A♯/B♭");
        assert_eq!(markers[11].note.name, "A5");
    }
}
