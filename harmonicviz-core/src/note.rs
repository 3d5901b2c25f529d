//! # Note Naming Module
//!
//! Converts frequencies into equal-tempered note names with a cents deviation.
//! Every pitch shown to the performer (open strings, fret labels, harmonic
//! results) goes through [`note_from_frequency`], so this is the single source
//! of truth for displayed pitches.
//!
//! ## Features
//! - A4 = 440 Hz, 12-tone equal temperament
//! - Enharmonic display pairs for sharps (e.g. `C♯/D♭4`)
//! - Signed cents deviation from the nearest tempered note

use serde::{Deserialize, Serialize};

/// Reference pitch of A4 in Hz.
pub const A4_FREQUENCY: f64 = 440.0;

/// Chromatic pitch-class names, starting at C.
pub const PITCH_CLASSES: [&str; 12] = [
    "C", "C♯", "D", "D♯", "E", "F", "F♯", "G", "G♯", "A", "A♯", "B",
];

/// Frequency of C0 under the A4 = 440 Hz convention (A4 sits 4.75 octaves above C0).
pub fn c0_frequency() -> f64 {
    A4_FREQUENCY * 2.0_f64.powf(-4.75)
}

/// A named pitch derived from a frequency.
///
/// Notes are recomputed on demand and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Display name with octave (e.g. "A4", "C♯/D♭5")
    pub name: String,
    /// Frequency in Hz that was named
    pub frequency: f64,
    /// Deviation from the nearest tempered note (positive = sharp)
    pub cents: f64,
}

impl Note {
    /// Returns the pitch-class part of the name, without the octave digits.
    pub fn pitch_class(&self) -> &str {
        self.name.trim_end_matches(|c: char| c.is_ascii_digit() || c == '-')
    }
}

/// Maps a sharp pitch class to its sharp/flat display pair.
///
/// Naturals are returned unchanged.
pub fn display_pitch_class(pitch_class: &str) -> &str {
    match pitch_class {
        "C♯" => "C♯/D♭",
        "D♯" => "D♯/E♭",
        "F♯" => "F♯/G♭",
        "G♯" => "G♯/A♭",
        "A♯" => "A♯/B♭",
        other => other,
    }
}

/// Finds the nearest equal-tempered note to a frequency.
///
/// The exact semitone distance from C0 is rounded to pick the note; the
/// rounding remainder becomes the cents deviation.
///
/// # Arguments
/// * `freq` - Frequency in Hz. Must be positive: a frequency of zero or below
///   is an unsupported input and yields a NaN cents value rather than a panic.
///
/// # Returns
/// * `Note` - Display name, the input frequency and the cents deviation
pub fn note_from_frequency(freq: f64) -> Note {
    let exact_half_steps = 12.0 * (freq / c0_frequency()).log2();
    let half_steps = exact_half_steps.round();

    let name = if half_steps.is_finite() {
        let n = half_steps as i64;
        let octave = n.div_euclid(12);
        let pitch_class = PITCH_CLASSES[n.rem_euclid(12) as usize];
        format!("{}{}", display_pitch_class(pitch_class), octave)
    } else {
        String::from("--")
    };

    Note {
        name,
        frequency: freq,
        cents: (exact_half_steps - half_steps) * 100.0,
    }
}

/// Calculates the distance between two frequencies in cents.
///
/// Positive values mean `freq` is above `reference`.
pub fn cents_between(freq: f64, reference: f64) -> f64 {
    1200.0 * (freq / reference).log2()
}
