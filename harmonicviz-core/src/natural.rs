//! # Natural Harmonics Module
//!
//! Enumerates the nodes of the open string for a given harmonic number and
//! describes the resulting harmonic for display.
//!
//! Harmonic `n` sounds when the string is lightly touched at a node `i/n`.
//! Only reduced fractions are listed: a node `i/n` with `gcd(i, n) > 1` is
//! already a node of a lower harmonic.

use serde::{Deserialize, Serialize};

use crate::fret::{frequency_at_fret, position_to_fret};
use crate::note::{Note, note_from_frequency};

/// Highest harmonic the navigator offers.
pub const MAX_HARMONIC: u32 = 16;

/// Interval names of harmonics 1..=16 relative to the open string.
const HARMONIC_NAMES: [&str; MAX_HARMONIC as usize] = [
    "Base Note (Open String)",
    "Octave",
    "Octave + Fifth",
    "2 Octaves",
    "2 Octaves + Major Third",
    "2 Octaves + Fifth",
    "2 Octaves + Minor Seventh",
    "3 Octaves",
    "3 Octaves + Major Second",
    "3 Octaves + Major Third",
    "3 Octaves + Augmented Fourth",
    "3 Octaves + Fifth",
    "3 Octaves + Minor Sixth",
    "3 Octaves + Minor Seventh",
    "3 Octaves + Major Seventh",
    "4 Octaves",
];

/// Interval name of harmonic `n`, if it is in 1..=16.
pub fn harmonic_name(n: u32) -> Option<&'static str> {
    n.checked_sub(1)
        .and_then(|i| HARMONIC_NAMES.get(i as usize))
        .copied()
}

/// A node of the open string, the reduced fraction `numerator/denominator`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarmonicPosition {
    pub position: f64,
    pub numerator: u32,
    pub denominator: u32,
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// Lists the touch nodes that produce harmonic `n`.
///
/// Harmonic 1 is the open string and has no node. For `n >= 2`, every
/// `i/n` with `0 < i < n` and `gcd(i, n) = 1` is returned, nut side first.
pub fn harmonic_nodes(n: u32) -> Vec<HarmonicPosition> {
    if n <= 1 {
        return Vec::new();
    }

    (1..n)
        .filter(|&i| gcd(i, n) == 1)
        .map(|i| HarmonicPosition {
            position: i as f64 / n as f64,
            numerator: i,
            denominator: n,
        })
        .collect()
}

/// How hard a natural harmonic is to sound cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NaturalDifficulty {
    Easy,
    Medium,
    Hard,
}

impl NaturalDifficulty {
    pub fn for_harmonic(n: u32) -> Self {
        match n {
            0..=4 => NaturalDifficulty::Easy,
            5..=8 => NaturalDifficulty::Medium,
            _ => NaturalDifficulty::Hard,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NaturalDifficulty::Easy => "Easy",
            NaturalDifficulty::Medium => "Medium",
            NaturalDifficulty::Hard => "Hard",
        }
    }
}

/// Everything the natural-harmonic panel shows for one harmonic number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NaturalHarmonic {
    pub number: u32,
    pub name: Option<&'static str>,
    /// Sounding pitch, `base_frequency * n`
    pub result: Note,
    pub difficulty: NaturalDifficulty,
    pub nodes: Vec<HarmonicPosition>,
}

/// Describes natural harmonic `n` of an open string.
pub fn natural_harmonic(base_frequency: f64, n: u32) -> NaturalHarmonic {
    NaturalHarmonic {
        number: n,
        name: harmonic_name(n),
        result: note_from_frequency(base_frequency * n as f64),
        difficulty: NaturalDifficulty::for_harmonic(n),
        nodes: harmonic_nodes(n),
    }
}

/// Which way the finger must move from the nearest fret to reach a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Adjustment {
    /// Within 0.01 cents of the fret
    Exact,
    /// Play this many cents higher than the fret
    Higher(f64),
    /// Play this many cents lower than the fret
    Lower(f64),
}

const EXACT_TOLERANCE_CENTS: f64 = 0.01;

impl Adjustment {
    pub fn from_cents(cents: f64) -> Self {
        if cents.abs() < EXACT_TOLERANCE_CENTS {
            Adjustment::Exact
        } else if cents > 0.0 {
            Adjustment::Higher(cents)
        } else {
            Adjustment::Lower(cents.abs())
        }
    }
}

/// Locates a touch position relative to the fretboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionGuide {
    pub fret: u32,
    /// Pitch of the nearest fret on the open string
    pub fret_note: Note,
    pub cents: f64,
    pub adjustment: Adjustment,
}

/// Builds the position guide for a node: nearest fret, its note and the adjustment.
pub fn position_guide(position: f64, base_frequency: f64) -> PositionGuide {
    let nearest = position_to_fret(position);
    PositionGuide {
        fret: nearest.fret,
        fret_note: frequency_at_fret(nearest.fret, base_frequency),
        cents: nearest.cents,
        adjustment: Adjustment::from_cents(nearest.cents),
    }
}
