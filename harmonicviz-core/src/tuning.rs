//! # Open-String Tuning Module
//!
//! Builds reference open-string frequencies for the bowed string family from
//! note names, using equal temperament relative to A4 = 440 Hz.
//!
//! ## Features
//! - Note name parsing (`G3`, `C#4`, `Bb2`) to frequency
//! - Four standard-tuned instruments (violin, viola, cello, bass)
//! - A read-only instrument table computed once at first use

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::note::A4_FREQUENCY;

/// Base frequency used by callers when no open-string frequency is available (G3).
pub const FALLBACK_BASE_FREQUENCY: f64 = 196.0;

/// Reasons a note name could not be turned into a frequency.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteNameError {
    #[error("note name is empty")]
    Empty,
    #[error("'{0}' is not a note letter (expected A-G)")]
    InvalidLetter(char),
    #[error("{letter}{accidental} has no equal-tempered slot in the note table")]
    UnsupportedAccidental { letter: char, accidental: char },
    #[error("note name is missing its octave digit")]
    MissingOctave,
    #[error("'{0}' is not an octave digit")]
    InvalidOctave(char),
    #[error("unexpected trailing input '{0}'")]
    TrailingInput(String),
}

/// Semitone offset of a letter + accidental from A in the same octave.
///
/// Flats share the slot of their enharmonic sharp. Accidentals that would
/// cross a natural half step (Cb, Fb, E#, B#) are not in the table.
fn semitones_from_a(letter: char, accidental: Option<char>) -> Result<i32, NoteNameError> {
    let offset = match (letter, accidental) {
        ('C', None) => -9,
        ('C', Some('#')) | ('D', Some('b')) => -8,
        ('D', None) => -7,
        ('D', Some('#')) | ('E', Some('b')) => -6,
        ('E', None) => -5,
        ('F', None) => -4,
        ('F', Some('#')) | ('G', Some('b')) => -3,
        ('G', None) => -2,
        ('G', Some('#')) | ('A', Some('b')) => -1,
        ('A', None) => 0,
        ('A', Some('#')) | ('B', Some('b')) => 1,
        ('B', None) => 2,
        (letter, Some(accidental)) => {
            return Err(NoteNameError::UnsupportedAccidental { letter, accidental });
        }
        (letter, None) => return Err(NoteNameError::InvalidLetter(letter)),
    };
    Ok(offset)
}

/// Parses a note name of the form `<A-G>[#|b]<digit>` into its frequency.
///
/// # Arguments
/// * `note` - Note name (e.g. "A4", "C#3", "Bb2")
///
/// # Returns
/// * `Ok(frequency)` - Equal-tempered frequency in Hz
/// * `Err(NoteNameError)` - The name does not match the pattern
pub fn parse_note_name(note: &str) -> Result<f64, NoteNameError> {
    let mut chars = note.chars().peekable();

    let letter = chars.next().ok_or(NoteNameError::Empty)?;
    if !('A'..='G').contains(&letter) {
        return Err(NoteNameError::InvalidLetter(letter));
    }

    let accidental = match chars.peek() {
        Some(&c @ ('#' | 'b')) => {
            chars.next();
            Some(c)
        }
        _ => None,
    };

    let octave_char = chars.next().ok_or(NoteNameError::MissingOctave)?;
    let octave = octave_char
        .to_digit(10)
        .ok_or(NoteNameError::InvalidOctave(octave_char))? as i32;

    let rest: String = chars.collect();
    if !rest.is_empty() {
        return Err(NoteNameError::TrailingInput(rest));
    }

    let half_steps_from_a4 = (octave - 4) * 12 + semitones_from_a(letter, accidental)?;
    Ok(A4_FREQUENCY * 2.0_f64.powf(half_steps_from_a4 as f64 / 12.0))
}

/// Returns the frequency for a note name, or `None` if the name is malformed.
///
/// Callers treat `None` as "no frequency available" and substitute
/// [`FALLBACK_BASE_FREQUENCY`].
pub fn frequency_from_note_name(note: &str) -> Option<f64> {
    parse_note_name(note).ok()
}

/// The four predefined bowed string instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    Violin,
    Viola,
    Cello,
    Bass,
}

impl Instrument {
    pub const ALL: [Instrument; 4] = [
        Instrument::Violin,
        Instrument::Viola,
        Instrument::Cello,
        Instrument::Bass,
    ];

    /// Standard tuning string names, lowest string first.
    pub fn string_names(self) -> [&'static str; 4] {
        match self {
            Instrument::Violin => ["G3", "D4", "A4", "E5"],
            Instrument::Viola => ["C3", "G3", "D4", "A4"],
            Instrument::Cello => ["C2", "G2", "D3", "A3"],
            Instrument::Bass => ["E1", "A1", "D2", "G2"],
        }
    }

    /// Open strings of this instrument from the precomputed table.
    pub fn strings(self) -> &'static [OpenString] {
        INSTRUMENT_TABLE
            .get(&self)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Looks up the open-string frequency by string name (e.g. "A4").
    pub fn open_string_frequency(self, string_name: &str) -> Option<f64> {
        self.strings()
            .iter()
            .find(|s| s.name == string_name)
            .map(|s| s.frequency)
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Instrument::Violin => "violin",
            Instrument::Viola => "viola",
            Instrument::Cello => "cello",
            Instrument::Bass => "bass",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown instrument '{0}'")]
pub struct UnknownInstrument(pub String);

impl FromStr for Instrument {
    type Err = UnknownInstrument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Instrument::ALL
            .into_iter()
            .find(|instrument| instrument.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownInstrument(s.to_string()))
    }
}

/// A single open string: its name and frequency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenString {
    pub name: &'static str,
    pub frequency: f64,
}

/// Statically computed open-string frequencies for every instrument.
///
/// Built on first access and read-only afterwards.
static INSTRUMENT_TABLE: Lazy<BTreeMap<Instrument, Vec<OpenString>>> = Lazy::new(|| {
    Instrument::ALL
        .into_iter()
        .map(|instrument| {
            let strings = instrument
                .string_names()
                .into_iter()
                .map(|name| OpenString {
                    name,
                    frequency: frequency_from_note_name(name).unwrap_or(FALLBACK_BASE_FREQUENCY),
                })
                .collect();
            (instrument, strings)
        })
        .collect()
});

/// Returns the read-only instrument table.
pub fn instrument_table() -> &'static BTreeMap<Instrument, Vec<OpenString>> {
    &INSTRUMENT_TABLE
}

/// Open-string frequency for an instrument/string pair, falling back to G3.
pub fn base_frequency_or_fallback(instrument: Instrument, string_name: &str) -> f64 {
    instrument
        .open_string_frequency(string_name)
        .unwrap_or_else(|| {
            tracing::warn!(
                %instrument,
                string_name,
                fallback = FALLBACK_BASE_FREQUENCY,
                "no open-string frequency, using fallback"
            );
            FALLBACK_BASE_FREQUENCY
        })
}
