// harmonicviz-core/src/lib.rs

//! The music-math core of the string harmonics visualizer.
//! This crate names pitches, locates harmonic nodes and frets, and derives
//! artificial harmonics for the bowed string family. It is completely
//! headless, keeps no mutable state, and contains no GUI or audio code.

pub mod artificial;
pub mod fret;
pub mod natural;
pub mod note;
pub mod session;
pub mod tuning;
pub mod vibration;

pub use artificial::{
    ArtificialDifficulty, ArtificialHarmonic, InputMode, StopInput, TouchPosition,
    artificial_harmonic_touch_positions, artificial_harmonics, stop_position,
    stop_position_from_input, stopped_frequency,
};
pub use fret::{FretPosition, frequency_at_fret, position_to_fret};
pub use natural::{HarmonicPosition, harmonic_nodes};
pub use note::{Note, note_from_frequency};
pub use session::{Action, HarmonicState, PlayMode};
pub use tuning::{Instrument, NoteNameError, frequency_from_note_name, instrument_table};
