//! Standing-wave shapes used to draw the vibrating string.
//!
//! Positions are fractions of the full string (0 = nut, 1 = bridge).

use std::f64::consts::PI;

use crate::session::{HarmonicState, PlayMode};

/// Stops at or beyond this position leave no vibrating length to draw.
const MAX_DRAWN_STOP: f64 = 0.999;

/// Shape of the open string vibrating in harmonic `n`.
pub fn natural_envelope(x: f64, n: u32) -> f64 {
    (x * PI * n as f64).sin()
}

/// Shape of a string stopped at `stop` vibrating in harmonic `n` of the remaining length.
///
/// The part between the nut and the stop is silent.
pub fn artificial_envelope(x: f64, stop: f64, n: u32) -> f64 {
    if x < stop || stop >= MAX_DRAWN_STOP {
        return 0.0;
    }
    let along = (x - stop) / (1.0 - stop);
    (along * PI * n as f64).sin()
}

/// Displacement of the string at `x` for the current play mode.
///
/// `phase` is the animation phase in radians; `amplitude` scales the result.
pub fn displacement(state: &HarmonicState, x: f64, amplitude: f64, phase: f64) -> f64 {
    let envelope = match state.play_mode {
        PlayMode::Off => 0.0,
        PlayMode::Natural => natural_envelope(x, state.harmonic_number),
        PlayMode::Artificial => {
            artificial_envelope(x, state.stop_position(), state.artificial_index as u32 + 1)
        }
    };
    amplitude * envelope * phase.sin()
}
