//! # Session State Module
//!
//! An immutable snapshot of everything the performer has selected, and a pure
//! reducer that produces the next snapshot from a UI action. The frontend owns
//! the current snapshot; the music math reads it and never mutates it.
//!
//! ## Play-mode transitions
//! - `Off -> Natural` when play is toggled with an open stop
//! - `Off -> Artificial` when play is toggled with a non-zero stop
//! - any playing mode `-> Off` when play is toggled again
//! - `Artificial -> Off` as soon as the stop is returned to zero
//!
//! The stop cannot be edited during natural playback, and a non-zero stop
//! resets the natural harmonic to the fundamental.

use serde::{Deserialize, Serialize};

use crate::artificial::{
    ARTIFICIAL_HARMONIC_COUNT, ArtificialHarmonic, InputMode, StopInput, TouchPosition,
    artificial_harmonic_touch_positions, artificial_harmonics, stop_position,
};
use crate::natural::{MAX_HARMONIC, NaturalHarmonic, PositionGuide, natural_harmonic, position_guide};
use crate::tuning::{FALLBACK_BASE_FREQUENCY, Instrument, base_frequency_or_fallback};

/// What the string is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayMode {
    #[default]
    Off,
    Natural,
    Artificial,
}

/// A user interaction, fed to [`HarmonicState::apply`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    SelectInstrument(Instrument),
    SelectString(usize),
    NextHarmonic,
    PreviousHarmonic,
    ResetHarmonic,
    SelectNode(f64),
    SetInputMode(InputMode),
    SetStopFret(i32),
    SetStopCents(i32),
    SelectArtificial(usize),
    TogglePlay,
}

/// The performer's current selections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonicState {
    pub instrument: Instrument,
    /// Index into the instrument's strings, lowest string first
    pub string_index: usize,
    /// Natural harmonic number, 1..=16
    pub harmonic_number: u32,
    /// Node position chosen for the position guide
    pub selected_node: Option<f64>,
    pub stop: StopInput,
    /// Selected artificial harmonic, 0..8
    pub artificial_index: usize,
    pub play_mode: PlayMode,
}

impl Default for HarmonicState {
    fn default() -> Self {
        Self {
            instrument: Instrument::Violin,
            string_index: 0,
            harmonic_number: 1,
            selected_node: None,
            stop: StopInput::default(),
            artificial_index: 0,
            play_mode: PlayMode::Off,
        }
    }
}

impl HarmonicState {
    /// Produces the state that follows `action`.
    ///
    /// Out-of-range selections leave the state unchanged.
    pub fn apply(&self, action: Action) -> HarmonicState {
        let mut next = self.clone();

        match action {
            Action::SelectInstrument(instrument) => {
                next.instrument = instrument;
                next.string_index = 0;
            }
            Action::SelectString(index) => {
                if index < next.instrument.strings().len() {
                    next.string_index = index;
                } else {
                    tracing::debug!(index, instrument = %next.instrument, "ignoring unknown string");
                }
            }
            Action::NextHarmonic => {
                if next.harmonic_number < MAX_HARMONIC {
                    next.harmonic_number += 1;
                    next.selected_node = None;
                }
            }
            Action::PreviousHarmonic => {
                if next.harmonic_number > 1 {
                    next.harmonic_number -= 1;
                    next.selected_node = None;
                }
            }
            Action::ResetHarmonic => {
                next.harmonic_number = 1;
                next.selected_node = None;
            }
            Action::SelectNode(position) => {
                next.selected_node = Some(position);
            }
            Action::SetInputMode(_) | Action::SetStopFret(_) | Action::SetStopCents(_)
                if next.play_mode == PlayMode::Natural =>
            {
                tracing::debug!(?action, "stop is locked during natural playback");
            }
            Action::SetInputMode(mode) => {
                if mode != next.stop.mode() {
                    next.stop = StopInput::open(mode);
                }
            }
            Action::SetStopFret(fret) => next.set_stop(StopInput::Fret(fret)),
            Action::SetStopCents(cents) => next.set_stop(StopInput::Cents(cents)),
            Action::SelectArtificial(index) => {
                if index < ARTIFICIAL_HARMONIC_COUNT {
                    next.artificial_index = index;
                }
            }
            Action::TogglePlay => {
                next.play_mode = match next.play_mode {
                    PlayMode::Off if next.stop.is_open() => PlayMode::Natural,
                    PlayMode::Off => PlayMode::Artificial,
                    PlayMode::Natural | PlayMode::Artificial => PlayMode::Off,
                };
            }
        }

        if next.play_mode == PlayMode::Artificial && next.stop.is_open() {
            tracing::debug!("stop returned to the open string, leaving artificial mode");
            next.play_mode = PlayMode::Off;
        }

        if next.play_mode != self.play_mode {
            tracing::info!(from = ?self.play_mode, to = ?next.play_mode, "play mode changed");
        }

        next
    }

    /// A stopped string has no natural harmonic selection, so a non-zero
    /// stop resets the navigator to the fundamental.
    fn set_stop(&mut self, stop: StopInput) {
        self.stop = stop;
        if !stop.is_open() {
            self.harmonic_number = 1;
            self.selected_node = None;
        }
    }

    /// Name of the selected string, e.g. "G3".
    pub fn string_name(&self) -> Option<&'static str> {
        self.instrument
            .strings()
            .get(self.string_index)
            .map(|s| s.name)
    }

    /// Open-string frequency of the selected string (196 Hz if unavailable).
    pub fn base_frequency(&self) -> f64 {
        match self.string_name() {
            Some(name) => base_frequency_or_fallback(self.instrument, name),
            None => FALLBACK_BASE_FREQUENCY,
        }
    }

    pub fn natural(&self) -> NaturalHarmonic {
        natural_harmonic(self.base_frequency(), self.harmonic_number)
    }

    pub fn artificial(&self) -> Vec<ArtificialHarmonic> {
        artificial_harmonics(self.base_frequency(), self.stop)
    }

    pub fn touch_positions(&self) -> Vec<TouchPosition> {
        artificial_harmonic_touch_positions(self.stop)
    }

    pub fn stop_position(&self) -> f64 {
        stop_position(self.stop)
    }

    /// Position guide for the selected node, if any.
    pub fn selected_guide(&self) -> Option<PositionGuide> {
        self.selected_node
            .map(|position| position_guide(position, self.base_frequency()))
    }

    /// Frequency the tone player should sound, or `None` when silent.
    pub fn sounding_frequency(&self) -> Option<f64> {
        match self.play_mode {
            PlayMode::Off => None,
            PlayMode::Natural => Some(self.base_frequency() * self.harmonic_number as f64),
            PlayMode::Artificial => self
                .artificial()
                .get(self.artificial_index)
                .map(|h| h.result_frequency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(actions: &[Action]) -> HarmonicState {
        actions
            .iter()
            .fold(HarmonicState::default(), |state, &action| state.apply(action))
    }

    #[test]
    fn starts_silent_on_the_violin_g_string() {
        let state = HarmonicState::default();
        assert_eq!(state.play_mode, PlayMode::Off);
        assert_eq!(state.string_name(), Some("G3"));
        assert_eq!(state.sounding_frequency(), None);
    }

    #[test]
    fn toggle_without_stop_plays_natural() {
        let state = run(&[Action::NextHarmonic, Action::TogglePlay]);
        assert_eq!(state.play_mode, PlayMode::Natural);
        assert_eq!(state.sounding_frequency(), Some(state.base_frequency() * 2.0));

        let state = state.apply(Action::TogglePlay);
        assert_eq!(state.play_mode, PlayMode::Off);
    }

    #[test]
    fn toggle_with_stop_plays_artificial() {
        let state = run(&[
            Action::SetStopFret(12),
            Action::SelectArtificial(1),
            Action::TogglePlay,
        ]);
        assert_eq!(state.play_mode, PlayMode::Artificial);
        let expected = state.base_frequency() * 4.0;
        let sounding = state.sounding_frequency().unwrap();
        assert!((sounding - expected).abs() < 1e-9);

        assert_eq!(state.apply(Action::TogglePlay).play_mode, PlayMode::Off);
    }

    #[test]
    fn zeroing_the_stop_forces_off() {
        let playing = run(&[Action::SetStopCents(250), Action::TogglePlay]);
        assert_eq!(playing.play_mode, PlayMode::Artificial);

        let stopped = playing.apply(Action::SetStopCents(0));
        assert_eq!(stopped.play_mode, PlayMode::Off);
        assert_eq!(stopped.sounding_frequency(), None);
    }

    #[test]
    fn switching_input_mode_clears_the_stop() {
        let playing = run(&[Action::SetStopFret(5), Action::TogglePlay]);
        let switched = playing.apply(Action::SetInputMode(InputMode::Cents));
        assert_eq!(switched.stop, StopInput::Cents(0));
        assert_eq!(switched.play_mode, PlayMode::Off);

        let same = playing.apply(Action::SetInputMode(InputMode::Fret));
        assert_eq!(same.stop, StopInput::Fret(5));
    }

    #[test]
    fn natural_playback_locks_the_stop() {
        let playing = run(&[Action::NextHarmonic, Action::TogglePlay]);
        assert_eq!(playing.play_mode, PlayMode::Natural);

        for action in [
            Action::SetStopFret(5),
            Action::SetStopCents(250),
            Action::SetInputMode(InputMode::Cents),
        ] {
            assert_eq!(playing.apply(action), playing);
        }

        let stopped = playing.apply(Action::TogglePlay).apply(Action::SetStopFret(5));
        assert_eq!(stopped.stop, StopInput::Fret(5));
    }

    #[test]
    fn stopping_the_string_resets_the_natural_selection() {
        let state = run(&[
            Action::NextHarmonic,
            Action::NextHarmonic,
            Action::SelectNode(1.0 / 3.0),
            Action::SetStopFret(5),
        ]);
        assert_eq!(state.harmonic_number, 1);
        assert_eq!(state.selected_node, None);

        let state = run(&[Action::NextHarmonic, Action::SetStopCents(150)]);
        assert_eq!(state.harmonic_number, 1);
    }

    #[test]
    fn zero_stop_keeps_the_natural_selection() {
        let state = run(&[
            Action::NextHarmonic,
            Action::SelectNode(0.5),
            Action::SetStopFret(0),
        ]);
        assert_eq!(state.harmonic_number, 2);
        assert_eq!(state.selected_node, Some(0.5));
    }

    #[test]
    fn harmonic_navigation_is_clamped_and_clears_node() {
        let state = run(&[Action::PreviousHarmonic]);
        assert_eq!(state.harmonic_number, 1);

        let mut state = run(&[Action::NextHarmonic, Action::SelectNode(0.5)]);
        assert_eq!(state.selected_node, Some(0.5));
        for _ in 0..40 {
            state = state.apply(Action::NextHarmonic);
        }
        assert_eq!(state.harmonic_number, MAX_HARMONIC);
        assert_eq!(state.selected_node, None);

        let reset = state.apply(Action::ResetHarmonic);
        assert_eq!(reset.harmonic_number, 1);
    }

    #[test]
    fn changing_instrument_selects_its_lowest_string() {
        let state = run(&[Action::SelectString(2), Action::SelectInstrument(Instrument::Cello)]);
        assert_eq!(state.string_index, 0);
        assert_eq!(state.string_name(), Some("C2"));
    }

    #[test]
    fn out_of_range_selections_are_ignored() {
        let state = run(&[Action::SelectString(9), Action::SelectArtificial(8)]);
        assert_eq!(state, HarmonicState::default());
    }

    #[test]
    fn apply_leaves_the_previous_snapshot_untouched() {
        let before = HarmonicState::default();
        let after = before.apply(Action::SetStopFret(3));
        assert_eq!(before.stop, StopInput::Fret(0));
        assert_eq!(after.stop, StopInput::Fret(3));
    }

    #[test]
    fn selected_guide_follows_the_node() {
        let state = run(&[Action::NextHarmonic, Action::SelectNode(0.5)]);
        let guide = state.selected_guide().unwrap();
        assert_eq!(guide.fret, 12);
        assert_eq!(guide.fret_note.name, "G4");
    }
}
