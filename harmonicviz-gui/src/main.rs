//! # HarmonicViz - String Harmonics Explorer
//!
//! The desktop frontend for the harmonics core. It lets a string player pick
//! an instrument and string, browse natural harmonics and their nodes, set a
//! stop for artificial harmonics, hear the result and watch the string vibrate.
//!
//! ## Architecture
//! - **Main Thread**: Iced GUI application with dark theme
//! - **Tone Thread**: Dedicated thread owning the audio output stream
//! - **State**: An immutable `HarmonicState` snapshot replaced through the core reducer
//! - **Updates**: Timer subscription drives the string animation while playing

mod config;
mod tone;
mod ui;
mod widgets;

use harmonicviz_core::{Action, HarmonicState, InputMode, Instrument, PlayMode};
use iced::{Element, Subscription, Theme};
use tracing_subscriber::EnvFilter;

use config::GuiConfig;
use tone::TonePlayer;
use ui::main_display::create_main_view;

/// Phase advance of the string animation per tick, in radians.
const ANIMATION_STEP: f64 = 0.1;

/// Main entry point for the HarmonicViz application.
pub fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("harmonicviz_gui=info,harmonicviz_core=info")),
        )
        .init();

    tracing::info!("starting HarmonicViz");
    let result = iced::application("HarmonicViz", HarmonicApp::update, HarmonicApp::view)
        .subscription(HarmonicApp::subscription)
        .theme(HarmonicApp::theme)
        .run();
    tracing::info!(?result, "application finished");
    result
}

/// Application message types for the Iced GUI framework.
#[derive(Debug, Clone)]
pub enum Message {
    // Instrument and string selection
    InstrumentSelected(Instrument),
    StringSelected(usize),

    // Natural harmonic navigation
    NextHarmonic,
    PreviousHarmonic,
    ResetHarmonic,
    NodeSelected(f64),

    // Artificial harmonic stop and selection
    InputModeSelected(InputMode),
    StopFretChanged(i32),
    StopCentsChanged(i32),
    ArtificialSelected(usize),

    // Playback and display toggles
    TogglePlay,
    ToggleVisualize,
    ToggleFrets,

    // Animation timer
    Tick,
}

impl Message {
    /// The core action this message maps to, if it changes the harmonic state.
    fn action(&self) -> Option<Action> {
        let action = match *self {
            Message::InstrumentSelected(instrument) => Action::SelectInstrument(instrument),
            Message::StringSelected(index) => Action::SelectString(index),
            Message::NextHarmonic => Action::NextHarmonic,
            Message::PreviousHarmonic => Action::PreviousHarmonic,
            Message::ResetHarmonic => Action::ResetHarmonic,
            Message::NodeSelected(position) => Action::SelectNode(position),
            Message::InputModeSelected(mode) => Action::SetInputMode(mode),
            Message::StopFretChanged(fret) => Action::SetStopFret(fret),
            Message::StopCentsChanged(cents) => Action::SetStopCents(cents),
            Message::ArtificialSelected(index) => Action::SelectArtificial(index),
            Message::TogglePlay => Action::TogglePlay,
            Message::ToggleVisualize | Message::ToggleFrets | Message::Tick => return None,
        };
        Some(action)
    }
}

/// Display-only settings that the music core does not care about.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    pub show_visualization: bool,
    pub show_frets: bool,
    /// Current animation phase in radians
    pub animation_phase: f64,
    pub string_amplitude: f64,
}

/// Main application state.
#[derive(Debug)]
struct HarmonicApp {
    config: GuiConfig,
    /// Single source of truth for the performer's selections
    state: HarmonicState,
    display: DisplaySettings,
    tone: TonePlayer,
}

impl Default for HarmonicApp {
    fn default() -> Self {
        let config = GuiConfig::from_env();
        tracing::debug!(?config, "creating HarmonicApp");
        let tone = TonePlayer::spawn(config.tone_gain, config.sample_rate);
        Self {
            display: DisplaySettings {
                show_visualization: true,
                show_frets: true,
                animation_phase: 0.0,
                string_amplitude: config.string_amplitude,
            },
            state: HarmonicState::default(),
            tone,
            config,
        }
    }
}

impl HarmonicApp {
    /// Handles application state updates based on incoming messages.
    ///
    /// Harmonic selections go through the core reducer; the tone player is
    /// retuned whenever the resulting state changes.
    fn update(&mut self, message: Message) {
        tracing::trace!(?message, "received message");

        if let Some(action) = message.action() {
            let next = self.state.apply(action);
            if next != self.state {
                self.state = next;
                self.sync_tone();
            }
            return;
        }

        match message {
            Message::ToggleVisualize => {
                self.display.show_visualization = !self.display.show_visualization;
            }
            Message::ToggleFrets => {
                self.display.show_frets = !self.display.show_frets;
            }
            Message::Tick => {
                self.display.animation_phase =
                    (self.display.animation_phase + ANIMATION_STEP) % std::f64::consts::TAU;
            }
            _ => {}
        }
    }

    /// Starts, retunes or silences the tone to match the current state.
    fn sync_tone(&self) {
        match self.state.sounding_frequency() {
            Some(frequency) => self.tone.play(frequency),
            None => self.tone.stop(),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        create_main_view(&self.state, &self.display)
    }

    /// Ticks the animation only while the string is sounding and visible.
    fn subscription(&self) -> Subscription<Message> {
        if self.state.play_mode != PlayMode::Off && self.display.show_visualization {
            iced::time::every(self.config.tick_interval).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}
