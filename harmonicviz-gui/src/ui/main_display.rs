//! # Main Display Module
//!
//! Layout and panels of the HarmonicViz window. Every panel is built from the
//! current `HarmonicState` snapshot; nothing here computes music math itself.

use harmonicviz_core::artificial::{ArtificialDifficulty, ArtificialHarmonic};
use harmonicviz_core::natural::{Adjustment, NaturalDifficulty};
use harmonicviz_core::{HarmonicState, InputMode, Instrument, PlayMode, StopInput};
use iced::widget::{Column, Row, Space, button, column, container, horizontal_space, row, slider, text};
use iced::{Alignment, Background, Border, Color, Element, Length};

use crate::widgets::{cent_meter::CentMeter, string_view::StringView};
use crate::{DisplaySettings, Message};

/// Artificial harmonic cards per row.
const CARDS_PER_ROW: usize = 4;
/// Highest fret offered by the stop slider.
const MAX_STOP_FRET: i32 = 12;
/// Highest cents value offered by the stop slider.
const MAX_STOP_CENTS: i32 = 1200;

const EASY: Color = Color::from_rgb(0.2, 0.6, 0.3);
const MEDIUM: Color = Color::from_rgb(0.75, 0.6, 0.1);
const HARD: Color = Color::from_rgb(0.75, 0.2, 0.2);
const UNREACHABLE: Color = Color::from_rgb(0.4, 0.4, 0.4);

/// Creates the complete main application view.
pub fn create_main_view(
    state: &HarmonicState,
    display: &DisplaySettings,
) -> Element<'static, Message> {
    let title = text("HarmonicViz").size(28);

    let mut content = column![
        row![title, horizontal_space(), create_controls(state, display)].align_y(Alignment::Center),
        create_instrument_panel(state),
    ]
    .spacing(15);

    if display.show_visualization {
        content = content.push(panel("String Visualization", StringView::new(state, display).view()));
    }

    let mut harmonic_panels = row![create_natural_panel(state)].align_y(Alignment::Start);
    // The stop stays put while a natural harmonic is sounding
    if state.play_mode != PlayMode::Natural {
        harmonic_panels = harmonic_panels
            .push(Space::with_width(10))
            .push(create_artificial_panel(state));
    }

    container(content.push(harmonic_panels).padding(20))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Wraps a panel body with a heading.
fn panel(title: &'static str, body: Element<'static, Message>) -> Element<'static, Message> {
    container(
        column![text(title).size(18), Space::with_height(10), body]
            .spacing(5)
            .padding(15),
    )
    .width(Length::Fill)
    .into()
}

/// A button rendered as primary when `active`, secondary otherwise.
fn toggle_button(label: String, active: bool, message: Message) -> Element<'static, Message> {
    let style = if active { button::primary } else { button::secondary };
    button(text(label).size(14))
        .padding([6, 10])
        .style(style)
        .on_press(message)
        .into()
}

/// A small colored label.
fn badge(label: &'static str, color: Color) -> Element<'static, Message> {
    container(text(label).size(12))
        .padding([2, 8])
        .style(move |_theme| container::Style {
            background: Some(Background::Color(color)),
            text_color: Some(Color::WHITE),
            border: Border {
                radius: 4.0.into(),
                ..Border::default()
            },
            ..container::Style::default()
        })
        .into()
}

/// Play / visualize / frets buttons.
fn create_controls(state: &HarmonicState, display: &DisplaySettings) -> Element<'static, Message> {
    let play_label = match state.play_mode {
        PlayMode::Off => "Play",
        PlayMode::Natural => "Playing Natural",
        PlayMode::Artificial => "Playing Artificial",
    };
    let frets_label = if display.show_frets { "Frets: ON" } else { "Frets: OFF" };

    row![
        toggle_button(play_label.to_string(), state.play_mode != PlayMode::Off, Message::TogglePlay),
        toggle_button("Visualize".to_string(), display.show_visualization, Message::ToggleVisualize),
        toggle_button(frets_label.to_string(), display.show_frets, Message::ToggleFrets),
    ]
    .spacing(8)
    .into()
}

/// Instrument and string selectors.
fn create_instrument_panel(state: &HarmonicState) -> Element<'static, Message> {
    let instruments = Instrument::ALL.into_iter().fold(row![].spacing(8), |r, instrument| {
        r.push(toggle_button(
            capitalize(&instrument.to_string()),
            instrument == state.instrument,
            Message::InstrumentSelected(instrument),
        ))
    });

    let strings = state
        .instrument
        .strings()
        .iter()
        .enumerate()
        .fold(row![].spacing(8), |r, (i, open_string)| {
            r.push(toggle_button(
                format!("{} ({:.2} Hz)", open_string.name, open_string.frequency),
                i == state.string_index,
                Message::StringSelected(i),
            ))
        });

    column![
        row![text("Instrument").size(14).width(Length::Fixed(90.0)), instruments]
            .align_y(Alignment::Center),
        row![text("String").size(14).width(Length::Fixed(90.0)), strings].align_y(Alignment::Center),
    ]
    .spacing(8)
    .into()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn natural_badge(difficulty: NaturalDifficulty) -> Element<'static, Message> {
    let color = match difficulty {
        NaturalDifficulty::Easy => EASY,
        NaturalDifficulty::Medium => MEDIUM,
        NaturalDifficulty::Hard => HARD,
    };
    badge(difficulty.label(), color)
}

fn artificial_badge(difficulty: ArtificialDifficulty) -> Element<'static, Message> {
    let color = match difficulty {
        ArtificialDifficulty::Easy => EASY,
        ArtificialDifficulty::Medium => MEDIUM,
        ArtificialDifficulty::Hard => HARD,
        ArtificialDifficulty::Unreachable => UNREACHABLE,
    };
    badge(difficulty.label(), color)
}

/// Natural harmonic navigator, result pitch, nodes and position guide.
fn create_natural_panel(state: &HarmonicState) -> Element<'static, Message> {
    let harmonic = state.natural();
    let n = harmonic.number;

    let navigator = row![
        button(text("<")).on_press_maybe((n > 1).then_some(Message::PreviousHarmonic)),
        button(text("Reset")).on_press(Message::ResetHarmonic),
        button(text(">")).on_press_maybe(
            (n < harmonicviz_core::natural::MAX_HARMONIC).then_some(Message::NextHarmonic)
        ),
    ]
    .spacing(6);

    let heading = row![
        text(format!("Harmonic #{}: {}", n, harmonic.name.unwrap_or("--"))).size(16),
        horizontal_space(),
        natural_badge(harmonic.difficulty),
    ]
    .align_y(Alignment::Center);

    let mut result = format!(
        "Result: {} ({:.2} Hz)",
        harmonic.result.name, harmonic.result.frequency
    );
    if harmonic.result.cents.abs() > 0.01 {
        result.push_str(&format!(" {:+.2} cents", harmonic.result.cents));
    }

    let mut body = column![navigator, heading, text(result).size(14)].spacing(10);

    if n == 1 {
        body = body.push(text("Play the open string (no finger placement needed)").size(14));
    } else {
        let nodes = harmonic.nodes.iter().fold(row![].spacing(6), |r, node| {
            r.push(toggle_button(
                format!("{}/{}", node.numerator, node.denominator),
                state.selected_node == Some(node.position),
                Message::NodeSelected(node.position),
            ))
        });
        body = body.push(text("Touch the string lightly at:").size(14)).push(nodes);

        if let Some(guide) = state.selected_guide() {
            let nearest = if guide.fret == 0 {
                format!("Nearest: Open string ({})", guide.fret_note.name)
            } else {
                format!("Nearest: Fret {} ({})", guide.fret, guide.fret_note.name)
            };
            let adjustment = match guide.adjustment {
                Adjustment::Exact => "Adjustment: Exact".to_string(),
                Adjustment::Higher(c) => format!("Adjustment: Play {:.2} cents higher", c),
                Adjustment::Lower(c) => format!("Adjustment: Play {:.2} cents lower", c),
            };
            body = body.push(
                column![
                    text("Position Guide").size(14),
                    text(nearest).size(13),
                    text(adjustment).size(13),
                    CentMeter::new(Some(guide.cents)).view(),
                ]
                .spacing(4),
            );
        }
    }

    container(panel("Natural Harmonics", body.into()))
        .width(Length::FillPortion(1))
        .into()
}

/// Stop input controls and the eight artificial harmonic cards.
fn create_artificial_panel(state: &HarmonicState) -> Element<'static, Message> {
    let mode = state.stop.mode();
    let mode_buttons = [InputMode::Fret, InputMode::Cents]
        .into_iter()
        .fold(row![].spacing(8), |r, m| {
            r.push(toggle_button(m.to_string(), m == mode, Message::InputModeSelected(m)))
        });

    let stop_control: Element<'static, Message> = match state.stop {
        StopInput::Fret(fret) => {
            let caption = if fret <= 0 {
                "Natural Harmonic!".to_string()
            } else {
                format!("{} cents", fret * 100)
            };
            column![
                text(format!("Stop Position (Fret: 0-{MAX_STOP_FRET}): {fret}")).size(14),
                slider(0..=MAX_STOP_FRET, fret.clamp(0, MAX_STOP_FRET), Message::StopFretChanged),
                text(caption).size(13),
            ]
            .spacing(6)
            .into()
        }
        StopInput::Cents(cents) => {
            let caption = if cents <= 0 {
                "Natural Harmonic!".to_string()
            } else {
                format!("{:.2} frets", cents as f64 / 100.0)
            };
            column![
                text(format!("Stop Position (Cents: 0-{MAX_STOP_CENTS}): {cents}")).size(14),
                slider(0..=MAX_STOP_CENTS, cents.clamp(0, MAX_STOP_CENTS), Message::StopCentsChanged),
                text(caption).size(13),
            ]
            .spacing(6)
            .into()
        }
    };

    let mut body = column![text("Stop Position Input Mode").size(14), mode_buttons, stop_control]
        .spacing(10);

    if !state.stop.is_open() {
        let harmonics = state.artificial();
        let grid = harmonics
            .chunks(CARDS_PER_ROW)
            .fold(Column::new().spacing(8), |grid, chunk| {
                let cards = chunk.iter().fold(Row::new().spacing(8), |r, harmonic| {
                    r.push(harmonic_card(harmonic, state.artificial_index))
                });
                grid.push(cards)
            });
        body = body.push(grid);

        if let Some(selected) = harmonics.get(state.artificial_index) {
            if selected.number != 1 {
                body = body.push(
                    column![
                        text(touch_description(selected)).size(13),
                        CentMeter::new(Some(selected.touch_cents)).view(),
                    ]
                    .spacing(4),
                );
            }
        }
    }

    container(panel("Artificial Harmonics", body.into()))
        .width(Length::FillPortion(1))
        .into()
}

fn touch_description(harmonic: &ArtificialHarmonic) -> String {
    let place = if harmonic.touch_fret == 0 {
        "Open".to_string()
    } else {
        format!("Fret {}", harmonic.touch_fret)
    };
    format!(
        "Touch: {} ({}), {:+.2} cents",
        place, harmonic.touch_note.name, harmonic.touch_cents
    )
}

/// One selectable artificial harmonic.
fn harmonic_card(harmonic: &ArtificialHarmonic, selected_index: usize) -> Element<'static, Message> {
    let index = harmonic.number as usize - 1;
    let card = column![
        row![
            text(format!("#{}", harmonic.number)).size(14),
            horizontal_space(),
            artificial_badge(harmonic.difficulty),
        ]
        .align_y(Alignment::Center),
        text(harmonic.name).size(11),
        text(format!(
            "{} ({:.0}Hz)",
            harmonic.result_note.name, harmonic.result_frequency
        ))
        .size(12),
    ]
    .spacing(4)
    .width(Length::Fixed(150.0));

    let style = if index == selected_index { button::primary } else { button::secondary };
    button(card)
        .padding(8)
        .style(style)
        .on_press(Message::ArtificialSelected(index))
        .into()
}
