//! # String View Widget
//!
//! Draws the string from nut (left) to bridge (right) with its fret lines,
//! the vibrating shape of the current harmonic, and clickable markers for
//! natural-harmonic nodes and artificial-harmonic touch points.
//!
//! ## Features
//! - Equal-tempered fret lines labeled with the pitch they sound
//! - Animated standing wave for natural and artificial harmonics
//! - Click a node to get its position guide, or a touch point to select it

use harmonicviz_core::HarmonicState;
use harmonicviz_core::artificial::TouchPosition;
use harmonicviz_core::fret::{DISPLAY_FRET_COUNT, FretMarker, fret_markers};
use harmonicviz_core::natural::HarmonicPosition;
use harmonicviz_core::vibration::displacement;
use iced::widget::canvas::{self, Event, Geometry, Path, Stroke, Text, event};
use iced::widget::container;
use iced::{Color, Element, Point, Rectangle, Renderer, Size, Theme, mouse};

use crate::DisplaySettings;

/// Horizontal gap between the widget edge and the nut/bridge.
const STRING_MARGIN: f32 = 40.0;
/// Number of straight segments used to draw the string.
const SEGMENTS: usize = 100;
/// Only the lower frets get a note label; higher ones are too close together.
const LABELED_FRETS: usize = 24;
const MARKER_RADIUS: f32 = 7.0;
const HIT_RADIUS: f32 = 10.0;
const VIEW_HEIGHT: f32 = 150.0;

/// Interactive picture of the string.
pub struct StringView {
    frets: Vec<FretMarker>,
    nodes: Vec<HarmonicPosition>,
    touches: Vec<TouchPosition>,
    stop_position: f64,
    selected_node: Option<f64>,
    artificial_index: usize,
    /// String displacement at `SEGMENTS + 1` evenly spaced points, in pixels
    samples: Vec<f32>,
}

impl StringView {
    pub fn new(state: &HarmonicState, display: &DisplaySettings) -> Self {
        let frets = if display.show_frets {
            fret_markers(state.base_frequency(), DISPLAY_FRET_COUNT)
        } else {
            Vec::new()
        };

        // Node markers only make sense on the unstopped string
        let nodes = if state.stop.is_open() {
            state.natural().nodes
        } else {
            Vec::new()
        };

        let samples = (0..=SEGMENTS)
            .map(|i| {
                let x = i as f64 / SEGMENTS as f64;
                displacement(state, x, display.string_amplitude, display.animation_phase) as f32
            })
            .collect();

        Self {
            frets,
            nodes,
            touches: state.touch_positions(),
            stop_position: state.stop_position(),
            selected_node: state.selected_node,
            artificial_index: state.artificial_index,
            samples,
        }
    }

    pub fn view(self) -> Element<'static, crate::Message> {
        container(
            canvas::Canvas::new(self)
                .width(iced::Length::Fill)
                .height(iced::Length::Fixed(VIEW_HEIGHT)),
        )
        .into()
    }

    fn x_for(bounds: Size, position: f64) -> f32 {
        STRING_MARGIN + position as f32 * (bounds.width - 2.0 * STRING_MARGIN)
    }

    /// Finds the marker under the cursor, touch points first.
    fn marker_at(&self, bounds: Size, pos: Point) -> Option<crate::Message> {
        if (pos.y - bounds.height / 2.0).abs() > HIT_RADIUS {
            return None;
        }
        let distance = |position: f64| (Self::x_for(bounds, position) - pos.x).abs();

        let touch = self
            .touches
            .iter()
            .filter(|t| distance(t.position) <= HIT_RADIUS)
            .min_by(|a, b| distance(a.position).total_cmp(&distance(b.position)));
        if let Some(touch) = touch {
            return Some(crate::Message::ArtificialSelected(touch.number as usize - 1));
        }

        self.nodes
            .iter()
            .filter(|n| distance(n.position) <= HIT_RADIUS)
            .min_by(|a, b| distance(a.position).total_cmp(&distance(b.position)))
            .map(|n| crate::Message::NodeSelected(n.position))
    }

    fn label(content: String, position: Point, color: Color, size: f32) -> Text {
        Text {
            content,
            position,
            color,
            size: size.into(),
            horizontal_alignment: iced::alignment::Horizontal::Center,
            vertical_alignment: iced::alignment::Vertical::Center,
            ..Text::default()
        }
    }
}

impl canvas::Program<crate::Message> for StringView {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<crate::Message>) {
        if let Some(position) = cursor.position_in(bounds) {
            if let Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event {
                if let Some(message) = self.marker_at(bounds.size(), position) {
                    return (event::Status::Captured, Some(message));
                }
            }
        }
        (event::Status::Ignored, None)
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let palette = theme.palette();
        let size = bounds.size();
        let string_y = size.height / 2.0;
        let muted = Color { a: 0.3, ..palette.text };
        let idle_marker = Color::from_rgb8(0x60, 0x60, 0x60);

        // Fret lines, labels alternating below and above the string
        for (i, marker) in self.frets.iter().enumerate() {
            let x = Self::x_for(size, marker.position);
            let line = Path::line(
                Point::new(x, size.height * 0.2),
                Point::new(x, size.height * 0.8),
            );
            frame.stroke(&line, Stroke::default().with_width(1.0).with_color(muted));

            if i < LABELED_FRETS {
                let y = if i % 2 == 0 { size.height * 0.93 } else { size.height * 0.12 };
                frame.fill_text(Self::label(
                    marker.note.pitch_class().to_string(),
                    Point::new(x, y),
                    palette.text,
                    8.0,
                ));
            }
        }

        // The string itself
        let string_path = Path::new(|builder| {
            for (i, offset) in self.samples.iter().enumerate() {
                let x = Self::x_for(size, i as f64 / SEGMENTS as f64);
                let point = Point::new(x, string_y + offset);
                if i == 0 {
                    builder.move_to(point);
                } else {
                    builder.line_to(point);
                }
            }
        });
        frame.stroke(
            &string_path,
            Stroke::default().with_width(3.0).with_color(palette.primary),
        );

        // Stopping finger
        if self.stop_position > 0.0 {
            let x = Self::x_for(size, self.stop_position);
            let stop = Path::rectangle(Point::new(x - 3.0, string_y - 12.0), Size::new(6.0, 24.0));
            frame.fill(&stop, palette.text);
        }

        // Natural harmonic nodes
        for node in &self.nodes {
            let x = Self::x_for(size, node.position);
            let color = if self.selected_node == Some(node.position) {
                palette.danger
            } else {
                idle_marker
            };
            frame.fill(&Path::circle(Point::new(x, string_y), MARKER_RADIUS), color);
            frame.fill_text(Self::label(
                format!("{}/{}", node.numerator, node.denominator),
                Point::new(x, size.height * 0.3),
                palette.text,
                10.0,
            ));
        }

        // Artificial harmonic touch points
        for touch in &self.touches {
            let x = Self::x_for(size, touch.position);
            let selected = touch.number as usize == self.artificial_index + 1;
            let color = if selected { palette.success } else { idle_marker };
            frame.fill(&Path::circle(Point::new(x, string_y), MARKER_RADIUS), color);
            frame.fill_text(Self::label(
                touch.number.to_string(),
                Point::new(x, size.height * 0.3),
                palette.text,
                10.0,
            ));
        }

        vec![frame.into_geometry()]
    }
}
