//! # Cent Meter Widget
//!
//! Shows how far a touch point sits from the nearest fret, in cents.
//! The needle is color-coded: green when the fret is practically exact,
//! yellow for a small finger shift, red for a large one.

use iced::widget::canvas::{self, Geometry, Path, Stroke};
use iced::widget::container;
use iced::{Color, Element, Point, Rectangle, Renderer, Size, Theme, mouse};

/// The meter shows deviations from -50 to +50 cents.
const METER_RANGE: f32 = 50.0;

/// Cents gauge for the position guide.
pub struct CentMeter {
    /// Adjustment from the nearest fret (None if nothing is selected)
    cents: Option<f32>,
}

impl CentMeter {
    pub fn new(cents: Option<f64>) -> Self {
        Self {
            cents: cents.map(|c| c as f32),
        }
    }

    pub fn view(self) -> Element<'static, crate::Message> {
        container(
            canvas::Canvas::new(self)
                .width(iced::Length::Fill)
                .height(iced::Length::Fixed(24.0)),
        )
        .into()
    }
}

impl<Message> canvas::Program<Message> for CentMeter {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let background = Path::rectangle(Point::ORIGIN, bounds.size());
        frame.fill(&background, Color::from_rgb8(0x40, 0x40, 0x40));

        // Fret line
        let center_x = bounds.width / 2.0;
        let center_line = Path::line(
            Point::new(center_x, 0.0),
            Point::new(center_x, bounds.height),
        );
        frame.stroke(
            &center_line,
            Stroke::default().with_width(2.0).with_color(Color::WHITE),
        );

        if let Some(c) = self.cents {
            let clamped_cents = c.clamp(-METER_RANGE, METER_RANGE);
            let needle_pos = (clamped_cents + METER_RANGE) / (2.0 * METER_RANGE) * bounds.width;

            let color = if c.abs() < 5.0 {
                Color::from_rgb8(0x34, 0xDB, 0x98)
            } else if c.abs() < 20.0 {
                Color::from_rgb8(0xFF, 0xC3, 0x00)
            } else {
                Color::from_rgb8(0xFF, 0x33, 0x33)
            };

            let needle =
                Path::rectangle(Point::new(needle_pos - 2.0, 0.0), Size::new(4.0, bounds.height));
            frame.fill(&needle, color);
        }

        vec![frame.into_geometry()]
    }
}
