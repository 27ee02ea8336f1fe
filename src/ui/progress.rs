/// Progress ring shown while the photo is being generated
use iced::widget::canvas::{self, path::Arc, Path, Stroke};
use iced::widget::text::Shaping;
use iced::{alignment, Color, Pixels, Point, Radians, Rectangle};

use crate::Message;

#[derive(Debug, Clone)]
pub struct ProgressRing {
    /// Percent complete, 0..=100
    pub percent: u8,
    pub accent: Color,
}

impl canvas::Program<Message> for ProgressRing {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let center = frame.center();
        let thickness = (bounds.width.min(bounds.height) * 0.08).max(4.0);
        let radius = bounds.width.min(bounds.height) / 2.0 - thickness;
        if radius <= 0.0 {
            return vec![frame.into_geometry()];
        }

        // Track
        frame.stroke(
            &Path::circle(center, radius),
            Stroke::default()
                .with_color(Color::from_rgba(1.0, 1.0, 1.0, 0.15))
                .with_width(thickness),
        );

        // Filled arc, clockwise from twelve o'clock
        if self.percent > 0 {
            let start = -std::f32::consts::FRAC_PI_2;
            let sweep = std::f32::consts::TAU * sweep_fraction(self.percent);
            let arc = Path::new(|builder| {
                builder.arc(Arc {
                    center,
                    radius,
                    start_angle: Radians(start),
                    end_angle: Radians(start + sweep),
                });
            });
            frame.stroke(
                &arc,
                Stroke::default().with_color(self.accent).with_width(thickness),
            );
        }

        frame.fill_text(canvas::Text {
            content: format!("{}%", self.percent),
            position: Point::new(center.x, center.y),
            size: Pixels(radius * 0.45),
            color: Color::WHITE,
            horizontal_alignment: alignment::Horizontal::Center,
            vertical_alignment: alignment::Vertical::Center,
            shaping: Shaping::Basic,
            ..canvas::Text::default()
        });

        vec![frame.into_geometry()]
    }
}

fn sweep_fraction(percent: u8) -> f32 {
    f32::from(percent.min(100)) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_fraction_bounds() {
        assert_eq!(sweep_fraction(0), 0.0);
        assert_eq!(sweep_fraction(50), 0.5);
        assert_eq!(sweep_fraction(100), 1.0);
        assert_eq!(sweep_fraction(250), 1.0);
    }
}
