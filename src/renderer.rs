//! Tick visual construction and frame drawing.

use iced::widget::canvas;
use iced::{Color, Point, Rectangle, Size};

use crate::picker::{Geometry, TapePicker};
use crate::series::TickSeries;
use crate::ticks::{self, TickClass};

// ================================================================================
// Tick visuals
// ================================================================================

/// One tick's layout, derived from the series and geometry. `x` is in tape
/// content coordinates; screen position is `x - scroll_offset`.
#[derive(Clone, Debug, PartialEq)]
pub struct TickVisual {
    pub x: f32,
    pub width: f32,
    pub height: f32,
    pub class: TickClass,
    pub label: Option<String>,
}

/// Build the full tick visual set.
///
/// Callers replace their previous set with the returned one wholesale; a
/// rebuild never appends to existing visuals.
pub fn build_tick_visuals(
    series: &TickSeries,
    geometry: &Geometry,
    interval: u32,
) -> Vec<TickVisual> {
    let mut visuals = Vec::with_capacity(series.len());
    for index in 0..series.len() {
        let class = ticks::classify(index, interval);
        let label = match class {
            TickClass::Major => Some(ticks::format_value(series.value(index))),
            _ => None,
        };
        visuals.push(TickVisual {
            x: index as f32 * geometry.tick_spacing,
            width: geometry.tick_width,
            height: geometry.height_for(class),
            class,
            label,
        });
    }
    visuals
}

// ================================================================================
// Free Functions
// ================================================================================

/// Linearly interpolate between two colors.
pub(crate) fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    Color::from_rgba(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
        a.a + (b.a - a.a) * t,
    )
}

/// Ease-out cubic: decelerating to zero velocity.
pub(crate) fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

// ================================================================================
// Drawing
// ================================================================================

impl<Message> TapePicker<'_, Message> {
    /// Draws the tick strip. `color_for` resolves each tick's current color
    /// (resting, selected, or mid-flash).
    pub(crate) fn draw_ticks(
        &self,
        frame: &mut canvas::Frame,
        bounds: Rectangle,
        visuals: &[TickVisual],
        offset: f32,
        color_for: &dyn Fn(usize, TickClass) -> Color,
    ) {
        let top = self.geometry.title_height;
        let label_y = self.geometry.title_height + self.geometry.significant_tick_height + 4.0;

        for (index, visual) in visuals.iter().enumerate() {
            let screen_x = visual.x - offset;
            if screen_x < -self.geometry.tick_spacing
                || screen_x > bounds.width + self.geometry.tick_spacing
            {
                continue;
            }

            frame.fill_rectangle(
                Point::new(screen_x, top),
                Size::new(visual.width.max(1.0), visual.height),
                color_for(index, visual.class),
            );

            if let Some(label) = &visual.label {
                frame.fill_text(canvas::Text {
                    content: label.clone(),
                    position: Point::new(screen_x + visual.width * 0.5, label_y),
                    color: self.style.significant_tick_color,
                    size: iced::Pixels(14.0),
                    align_x: iced::widget::text::Alignment::Center,
                    align_y: iced::alignment::Vertical::Top,
                    ..canvas::Text::default()
                });
            }
        }
    }

    /// Draws the title strip with the formatted selected value and unit.
    pub(crate) fn draw_title(
        &self,
        frame: &mut canvas::Frame,
        bounds: Rectangle,
        selected_value: Option<f64>,
    ) {
        frame.fill_rectangle(
            Point::ORIGIN,
            Size::new(bounds.width, self.geometry.title_height),
            self.style.title_background,
        );
        frame.stroke(
            &canvas::Path::rectangle(
                Point::ORIGIN,
                Size::new(bounds.width, self.geometry.title_height),
            ),
            canvas::Stroke::default()
                .with_color(self.style.title_border)
                .with_width(1.0),
        );

        if let Some(value) = selected_value {
            let content = if self.unit.is_empty() {
                ticks::format_value(value)
            } else {
                format!("{} {}", ticks::format_value(value), self.unit)
            };
            frame.fill_text(canvas::Text {
                content,
                position: Point::new(bounds.width * 0.5, self.geometry.title_height * 0.5),
                color: self.style.text_color,
                size: iced::Pixels(20.0),
                align_x: iced::widget::text::Alignment::Center,
                align_y: iced::alignment::Vertical::Center,
                ..canvas::Text::default()
            });
        }
    }

    /// Draws the selection indicator: a small triangle under the title strip
    /// pointing at the tick that sits at the viewport center.
    pub(crate) fn draw_indicator(&self, frame: &mut canvas::Frame, bounds: Rectangle) {
        let center_x = bounds.width * 0.5;
        let top = self.geometry.title_height;
        let half = self.geometry.insignificant_tick_height * 0.5;

        let indicator = canvas::Path::new(|builder| {
            builder.move_to(Point::new(center_x - half, top));
            builder.line_to(Point::new(center_x + half, top));
            builder.line_to(Point::new(center_x, top + half * 1.6));
            builder.close();
        });
        frame.fill(&indicator, self.style.title_border);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> Geometry {
        Geometry::default()
    }

    #[test]
    fn test_build_produces_one_visual_per_value() {
        let series = TickSeries::default();
        let visuals = build_tick_visuals(&series, &geometry(), 10);
        assert_eq!(visuals.len(), 101);
    }

    #[test]
    fn test_only_major_ticks_carry_labels() {
        let series = TickSeries::default();
        let visuals = build_tick_visuals(&series, &geometry(), 10);
        for (index, visual) in visuals.iter().enumerate() {
            if index % 10 == 0 {
                assert_eq!(visual.label.as_deref(), Some(format!("{index}").as_str()));
            } else {
                assert!(visual.label.is_none());
            }
        }
    }

    #[test]
    fn test_positions_are_monotone_and_spaced() {
        let series = TickSeries::default();
        let visuals = build_tick_visuals(&series, &geometry(), 10);
        for window in visuals.windows(2) {
            assert_eq!(window[1].x - window[0].x, geometry().tick_spacing);
        }
    }

    #[test]
    fn test_heights_follow_classification() {
        let series = TickSeries::default();
        let visuals = build_tick_visuals(&series, &geometry(), 10);
        assert_eq!(visuals[0].height, geometry().significant_tick_height);
        assert_eq!(visuals[5].height, geometry().median_tick_height);
        assert_eq!(visuals[3].height, geometry().insignificant_tick_height);
    }

    #[test]
    fn test_rebuild_replaces_the_set() {
        let series = TickSeries::default();
        let first = build_tick_visuals(&series, &geometry(), 10);
        let shorter = TickSeries::from_values(vec![1.0, 2.0, 3.0]);
        let second = build_tick_visuals(&shorter, &geometry(), 10);
        assert_eq!(first.len(), 101);
        assert_eq!(second.len(), 3);
    }

    #[test]
    fn test_decimal_labels_keep_their_fraction() {
        let series = TickSeries::from_values(vec![0.0, 0.5, 1.0]);
        let visuals = build_tick_visuals(&series, &geometry(), 1);
        assert_eq!(visuals[1].label.as_deref(), Some("0.5"));
    }

    #[test]
    fn test_lerp_color_endpoints() {
        let a = Color::BLACK;
        let b = Color::WHITE;
        assert_eq!(lerp_color(a, b, 0.0), a);
        assert_eq!(lerp_color(a, b, 1.0), b);
    }

    #[test]
    fn test_ease_out_cubic_is_clamped_and_monotone() {
        assert_eq!(ease_out_cubic(-1.0), 0.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        let mut last = 0.0;
        for step in 0..=10 {
            let eased = ease_out_cubic(step as f32 / 10.0);
            assert!(eased >= last);
            last = eased;
        }
    }
}
