//! The declarative tape picker widget.
//!
//! `TapePicker` is the value the host application builds in `view()`:
//! configuration plus an `on_select` message constructor. Everything that
//! persists across frames (scroll offset, selection, animations) lives in the
//! canvas program state, see [`crate::canvas`].

use iced::widget::Canvas;
use iced::{Color, Element, Length};

use crate::series::TickSeries;
use crate::ticks::TickClass;

// ================================================================================
// Configuration
// ================================================================================

/// Tick layout configuration. Any change to these values rebuilds the tick
/// visual set and re-snaps the current selection.
///
/// The leading inset is not configured here: it is half the widget bounds
/// width, derived per frame.
#[derive(Clone, Copy, Debug, PartialEq, bon::Builder)]
pub struct Geometry {
    /// Horizontal distance between adjacent ticks.
    #[builder(default = 20.0)]
    pub tick_spacing: f32,
    #[builder(default = 1.0)]
    pub tick_width: f32,
    #[builder(default = 30.0)]
    pub significant_tick_height: f32,
    #[builder(default = 20.0)]
    pub median_tick_height: f32,
    #[builder(default = 10.0)]
    pub insignificant_tick_height: f32,
    /// Height of the title strip above the tape.
    #[builder(default = 44.0)]
    pub title_height: f32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Geometry {
    /// Tick height for a weight class.
    pub fn height_for(&self, class: TickClass) -> f32 {
        match class {
            TickClass::Major => self.significant_tick_height,
            TickClass::Mid => self.median_tick_height,
            TickClass::Minor => self.insignificant_tick_height,
        }
    }

    /// Natural widget height: title strip plus the tallest tick plus room for
    /// the major tick labels underneath.
    pub fn widget_height(&self) -> f32 {
        self.title_height + self.significant_tick_height + 34.0
    }
}

/// Colors. Style-only changes redraw without rebuilding the visual set.
#[derive(Clone, Copy, Debug, PartialEq, bon::Builder)]
pub struct TapeStyle {
    /// Resting color of mid and minor ticks.
    #[builder(default = Color::from_rgba(1.0, 1.0, 1.0, 0.5))]
    pub tick_color: Color,
    /// Resting color of major ticks and their labels.
    #[builder(default = Color::WHITE)]
    pub significant_tick_color: Color,
    /// Highlight for the selected tick and the transit flash. Supplied
    /// explicitly instead of being looked up from any ambient theme.
    #[builder(default = Color::from_rgb(0.0, 0.478, 1.0))]
    pub selected_color: Color,
    #[builder(default = Color::BLACK)]
    pub background: Color,
    #[builder(default = Color::from_rgb(0.15, 0.15, 0.15))]
    pub title_background: Color,
    #[builder(default = Color::from_rgb(0.0, 0.478, 1.0))]
    pub title_border: Color,
    #[builder(default = Color::WHITE)]
    pub text_color: Color,
}

impl Default for TapeStyle {
    fn default() -> Self {
        Self::builder().build()
    }
}

// ================================================================================
// Widget
// ================================================================================

/// A horizontally scrolling tape of tick marks that snaps to the nearest tick.
///
/// ```no_run
/// # use tape_picker::TapePicker;
/// # #[derive(Clone)] enum Message { Picked(f64) }
/// let picker = TapePicker::new((0..=200).map(f64::from).collect())
///     .with_interval(10)
///     .with_unit("kg")
///     .on_select(Message::Picked);
/// ```
pub struct TapePicker<'a, Message> {
    pub(crate) series: TickSeries,
    pub(crate) geometry: Geometry,
    pub(crate) style: TapeStyle,
    pub(crate) significant_tick_interval: u32,
    pub(crate) unit: String,
    pub(crate) selected: Option<usize>,
    pub(crate) on_select: Option<Box<dyn Fn(f64) -> Message + 'a>>,
}

impl<'a, Message> TapePicker<'a, Message> {
    /// Build a picker over the given values. An empty vector falls back to the
    /// default 0..=100 integer sequence; the tape is never empty.
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            series: TickSeries::from_values(values),
            geometry: Geometry::default(),
            style: TapeStyle::default(),
            significant_tick_interval: 10,
            unit: String::new(),
            selected: None,
            on_select: None,
        }
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_style(mut self, style: TapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Every `interval`-th tick is major, every `interval / 2`-th is mid.
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.significant_tick_interval = interval;
        self
    }

    /// Unit suffix rendered after the selected value in the title.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Drive the selection programmatically. Passing a new index here runs the
    /// same transition, feedback and snap machinery as a user scroll; passing
    /// the index the user last settled on is a no-op.
    pub fn selected(mut self, index: usize) -> Self {
        self.selected = Some(index);
        self
    }

    /// Message constructor invoked with the selected value on every settle,
    /// including the initial one.
    pub fn on_select(mut self, on_select: impl Fn(f64) -> Message + 'a) -> Self {
        self.on_select = Some(Box::new(on_select));
        self
    }

    /// Main function for drawing the picker in a view.
    pub fn draw(self) -> Element<'a, Message>
    where
        Message: 'a,
    {
        let height = self.geometry.widget_height();
        Canvas::new(self)
            .width(Length::Fill)
            .height(Length::Fixed(height))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_for_maps_every_class() {
        let geometry = Geometry::builder()
            .significant_tick_height(32.0)
            .median_tick_height(21.0)
            .insignificant_tick_height(9.0)
            .build();
        assert_eq!(geometry.height_for(TickClass::Major), 32.0);
        assert_eq!(geometry.height_for(TickClass::Mid), 21.0);
        assert_eq!(geometry.height_for(TickClass::Minor), 9.0);
    }

    #[test]
    fn test_geometry_defaults_match_the_documented_values() {
        let geometry = Geometry::default();
        assert_eq!(geometry.tick_spacing, 20.0);
        assert_eq!(geometry.tick_width, 1.0);
        assert_eq!(geometry.title_height, 44.0);
    }

    #[test]
    fn test_empty_values_fall_back_to_default_series() {
        let picker: TapePicker<'_, ()> = TapePicker::new(Vec::new());
        assert_eq!(picker.series.len(), 101);
    }
}
