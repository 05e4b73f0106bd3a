use iced::widget::{Container, column, text};
use iced::{Color, Element, Length, Theme};
use tape_picker::{Geometry, TapePicker, TapeStyle};

pub fn main() {
    iced::application(
        DistancePicker::default,
        DistancePicker::update,
        DistancePicker::view,
    )
    .theme(Theme::GruvboxDark)
    .run()
    .unwrap()
}

#[derive(Debug, Clone)]
enum Message {
    Picked(f64),
}

struct DistancePicker {
    picked: Option<f64>,
}

impl DistancePicker {
    pub fn default() -> Self {
        Self { picked: None }
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::Picked(value) => {
                self.picked = Some(value);
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        // 0.0 to 10.0 km in 0.25 steps; a major tick every full kilometer.
        let values: Vec<f64> = (0..=40).map(|step| step as f64 * 0.25).collect();

        let picker = TapePicker::new(values)
            .with_interval(4)
            .with_unit("km")
            .with_geometry(
                Geometry::builder()
                    .tick_spacing(32.0)
                    .tick_width(2.0)
                    .significant_tick_height(36.0)
                    .build(),
            )
            .with_style(
                TapeStyle::builder()
                    .selected_color(Color::from_rgb(0.98, 0.57, 0.11))
                    .title_border(Color::from_rgb(0.98, 0.57, 0.11))
                    .build(),
            )
            .on_select(Message::Picked);

        let picked = match self.picked {
            Some(value) => format!("Distance: {value} km"),
            None => "Distance: -".to_string(),
        };

        Container::new(column![picker.draw(), text(picked)].spacing(20))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(40)
            .into()
    }
}
