use iced::widget::{Container, button, column, row, text};
use iced::{Element, Length, Theme};
use tape_picker::TapePicker;

pub fn main() {
    iced::application(WeightPicker::default, WeightPicker::update, WeightPicker::view)
        .theme(Theme::GruvboxDark)
        .run()
        .unwrap()
}

#[derive(Debug, Clone)]
enum Message {
    Picked(f64),
    JumpTo(usize),
}

struct WeightPicker {
    picked: Option<f64>,
    jump: Option<usize>,
}

impl WeightPicker {
    pub fn default() -> Self {
        Self {
            picked: None,
            jump: None,
        }
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::Picked(value) => {
                self.picked = Some(value);
            }
            Message::JumpTo(index) => {
                self.jump = Some(index);
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let picked = match self.picked {
            Some(value) => format!("Selected: {value} kg"),
            None => "Selected: -".to_string(),
        };

        let mut picker = TapePicker::new((0..=200).map(f64::from).collect())
            .with_interval(10)
            .with_unit("kg")
            .on_select(Message::Picked);
        if let Some(index) = self.jump {
            picker = picker.selected(index);
        }

        let controls = row![
            button(text("Jump to 0")).on_press(Message::JumpTo(0)),
            button(text("Jump to 75")).on_press(Message::JumpTo(75)),
            button(text("Jump to 200")).on_press(Message::JumpTo(200)),
        ]
        .spacing(10);

        Container::new(
            column![
                text("Drag the tape or scroll to pick a weight"),
                picker.draw(),
                text(picked),
                controls,
            ]
            .spacing(20),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(40)
        .into()
    }
}
