use iced::widget::{button, text};
use iced::{Border, Element, Shadow, Theme, Vector};

/// The detection start/stop control. Uses the danger palette while
/// detection is running.
pub fn view<'a, M: Clone + 'a>(label: &'a str, active: bool, on_press: M) -> Element<'a, M> {
    button(text(label).size(15))
        .on_press(on_press)
        .padding([10, 24])
        .style(move |theme: &Theme, status| {
            let base = if active {
                button::danger(theme, status)
            } else {
                button::primary(theme, status)
            };
            button::Style {
                border: Border {
                    radius: 8.0.into(),
                    ..base.border
                },
                shadow: Shadow {
                    color: iced::Color::from_rgba(0.0, 0.0, 0.0, 0.15),
                    offset: Vector::new(0.0, 2.0),
                    blur_radius: 4.0,
                },
                ..base
            }
        })
        .into()
}
