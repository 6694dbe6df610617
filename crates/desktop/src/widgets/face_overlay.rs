use iced::widget::{container, Space, Stack};
use iced::{Border, Element, Length, Padding};

use facewatch_core::overlay::domain::overlay_renderer::{DrawableBox, RenderedOverlay};

use crate::theme::to_color;

/// Stacks one bordered box per detected face over the preview area.
pub fn view<'a, M: 'a>(overlay: Option<&RenderedOverlay>) -> Element<'a, M> {
    let boxes: Vec<Element<'a, M>> = overlay
        .map(|o| o.boxes.iter().map(face_box).collect())
        .unwrap_or_default();

    Stack::with_children(boxes)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn face_box<'a, M: 'a>(b: &DrawableBox) -> Element<'a, M> {
    let color = to_color(b.border_color);
    let width = b.border_width;
    let radius = b.corner_radius;
    let visible = visible_area(b);

    let frame = container(Space::new())
        .width(Length::Fixed(visible.width))
        .height(Length::Fixed(visible.height))
        .style(move |_| container::Style {
            border: Border {
                color,
                width,
                radius: radius.into(),
            },
            ..container::Style::default()
        });

    container(frame)
        .padding(Padding {
            top: visible.top,
            left: visible.left,
            ..Padding::ZERO
        })
        .into()
}

/// On-screen placement of a box after cropping the part that lies above or
/// left of the preview origin.
#[derive(Clone, Copy, Debug, PartialEq)]
struct VisibleArea {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
}

fn visible_area(b: &DrawableBox) -> VisibleArea {
    let left = b.left.max(0.0);
    let top = b.top.max(0.0);
    VisibleArea {
        left,
        top,
        width: (b.width - (left - b.left)).max(0.0),
        height: (b.height - (top - b.top)).max(0.0),
    }
}
