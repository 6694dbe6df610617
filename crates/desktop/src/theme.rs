use iced::color;
use iced::theme::Palette;
use iced::{Color, Theme};

use facewatch_core::overlay::domain::overlay_rect::{OverlayPalette, Rgba};

pub fn resolve_theme() -> Theme {
    Theme::custom("FaceWatch", light_palette())
}

fn light_palette() -> Palette {
    Palette {
        background: color!(0xff, 0xff, 0xff),
        text: color!(0x1d, 0x1d, 0x1f),
        primary: color!(0x34, 0x98, 0xdb),
        success: color!(0x34, 0xc7, 0x59),
        warning: color!(0xff, 0x9f, 0x0a),
        danger: color!(0xff, 0x3b, 0x30),
    }
}

pub fn to_color(rgba: Rgba) -> Color {
    Color::from_rgba(rgba.r, rgba.g, rgba.b, rgba.a)
}

/// Face boxes use the palette's danger red while detection runs.
pub fn face_box_palette() -> OverlayPalette {
    OverlayPalette {
        active: Rgba::rgb(1.0, 0x3b as f32 / 255.0, 0x30 as f32 / 255.0),
        idle: Rgba::GRAY,
    }
}
