use crate::detection::domain::detection_state::DetectionState;

/// sRGB color with alpha, components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const RED: Rgba = Rgba::rgb(1.0, 0.0, 0.0);
    pub const GRAY: Rgba = Rgba::rgb(0.6, 0.6, 0.6);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Border tint per detection state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayPalette {
    pub active: Rgba,
    pub idle: Rgba,
}

impl OverlayPalette {
    pub fn border_for(&self, state: DetectionState) -> Rgba {
        match state {
            DetectionState::Active => self.active,
            DetectionState::Idle => self.idle,
        }
    }
}

impl Default for OverlayPalette {
    fn default() -> Self {
        Self {
            active: Rgba::RED,
            idle: Rgba::GRAY,
        }
    }
}

/// Screen-space rectangle marking one detected face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub border_color: Rgba,
}
