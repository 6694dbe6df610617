use crate::overlay::domain::overlay_rect::{OverlayRect, Rgba};
use crate::shared::constants::{FACE_BOX_BORDER_WIDTH, FACE_BOX_CORNER_RADIUS};

/// One absolutely positioned, bordered box over the preview.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawableBox {
    /// Position in the rendered sequence. Valid for one frame only.
    pub key: usize,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub border_color: Rgba,
    pub border_width: f32,
    pub corner_radius: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderedOverlay {
    pub boxes: Vec<DrawableBox>,
}

impl RenderedOverlay {
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }
}

/// Turns overlay rectangles into drawable boxes.
///
/// The whole overlay is rebuilt each frame, so boxes are keyed by index
/// rather than by any face identity.
#[derive(Clone, Debug)]
pub struct OverlayRenderer {
    border_width: f32,
    corner_radius: f32,
}

impl OverlayRenderer {
    pub fn new(border_width: f32, corner_radius: f32) -> Self {
        Self {
            border_width,
            corner_radius,
        }
    }

    pub fn render(&self, rects: &[OverlayRect]) -> RenderedOverlay {
        let boxes = rects
            .iter()
            .enumerate()
            .map(|(key, rect)| DrawableBox {
                key,
                left: rect.left as f32,
                top: rect.top as f32,
                width: rect.width as f32,
                height: rect.height as f32,
                border_color: rect.border_color,
                border_width: self.border_width,
                corner_radius: self.corner_radius,
            })
            .collect();
        RenderedOverlay { boxes }
    }
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self::new(FACE_BOX_BORDER_WIDTH, FACE_BOX_CORNER_RADIUS)
    }
}
