use crate::detection::domain::detection_state::DetectionState;
use crate::detection::domain::face_geometry::FaceGeometry;
use crate::overlay::domain::overlay_rect::{OverlayPalette, OverlayRect};

/// Maps one frame's detector output onto overlay rectangles.
///
/// Frame and screen coordinates coincide for the live preview, so bounds
/// are copied as-is. Each call is independent: no smoothing, filtering or
/// matching against earlier frames.
#[derive(Clone, Debug, Default)]
pub struct FrameResultProjector {
    palette: OverlayPalette,
}

impl FrameResultProjector {
    pub fn new(palette: OverlayPalette) -> Self {
        Self { palette }
    }

    pub fn project(&self, faces: &[FaceGeometry], state: DetectionState) -> Vec<OverlayRect> {
        let border_color = self.palette.border_for(state);
        faces
            .iter()
            .map(|face| OverlayRect {
                left: face.bounds.origin.x,
                top: face.bounds.origin.y,
                width: face.bounds.size.width,
                height: face.bounds.size.height,
                border_color,
            })
            .collect()
    }
}
