use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned rectangle in frame coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub origin: Point,
    pub size: Size,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }
}

/// One face as reported by the detector for a single frame.
///
/// `face_id` is only meaningful within the frame that produced it. The
/// detector may or may not reuse identifiers across frames, so nothing in
/// this crate correlates faces by it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceGeometry {
    pub bounds: Bounds,
    #[serde(rename = "faceID", default, skip_serializing_if = "Option::is_none")]
    pub face_id: Option<i64>,
}

impl FaceGeometry {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            face_id: None,
        }
    }

    pub fn with_id(bounds: Bounds, face_id: i64) -> Self {
        Self {
            bounds,
            face_id: Some(face_id),
        }
    }
}
