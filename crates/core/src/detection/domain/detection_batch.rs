use serde::{Deserialize, Serialize};

use crate::detection::domain::face_geometry::FaceGeometry;

/// Faces produced by one detector pass, in detector order.
///
/// This is both the per-frame event delivered by the camera and the body
/// posted to the remote server: `{ "faces": [ ... ] }`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionBatch {
    #[serde(default)]
    pub faces: Vec<FaceGeometry>,
}

impl DetectionBatch {
    pub fn new(faces: Vec<FaceGeometry>) -> Self {
        Self { faces }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

impl From<Vec<FaceGeometry>> for DetectionBatch {
    fn from(faces: Vec<FaceGeometry>) -> Self {
        Self::new(faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::face_geometry::Bounds;

    #[test]
    fn test_empty_batch() {
        let batch = DetectionBatch::empty();
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);
    }

    #[test]
    fn test_missing_faces_key_is_empty_batch() {
        let batch: DetectionBatch = serde_json::from_str("{}").unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_wire_shape() {
        let batch = DetectionBatch::new(vec![FaceGeometry::new(Bounds::new(
            10.0, 20.0, 50.0, 60.0,
        ))]);
        let value = serde_json::to_value(&batch).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "faces": [
                    { "bounds": { "origin": { "x": 10.0, "y": 20.0 }, "size": { "width": 50.0, "height": 60.0 } } }
                ]
            })
        );
    }

    #[test]
    fn test_preserves_detector_order() {
        let batch: DetectionBatch = vec![
            FaceGeometry::with_id(Bounds::new(0.0, 0.0, 1.0, 1.0), 2),
            FaceGeometry::with_id(Bounds::new(5.0, 5.0, 1.0, 1.0), 1),
        ]
        .into();
        assert_eq!(batch.faces[0].face_id, Some(2));
        assert_eq!(batch.faces[1].face_id, Some(1));
    }
}
