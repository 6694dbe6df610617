pub mod detection_batch;
pub mod detection_state;
pub mod face_geometry;
