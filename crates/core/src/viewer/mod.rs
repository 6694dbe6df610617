pub mod detection_toggle;
pub mod face_viewer;
pub mod permission_gate;
