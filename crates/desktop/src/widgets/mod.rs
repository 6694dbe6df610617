pub mod face_overlay;
pub mod toggle_button;
