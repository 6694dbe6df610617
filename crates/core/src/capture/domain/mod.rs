pub mod camera;
pub mod detector_settings;
