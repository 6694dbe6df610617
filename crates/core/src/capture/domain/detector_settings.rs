use std::time::Duration;

use crate::shared::constants::MIN_DETECTION_INTERVAL_MS;

/// Configuration handed to the capture collaborator when the preview mounts.
///
/// Only `min_detection_interval` influences this crate (it sets the replay
/// cadence); the rest is passed through to whatever detector runs behind
/// the camera.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetectorSettings {
    /// Favor speed over accuracy.
    pub fast_mode: bool,
    pub landmarks: bool,
    pub classifications: bool,
    pub min_detection_interval: Duration,
    /// Cross-frame tracking; keeps face ids stable inside the detector.
    pub tracking: bool,
    pub front_camera: bool,
}

impl DetectorSettings {
    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_detection_interval = interval;
        self
    }
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            fast_mode: true,
            landmarks: false,
            classifications: false,
            min_detection_interval: Duration::from_millis(MIN_DETECTION_INTERVAL_MS),
            tracking: true,
            front_camera: true,
        }
    }
}
