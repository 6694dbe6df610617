use crate::capture::domain::camera::Camera;
use crate::detection::domain::detection_state::DetectionState;

/// Two-state start/stop control over the camera preview.
///
/// Optimistic: the state flips right after the pause/resume call is issued,
/// whether or not the call succeeds, so the next tap always acts on the
/// state the user sees. A failed call is logged and otherwise ignored. The
/// camera may briefly lag behind the displayed state.
pub struct DetectionToggle {
    camera: Box<dyn Camera>,
    state: DetectionState,
}

impl DetectionToggle {
    pub fn new(camera: Box<dyn Camera>) -> Self {
        Self {
            camera,
            state: DetectionState::Idle,
        }
    }

    pub fn state(&self) -> DetectionState {
        self.state
    }

    pub fn label(&self) -> &'static str {
        self.state.action_label()
    }

    pub fn toggle(&mut self) -> DetectionState {
        let (action, result) = match self.state {
            DetectionState::Idle => ("resume", self.camera.resume_preview()),
            DetectionState::Active => ("pause", self.camera.pause_preview()),
        };
        if let Err(e) = result {
            log::warn!("Failed to {action} preview: {e}");
        }
        self.state = self.state.toggled();
        log::debug!("Detection {}", self.state);
        self.state
    }

    /// Pauses an active preview and hands the camera back.
    pub fn release(mut self) -> Box<dyn Camera> {
        if self.state.is_active() {
            self.toggle();
        }
        self.camera
    }
}
