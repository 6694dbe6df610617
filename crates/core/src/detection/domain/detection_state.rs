use crate::shared::constants::{START_DETECTION_LABEL, STOP_DETECTION_LABEL};

/// Whether frames are currently being processed.
///
/// This is user intent: it flips as soon as the camera has been asked to
/// pause or resume, not when the camera confirms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetectionState {
    #[default]
    Idle,
    Active,
}

impl DetectionState {
    pub fn is_active(self) -> bool {
        self == DetectionState::Active
    }

    pub fn toggled(self) -> Self {
        match self {
            DetectionState::Idle => DetectionState::Active,
            DetectionState::Active => DetectionState::Idle,
        }
    }

    /// Label for the control that leaves this state.
    pub fn action_label(self) -> &'static str {
        match self {
            DetectionState::Idle => START_DETECTION_LABEL,
            DetectionState::Active => STOP_DETECTION_LABEL,
        }
    }
}

impl std::fmt::Display for DetectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectionState::Idle => write!(f, "idle"),
            DetectionState::Active => write!(f, "active"),
        }
    }
}
