use thiserror::Error;

#[derive(Error, Debug)]
pub enum CameraError {
    #[error("camera unavailable: {0}")]
    Unavailable(String),
    #[error("camera request rejected: {0}")]
    Rejected(String),
}

/// Answer to a permission request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PermissionResponse {
    pub granted: bool,
}

/// Domain interface for the capture collaborator.
///
/// Calls are issued, not awaited: an implementation may return before the
/// preview has actually paused or resumed. `pause_preview` and
/// `resume_preview` must tolerate being called on a preview that is already
/// in the requested state. Detection events are delivered separately by the
/// implementation (see `ReplayCamera::events`).
pub trait Camera: Send {
    fn request_permission(&mut self) -> Result<PermissionResponse, CameraError>;

    fn pause_preview(&mut self) -> Result<(), CameraError>;

    fn resume_preview(&mut self) -> Result<(), CameraError>;
}
