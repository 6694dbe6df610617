use crate::capture::domain::camera::Camera;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthorizationState {
    #[default]
    Unknown,
    Granted,
    Denied,
}

/// Asks the camera for access once and remembers the answer.
///
/// Fails closed: an error from the camera counts as a denial. There is no
/// re-request; once settled, the state never changes for the session.
#[derive(Debug, Default)]
pub struct PermissionGate {
    state: AuthorizationState,
}

impl PermissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AuthorizationState {
        self.state
    }

    pub fn request_authorization(&mut self, camera: &mut dyn Camera) -> AuthorizationState {
        if self.state != AuthorizationState::Unknown {
            return self.state;
        }
        self.state = match camera.request_permission() {
            Ok(response) if response.granted => AuthorizationState::Granted,
            Ok(_) => {
                log::info!("Camera permission denied");
                AuthorizationState::Denied
            }
            Err(e) => {
                log::warn!("Camera permission request failed: {e}");
                AuthorizationState::Denied
            }
        };
        self.state
    }
}
