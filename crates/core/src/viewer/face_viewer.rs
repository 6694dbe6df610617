use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use thiserror::Error;

use crate::capture::domain::camera::Camera;
use crate::detection::domain::detection_batch::DetectionBatch;
use crate::detection::domain::detection_state::DetectionState;
use crate::forwarding::domain::result_forwarder::{ForwardOutcome, ResultForwarder};
use crate::overlay::domain::frame_result_projector::FrameResultProjector;
use crate::overlay::domain::overlay_renderer::{OverlayRenderer, RenderedOverlay};
use crate::shared::constants::NO_ACCESS_MESSAGE;
use crate::shared::session_logger::SessionLogger;
use crate::viewer::detection_toggle::DetectionToggle;
use crate::viewer::permission_gate::{AuthorizationState, PermissionGate};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ViewerError {
    #[error("detection control unavailable: camera authorization is {0:?}")]
    NotAuthorized(AuthorizationState),
}

/// What a front end should display right now.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewerScreen {
    /// Permission prompt still outstanding.
    Pending,
    NoAccess { message: &'static str },
    /// `overlay` is `None` while idle: the capture view is not mounted.
    Live {
        toggle_label: &'static str,
        state: DetectionState,
        overlay: Option<RenderedOverlay>,
    },
}

/// The mounted viewer: owns the camera handle and wires permission,
/// detection toggle, overlay and forwarding together.
///
/// All methods run on the caller's thread. Only the forwarder does work
/// elsewhere, and its results come back solely as logged outcomes.
pub struct FaceViewer {
    gate: PermissionGate,
    camera: Option<Box<dyn Camera>>,
    toggle: Option<DetectionToggle>,
    latest: DetectionBatch,
    projector: FrameResultProjector,
    renderer: OverlayRenderer,
    forwarder: Box<dyn ResultForwarder>,
    outcomes: Option<Receiver<ForwardOutcome>>,
    pending_forwards: usize,
    logger: Box<dyn SessionLogger>,
}

impl FaceViewer {
    pub fn new(
        camera: Box<dyn Camera>,
        forwarder: Box<dyn ResultForwarder>,
        logger: Box<dyn SessionLogger>,
    ) -> Self {
        Self {
            gate: PermissionGate::new(),
            camera: Some(camera),
            toggle: None,
            latest: DetectionBatch::empty(),
            projector: FrameResultProjector::default(),
            renderer: OverlayRenderer::default(),
            forwarder,
            outcomes: None,
            pending_forwards: 0,
            logger,
        }
    }

    /// Attaches the receiving end of the forwarder's outcome channel so
    /// deliveries and drops reach the session logger.
    pub fn with_outcomes(mut self, outcomes: Receiver<ForwardOutcome>) -> Self {
        self.outcomes = Some(outcomes);
        self
    }

    pub fn with_overlay(mut self, projector: FrameResultProjector, renderer: OverlayRenderer) -> Self {
        self.projector = projector;
        self.renderer = renderer;
        self
    }

    /// Requests camera access. Only the first call reaches the camera.
    ///
    /// On a grant the camera moves into the detection toggle; on a denial it
    /// is released and the viewer stays on the no-access screen.
    pub fn mount(&mut self) -> AuthorizationState {
        let Some(mut camera) = self.camera.take() else {
            return self.gate.state();
        };
        let state = self.gate.request_authorization(camera.as_mut());
        if state == AuthorizationState::Granted {
            self.toggle = Some(DetectionToggle::new(camera));
        } else {
            self.logger.info(NO_ACCESS_MESSAGE);
        }
        state
    }

    pub fn authorization(&self) -> AuthorizationState {
        self.gate.state()
    }

    pub fn detection_state(&self) -> DetectionState {
        self.toggle
            .as_ref()
            .map_or(DetectionState::Idle, DetectionToggle::state)
    }

    pub fn toggle(&mut self) -> Result<DetectionState, ViewerError> {
        let toggle = self
            .toggle
            .as_mut()
            .ok_or(ViewerError::NotAuthorized(self.gate.state()))?;
        let state = toggle.toggle();
        if !state.is_active() {
            self.latest = DetectionBatch::empty();
        }
        Ok(state)
    }

    /// Handles one detection event from the camera.
    ///
    /// The batch replaces whatever was held before. Non-empty batches are
    /// handed to the forwarder, which returns without waiting on the
    /// network. Events that arrive while idle are ignored.
    pub fn on_faces_detected(&mut self, batch: DetectionBatch) {
        self.drain_outcomes();

        if !self.detection_state().is_active() {
            log::debug!("Ignoring detection event while idle");
            return;
        }

        let started = Instant::now();
        let count = batch.len();
        if count > 0 {
            log::info!("Faces detected: {count}");
            self.forwarder.forward(batch.clone());
            if self.outcomes.is_some() {
                self.pending_forwards += 1;
            }
        } else {
            log::info!("No face detected");
        }
        self.latest = batch;

        self.logger.frame(count);
        self.logger
            .timing("handle", started.elapsed().as_secs_f64() * 1000.0);
    }

    pub fn view(&self) -> ViewerScreen {
        match self.gate.state() {
            AuthorizationState::Unknown => ViewerScreen::Pending,
            AuthorizationState::Denied => ViewerScreen::NoAccess {
                message: NO_ACCESS_MESSAGE,
            },
            AuthorizationState::Granted => {
                let state = self.detection_state();
                let overlay = state.is_active().then(|| {
                    let rects = self.projector.project(&self.latest.faces, state);
                    self.renderer.render(&rects)
                });
                let toggle_label = self
                    .toggle
                    .as_ref()
                    .map_or(state.action_label(), DetectionToggle::label);
                ViewerScreen::Live {
                    toggle_label,
                    state,
                    overlay,
                }
            }
        }
    }

    /// Tears the viewer down: pauses an active preview, releases the
    /// camera, waits up to `grace` for in-flight forwards to report, and
    /// emits the session summary.
    pub fn unmount(mut self, grace: Duration) {
        if let Some(toggle) = self.toggle.take() {
            drop(toggle.release());
        }
        self.latest = DetectionBatch::empty();
        self.settle_outcomes(grace);
        self.logger.summary();
    }

    fn drain_outcomes(&mut self) {
        let Some(rx) = self.outcomes.as_ref() else {
            return;
        };
        for outcome in rx.try_iter() {
            self.pending_forwards = self.pending_forwards.saturating_sub(1);
            self.logger.forwarded(&outcome);
        }
    }

    fn settle_outcomes(&mut self, grace: Duration) {
        let Some(rx) = self.outcomes.as_ref() else {
            return;
        };
        let deadline = Instant::now() + grace;
        while self.pending_forwards > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok(outcome) => {
                    self.pending_forwards -= 1;
                    self.logger.forwarded(&outcome);
                }
                Err(_) => {
                    log::warn!(
                        "{} forwarded batches still in flight at shutdown",
                        self.pending_forwards
                    );
                    break;
                }
            }
        }
    }
}
