use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

use crossbeam_channel::Receiver;

use facewatch_core::capture::domain::detector_settings::DetectorSettings;
use facewatch_core::capture::infrastructure::replay_camera::{ReplayCamera, ReplayPermission};
use facewatch_core::detection::domain::detection_batch::DetectionBatch;
use facewatch_core::forwarding::domain::result_forwarder::{NullResultForwarder, ResultForwarder};
use facewatch_core::forwarding::infrastructure::http_batch_transport::HttpBatchTransport;
use facewatch_core::forwarding::infrastructure::threaded_result_forwarder::ThreadedResultForwarder;
use facewatch_core::overlay::domain::frame_result_projector::FrameResultProjector;
use facewatch_core::overlay::domain::overlay_renderer::OverlayRenderer;
use facewatch_core::shared::config::ViewerConfig;
use facewatch_core::shared::session_logger::NullSessionLogger;
use facewatch_core::viewer::face_viewer::FaceViewer;

use crate::theme;

/// A viewer together with the camera's detection event channel.
pub struct Session {
    pub viewer: FaceViewer,
    pub events: Receiver<DetectionBatch>,
}

/// Builds the session from the event file given on the command line.
///
/// Everything that touches the network client is constructed here, before
/// the GUI runtime starts.
pub fn build(events_path: Option<OsString>) -> Result<Session, Box<dyn std::error::Error>> {
    let path = events_path
        .map(PathBuf::from)
        .ok_or("usage: facewatch-desktop <events.jsonl>")?;

    let config = ViewerConfig::load();
    let settings = DetectorSettings::default().with_min_interval(config.min_detection_interval());
    let camera = ReplayCamera::load(&path, &settings, ReplayPermission::Grant)?;
    let events = camera.events();

    let forwarder: Box<dyn ResultForwarder> = if config.forward_results {
        let transport = Arc::new(HttpBatchTransport::new(config.endpoint()?));
        log::info!("Forwarding detection batches to {}", transport.endpoint());
        Box::new(ThreadedResultForwarder::new(transport))
    } else {
        Box::new(NullResultForwarder)
    };

    let viewer = FaceViewer::new(Box::new(camera), forwarder, Box::new(NullSessionLogger))
        .with_overlay(
            FrameResultProjector::new(theme::face_box_palette()),
            OverlayRenderer::default(),
        );
    Ok(Session { viewer, events })
}
