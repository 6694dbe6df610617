use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use thiserror::Error;

use crate::capture::domain::camera::{Camera, CameraError, PermissionResponse};
use crate::capture::domain::detector_settings::DetectorSettings;
use crate::detection::domain::detection_batch::DetectionBatch;

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("failed to open event file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read event file: {0}")]
    Read(#[source] std::io::Error),
    #[error("invalid detection event on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// How the replayed camera answers the permission prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplayPermission {
    Grant,
    Deny,
    Fail,
}

/// Camera stand-in that replays recorded detection events.
///
/// Events are emitted on a background thread, one every
/// `min_detection_interval`, and only while the preview is resumed. The
/// preview starts paused. Pausing discards events that were emitted but not
/// yet received. When the recording runs out the event channel disconnects.
pub struct ReplayCamera {
    permission: ReplayPermission,
    preview: Arc<PreviewState>,
    events: Receiver<DetectionBatch>,
}

struct PreviewState {
    flags: Mutex<PreviewFlags>,
    changed: Condvar,
}

#[derive(Default)]
struct PreviewFlags {
    running: bool,
    closed: bool,
}

impl ReplayCamera {
    pub fn new(
        batches: Vec<DetectionBatch>,
        settings: &DetectorSettings,
        permission: ReplayPermission,
    ) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded::<DetectionBatch>();
        let preview = Arc::new(PreviewState {
            flags: Mutex::new(PreviewFlags::default()),
            changed: Condvar::new(),
        });

        log::debug!("Replay camera configured with {settings:?}");
        let emitter_state = preview.clone();
        let interval = settings.min_detection_interval;
        thread::spawn(move || {
            emit(batches, &emitter_state, &tx, interval);
        });

        Self {
            permission,
            preview,
            events: rx,
        }
    }

    /// Loads a JSON Lines recording, one `{"faces":[...]}` object per line.
    pub fn load(
        path: &Path,
        settings: &DetectorSettings,
        permission: ReplayPermission,
    ) -> Result<Self, ReplayError> {
        let file = File::open(path).map_err(|e| ReplayError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        let batches = parse_events(BufReader::new(file))?;
        log::info!(
            "Loaded {} detection events from {}",
            batches.len(),
            path.display()
        );
        Ok(Self::new(batches, settings, permission))
    }

    /// Channel of detection events. Clone it before handing the camera to a
    /// viewer, which takes ownership of the handle.
    pub fn events(&self) -> Receiver<DetectionBatch> {
        self.events.clone()
    }

    fn set_running(&self, running: bool) -> Result<(), CameraError> {
        let mut flags = self
            .preview
            .flags
            .lock()
            .map_err(|_| CameraError::Unavailable("preview state poisoned".into()))?;
        flags.running = running;
        if !running {
            // The emitter only sends while holding the lock, so nothing can
            // slip in between clearing the flag and draining.
            let discarded = self.events.try_iter().count();
            if discarded > 0 {
                log::debug!("Discarded {discarded} undelivered detection events on pause");
            }
        }
        self.preview.changed.notify_all();
        Ok(())
    }
}

impl Camera for ReplayCamera {
    fn request_permission(&mut self) -> Result<PermissionResponse, CameraError> {
        match self.permission {
            ReplayPermission::Grant => Ok(PermissionResponse { granted: true }),
            ReplayPermission::Deny => Ok(PermissionResponse { granted: false }),
            ReplayPermission::Fail => Err(CameraError::Rejected(
                "permission prompt failed".into(),
            )),
        }
    }

    fn pause_preview(&mut self) -> Result<(), CameraError> {
        self.set_running(false)
    }

    fn resume_preview(&mut self) -> Result<(), CameraError> {
        self.set_running(true)
    }
}

impl Drop for ReplayCamera {
    fn drop(&mut self) {
        if let Ok(mut flags) = self.preview.flags.lock() {
            flags.closed = true;
            self.preview.changed.notify_all();
        }
    }
}

pub fn parse_events<R: BufRead>(reader: R) -> Result<Vec<DetectionBatch>, ReplayError> {
    let mut batches = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(ReplayError::Read)?;
        if line.trim().is_empty() {
            continue;
        }
        let batch = serde_json::from_str(&line).map_err(|e| ReplayError::Parse {
            line: i + 1,
            source: e,
        })?;
        batches.push(batch);
    }
    Ok(batches)
}

fn emit(
    batches: Vec<DetectionBatch>,
    preview: &PreviewState,
    tx: &Sender<DetectionBatch>,
    interval: std::time::Duration,
) {
    for batch in batches {
        if !send_when_running(preview, tx, batch) {
            return;
        }
        thread::sleep(interval);
    }
}

/// Blocks while the preview is paused, then sends under the preview lock.
/// Returns `false` once the camera is dropped or the channel is gone.
fn send_when_running(
    preview: &PreviewState,
    tx: &Sender<DetectionBatch>,
    batch: DetectionBatch,
) -> bool {
    let Ok(mut flags) = preview.flags.lock() else {
        return false;
    };
    while !flags.running && !flags.closed {
        flags = match preview.changed.wait(flags) {
            Ok(guard) => guard,
            Err(_) => return false,
        };
    }
    !flags.closed && tx.send(batch).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::face_geometry::{Bounds, FaceGeometry};
    use std::io::Write;
    use std::time::Duration;

    fn settings() -> DetectorSettings {
        DetectorSettings::default().with_min_interval(Duration::ZERO)
    }

    fn batch(n: usize) -> DetectionBatch {
        let faces = (0..n)
            .map(|i| FaceGeometry::new(Bounds::new(i as f64, 0.0, 10.0, 10.0)))
            .collect();
        DetectionBatch::new(faces)
    }

    #[test]
    fn test_parse_events_skips_blank_lines() {
        let input = "{\"faces\":[]}\n\n{\"faces\":[{\"bounds\":{\"origin\":{\"x\":1,\"y\":2},\"size\":{\"width\":3,\"height\":4}}}]}\n";
        let batches = parse_events(input.as_bytes()).unwrap();
        assert_eq!(batches.len(), 2);
        assert!(batches[0].is_empty());
        assert_eq!(batches[1].len(), 1);
    }

    #[test]
    fn test_parse_events_reports_line_number() {
        let input = "{\"faces\":[]}\nnot json\n";
        let err = parse_events(input.as_bytes()).unwrap_err();
        match err {
            ReplayError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{\"faces\":[]}}").unwrap();
        let camera = ReplayCamera::load(file.path(), &settings(), ReplayPermission::Grant);
        assert!(camera.is_ok());
    }

    #[test]
    fn test_load_missing_file_errors() {
        let result = ReplayCamera::load(
            Path::new("/nonexistent/events.jsonl"),
            &settings(),
            ReplayPermission::Grant,
        );
        assert!(matches!(result, Err(ReplayError::Open { .. })));
    }

    #[test]
    fn test_permission_answers() {
        let mut grant = ReplayCamera::new(vec![], &settings(), ReplayPermission::Grant);
        let mut deny = ReplayCamera::new(vec![], &settings(), ReplayPermission::Deny);
        let mut fail = ReplayCamera::new(vec![], &settings(), ReplayPermission::Fail);
        assert!(grant.request_permission().unwrap().granted);
        assert!(!deny.request_permission().unwrap().granted);
        assert!(fail.request_permission().is_err());
    }

    #[test]
    fn test_no_events_while_paused() {
        let camera = ReplayCamera::new(vec![batch(1)], &settings(), ReplayPermission::Grant);
        let events = camera.events();
        assert!(events.recv_timeout(Duration::from_millis(100)).is_err());
    }

    #[test]
    fn test_emits_in_order_after_resume_then_disconnects() {
        let mut camera = ReplayCamera::new(
            vec![batch(1), batch(0), batch(2)],
            &settings(),
            ReplayPermission::Grant,
        );
        let events = camera.events();
        camera.resume_preview().unwrap();

        let received: Vec<usize> = events.iter().map(|b| b.len()).collect();
        assert_eq!(received, vec![1, 0, 2]);
    }

    #[test]
    fn test_duplicate_pause_and_resume_are_tolerated() {
        let mut camera = ReplayCamera::new(vec![batch(1)], &settings(), ReplayPermission::Grant);
        camera.pause_preview().unwrap();
        camera.pause_preview().unwrap();
        camera.resume_preview().unwrap();
        camera.resume_preview().unwrap();
        let events = camera.events();
        assert_eq!(
            events.recv_timeout(Duration::from_secs(2)).unwrap().len(),
            1
        );
    }

    #[test]
    fn test_pause_discards_undelivered_events() {
        let mut camera = ReplayCamera::new(
            vec![batch(1), batch(2)],
            &DetectorSettings::default().with_min_interval(Duration::from_secs(10)),
            ReplayPermission::Grant,
        );
        let events = camera.events();

        camera.resume_preview().unwrap();
        for _ in 0..200 {
            if !events.is_empty() {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(events.len(), 1);

        camera.pause_preview().unwrap();
        camera.resume_preview().unwrap();

        // The emitter is still waiting out its interval, so nothing from
        // before the pause may show up.
        assert_eq!(events.try_iter().count(), 0);
    }

    #[test]
    fn test_preview_calls_return_while_emitter_waits() {
        let mut camera = ReplayCamera::new(
            vec![batch(1), batch(1)],
            &DetectorSettings::default().with_min_interval(Duration::from_secs(10)),
            ReplayPermission::Grant,
        );
        let events = camera.events();
        camera.resume_preview().unwrap();
        events.recv_timeout(Duration::from_secs(2)).unwrap();

        let started = std::time::Instant::now();
        camera.pause_preview().unwrap();
        camera.resume_preview().unwrap();
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_drop_stops_emitter() {
        let camera = ReplayCamera::new(vec![batch(1)], &settings(), ReplayPermission::Grant);
        let events = camera.events();
        drop(camera);
        // Emitter exits without sending; the channel disconnects.
        assert!(events.recv_timeout(Duration::from_secs(2)).is_err());
    }
}
