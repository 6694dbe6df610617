use std::collections::HashMap;
use std::time::Instant;

use crate::forwarding::domain::result_forwarder::ForwardOutcome;

/// Cross-cutting observer for viewer session events.
///
/// Keeps the viewer free of any particular output mechanism; the CLI logs a
/// summary, the desktop app and tests discard everything.
pub trait SessionLogger: Send {
    /// Record one handled detection event.
    fn frame(&mut self, face_count: usize);

    /// Record how long a named handler stage took.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record the fate of one forwarded batch.
    fn forwarded(&mut self, outcome: &ForwardOutcome);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-session summary. Default: no-op.
    fn summary(&self) {}
}

pub struct NullSessionLogger;

impl SessionLogger for NullSessionLogger {
    fn frame(&mut self, _face_count: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn forwarded(&mut self, _outcome: &ForwardOutcome) {}
    fn info(&mut self, _message: &str) {}
}

/// Counts frames, faces and forward outcomes and reports them through the
/// `log` crate when the session ends.
pub struct StdoutSessionLogger {
    frames: usize,
    empty_frames: usize,
    faces: usize,
    delivered: usize,
    dropped: usize,
    timings: HashMap<String, Vec<f64>>,
    start_time: Instant,
}

impl StdoutSessionLogger {
    pub fn new() -> Self {
        Self {
            frames: 0,
            empty_frames: 0,
            faces: 0,
            delivered: 0,
            dropped: 0,
            timings: HashMap::new(),
            start_time: Instant::now(),
        }
    }

    /// Returns the formatted summary, or `None` if no frame was handled.
    pub fn summary_string(&self) -> Option<String> {
        if self.frames == 0 {
            return None;
        }

        let elapsed_s = self.start_time.elapsed().as_secs_f64();
        let avg_faces = self.faces as f64 / self.frames as f64;
        let mut lines = vec![
            format!(
                "Session summary ({} frames, {elapsed_s:.1}s total):",
                self.frames
            ),
            format!("  faces: {} total, avg {avg_faces:.1} per frame", self.faces),
            format!("  empty frames: {}", self.empty_frames),
            format!(
                "  forwarded: {} delivered, {} dropped",
                self.delivered, self.dropped
            ),
        ];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let avg_ms = durations.iter().sum::<f64>() / durations.len().max(1) as f64;
            lines.push(format!("  {stage:12}: avg {avg_ms:6.2}ms"));
        }

        Some(lines.join("\n"))
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn delivered(&self) -> usize {
        self.delivered
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl Default for StdoutSessionLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionLogger for StdoutSessionLogger {
    fn frame(&mut self, face_count: usize) {
        self.frames += 1;
        self.faces += face_count;
        if face_count == 0 {
            self.empty_frames += 1;
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn forwarded(&mut self, outcome: &ForwardOutcome) {
        match outcome {
            ForwardOutcome::Delivered { .. } => self.delivered += 1,
            ForwardOutcome::Dropped { .. } => self.dropped += 1,
        }
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
