use crate::detection::domain::detection_batch::DetectionBatch;

/// What happened to one forwarded batch. Observed for logging only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ForwardOutcome {
    Delivered { faces: usize },
    Dropped { faces: usize, reason: String },
}

/// Ships detection batches off-device without blocking the caller.
///
/// `forward` returns immediately. Delivery failures are logged by the
/// implementation and never reported back to the caller.
pub trait ResultForwarder: Send {
    fn forward(&self, batch: DetectionBatch);
}

/// Forwarder used when result forwarding is switched off.
pub struct NullResultForwarder;

impl ResultForwarder for NullResultForwarder {
    fn forward(&self, _batch: DetectionBatch) {}
}
