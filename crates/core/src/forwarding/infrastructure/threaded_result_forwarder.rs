use std::sync::Arc;
use std::thread;

use crossbeam_channel::Sender;

use crate::detection::domain::detection_batch::DetectionBatch;
use crate::forwarding::domain::batch_transport::BatchTransport;
use crate::forwarding::domain::result_forwarder::{ForwardOutcome, ResultForwarder};

/// Fire-and-forget forwarder: one detached thread per batch.
///
/// Requests from different frames may overlap; none is retried. When an
/// outcome channel is attached, each finished request publishes one
/// `ForwardOutcome` on it.
pub struct ThreadedResultForwarder {
    transport: Arc<dyn BatchTransport>,
    outcomes: Option<Sender<ForwardOutcome>>,
}

impl ThreadedResultForwarder {
    pub fn new(transport: Arc<dyn BatchTransport>) -> Self {
        Self {
            transport,
            outcomes: None,
        }
    }

    pub fn with_outcomes(mut self, outcomes: Sender<ForwardOutcome>) -> Self {
        self.outcomes = Some(outcomes);
        self
    }
}

impl ResultForwarder for ThreadedResultForwarder {
    fn forward(&self, batch: DetectionBatch) {
        let transport = self.transport.clone();
        let outcomes = self.outcomes.clone();

        thread::spawn(move || {
            let faces = batch.len();
            let outcome = match transport.send(&batch) {
                Ok(body) => {
                    log::info!("Server response: {body}");
                    ForwardOutcome::Delivered { faces }
                }
                Err(e) => {
                    log::error!("Error sending faces to server: {e}");
                    ForwardOutcome::Dropped {
                        faces,
                        reason: e.to_string(),
                    }
                }
            };
            if let Some(tx) = outcomes {
                let _ = tx.send(outcome);
            }
        });
    }
}
