use thiserror::Error;

use crate::detection::domain::detection_batch::DetectionBatch;

#[derive(Error, Debug)]
pub enum ForwardError {
    #[error("failed to encode detection batch: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("server at {url} answered {status}: {body}")]
    Status { url: String, status: u16, body: String },
}

/// Delivers one detection batch to the remote collaborator and returns the
/// response body.
///
/// Blocking; callers that must not block dispatch it on their own thread.
pub trait BatchTransport: Send + Sync {
    fn send(&self, batch: &DetectionBatch) -> Result<String, ForwardError>;
}
