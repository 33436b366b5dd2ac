//! Error types for the embedding client.

use thiserror::Error;

use ctx_protocol::ProtocolError;

/// Errors that can occur when calling the embedding service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, timeout or body decode failure; the whole batch failed
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response violated the wire contract
    #[error("Protocol violation: {0}")]
    Protocol(#[from] ProtocolError),

    /// A single submitted document was rejected by the model
    #[error("Document {identifier} failed to encode: {reason}")]
    DocumentFailed { identifier: String, reason: String },
}
