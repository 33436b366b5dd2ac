//! Protocol error types.

use thiserror::Error;

/// Violations of the wire contract.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A document was submitted for embedding before its text was loaded
    #[error("Document {identifier} has no text")]
    MissingText { identifier: String },

    /// The response length does not match the request length
    #[error("Response length mismatch: sent {expected} documents, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
