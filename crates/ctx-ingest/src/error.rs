//! Ingestion error types.

use thiserror::Error;

use ctx_client::ClientError;
use ctx_index::IndexError;

/// Errors that abort an ingestion run.
///
/// With `continue_on_error` set (the default) client and index failures are
/// logged and counted instead of surfacing here; only a failed directory
/// walk always aborts.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Directory traversal failed
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Embedding request failed
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// Index rejected an entry
    #[error("Index error: {0}")]
    Index(#[from] IndexError),
}
