//! Shared server state.

use std::sync::Arc;

use ctx_embeddings::Embedder;

/// State shared across request handlers.
///
/// The embedder is loaded once at startup, owned here and dropped on
/// shutdown; it holds no mutable cross-request state, so handlers can share
/// it without locking.
pub struct AppState {
    pub embedder: Arc<dyn Embedder>,
}

impl AppState {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }
}
