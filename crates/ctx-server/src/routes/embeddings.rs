//! Batch embedding generation handler.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use tracing::{debug, warn};

use ctx_embeddings::Embedder;
use ctx_protocol::{RequestDoc, ResponseDoc};

use crate::error::ServerError;
use crate::state::AppState;

/// `POST /embeddings/generate`
///
/// Encodes each document of the batch independently so one model failure
/// cannot void the rest. The response has the same length and order as the
/// request. Inference is CPU-bound, so the batch runs on the blocking pool.
pub async fn generate_embeddings(
    State(state): State<Arc<AppState>>,
    Json(batch): Json<Vec<RequestDoc>>,
) -> Result<Json<Vec<ResponseDoc>>, ServerError> {
    if batch.is_empty() {
        return Err(ServerError::EmptyBatch);
    }

    debug!(count = batch.len(), "Embedding batch received");

    let embedder = state.embedder.clone();
    let outcomes = tokio::task::spawn_blocking(move || encode_isolated(embedder.as_ref(), &batch))
        .await
        .map_err(|e| ServerError::Internal(format!("encode task failed: {}", e)))?;

    Ok(Json(outcomes))
}

/// Encode each document on its own, turning model errors into per-document
/// failure outcomes.
fn encode_isolated(embedder: &dyn Embedder, batch: &[RequestDoc]) -> Vec<ResponseDoc> {
    batch
        .iter()
        .map(|doc| match embedder.encode(&doc.text) {
            Ok(embedding) => ResponseDoc::success(doc.identifier.as_str(), embedding.into_values()),
            Err(err) => {
                warn!(identifier = %doc.identifier, error = %err, "Document failed to encode");
                ResponseDoc::failure(doc.identifier.as_str(), err.to_string())
            }
        })
        .collect()
}
