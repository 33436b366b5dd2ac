//! Test support for end-to-end runs of the ctxlib loop.
//!
//! Provides a deterministic stub embedder and a helper that serves it over
//! the real router on an ephemeral port, so the client, pipeline and index
//! are exercised against actual HTTP without downloading a model.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use ctx_embeddings::{Embedder, Embedding, EncodeError, ModelInfo};
use ctx_server::{build_router, AppState};

/// Marker that makes the stub embedder reject a text.
pub const FAIL_MARKER: &str = "[[fail]]";

/// Stub dimension, small enough to eyeball in assertions.
pub const STUB_DIM: usize = 8;

/// Deterministic embedder: the same text always maps to the same vector,
/// and any text containing [`FAIL_MARKER`] fails to encode.
pub struct StubEmbedder {
    info: ModelInfo,
}

impl StubEmbedder {
    pub fn new() -> Self {
        Self {
            info: ModelInfo {
                name: "stub-embedder".to_string(),
                dimension: STUB_DIM,
                max_sequence_length: 512,
            },
        }
    }
}

impl Default for StubEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold the text's bytes into a fixed-dimension vector.
pub fn stub_vector(text: &str) -> Vec<f32> {
    let mut values = vec![0.0f32; STUB_DIM];
    for (i, b) in text.bytes().enumerate() {
        values[i % STUB_DIM] += b as f32 / 255.0;
    }
    if values.iter().all(|v| *v == 0.0) {
        values[0] = 1.0;
    }
    values
}

impl Embedder for StubEmbedder {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EncodeError> {
        texts
            .iter()
            .map(|text| {
                if text.contains(FAIL_MARKER) {
                    return Err(EncodeError::Model("stub failure".to_string()));
                }
                Ok(Embedding::new(stub_vector(text)))
            })
            .collect()
    }
}

/// Serve the stub embedder on an ephemeral local port.
///
/// Returns the bound address and the server task handle; aborting the handle
/// stops the server.
pub async fn spawn_stub_server() -> (SocketAddr, JoinHandle<()>) {
    let state = Arc::new(AppState::new(Arc::new(StubEmbedder::new())));
    let app = build_router(state, Duration::from_secs(10));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    (addr, handle)
}
