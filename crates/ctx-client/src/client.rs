//! Embedding service client.

use std::time::Duration;

use tracing::debug;

use ctx_protocol::{EmbedOutcome, ProtocolError, RequestDoc, ResponseDoc, GENERATE_ROUTE};

use crate::error::ClientError;

/// Default endpoint for a locally running embedding service.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";

/// Client for the embedding service.
#[derive(Debug, Clone)]
pub struct EmbeddingClient {
    http: reqwest::Client,
    base_url: String,
}

impl EmbeddingClient {
    /// Create a client for the given endpoint with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    fn generate_url(&self) -> String {
        format!("{}{}", self.base_url, GENERATE_ROUTE)
    }

    /// Embed a batch of documents.
    ///
    /// Returns one outcome per document in request order. A timed-out call
    /// surfaces as [`ClientError::Transport`], like any other transport
    /// failure.
    pub async fn embed_batch(&self, docs: &[RequestDoc]) -> Result<Vec<ResponseDoc>, ClientError> {
        debug!(count = docs.len(), url = %self.generate_url(), "Sending embedding batch");

        let response = self.http.post(self.generate_url()).json(docs).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        let outcomes: Vec<ResponseDoc> = response.json().await?;
        if outcomes.len() != docs.len() {
            return Err(ProtocolError::LengthMismatch {
                expected: docs.len(),
                actual: outcomes.len(),
            }
            .into());
        }

        debug!(count = outcomes.len(), "Batch response received");
        Ok(outcomes)
    }

    /// Embed a single text, unwrapping the singleton batch.
    ///
    /// A per-document failure is returned as [`ClientError::DocumentFailed`]
    /// since the one document is the whole request.
    pub async fn embed_text(
        &self,
        identifier: &str,
        text: &str,
    ) -> Result<Vec<f32>, ClientError> {
        let docs = [RequestDoc::new(identifier, text)];
        let mut outcomes = self.embed_batch(&docs).await?;

        match outcomes.pop().map(|doc| doc.outcome) {
            Some(EmbedOutcome::Success { embedding }) => Ok(embedding),
            Some(EmbedOutcome::Failure { error }) => Err(ClientError::DocumentFailed {
                identifier: identifier.to_string(),
                reason: error,
            }),
            // Unreachable: embed_batch already checked the length
            None => Err(ProtocolError::LengthMismatch {
                expected: 1,
                actual: 0,
            }
            .into()),
        }
    }
}
