//! Request and response message types.

use serde::{Deserialize, Serialize};

use ctx_types::Document;

use crate::error::ProtocolError;

/// Route for batch embedding generation.
pub const GENERATE_ROUTE: &str = "/embeddings/generate";

/// One request document.
///
/// Unknown fields are rejected so a client cannot smuggle a precomputed
/// `embedding` (or anything else) past the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestDoc {
    /// Caller-chosen identifier, echoed back in the response
    pub identifier: String,
    /// Text to embed; the empty string is valid input
    pub text: String,
}

impl RequestDoc {
    pub fn new(identifier: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            text: text.into(),
        }
    }
}

impl TryFrom<&Document> for RequestDoc {
    type Error = ProtocolError;

    fn try_from(doc: &Document) -> Result<Self, Self::Error> {
        match &doc.text {
            Some(text) => Ok(Self::new(doc.identifier.as_str(), text.as_str())),
            None => Err(ProtocolError::MissingText {
                identifier: doc.identifier.clone(),
            }),
        }
    }
}

/// Per-document result: an embedding or the reason it could not be computed.
///
/// Serialized untagged so the wire shape is `{"embedding": [...]}` or
/// `{"error": "..."}` merged into the response document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbedOutcome {
    Success { embedding: Vec<f32> },
    Failure { error: String },
}

/// One response document, at the same position as its request document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDoc {
    /// Identifier echoed from the request
    pub identifier: String,
    #[serde(flatten)]
    pub outcome: EmbedOutcome,
}

impl ResponseDoc {
    /// Successful outcome carrying the embedding.
    pub fn success(identifier: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            identifier: identifier.into(),
            outcome: EmbedOutcome::Success { embedding },
        }
    }

    /// Failed outcome carrying the reason.
    pub fn failure(identifier: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            outcome: EmbedOutcome::Failure {
                error: error.into(),
            },
        }
    }

    /// The embedding, if this document succeeded.
    pub fn embedding(&self) -> Option<&[f32]> {
        match &self.outcome {
            EmbedOutcome::Success { embedding } => Some(embedding),
            EmbedOutcome::Failure { .. } => None,
        }
    }

    /// The error message, if this document failed.
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            EmbedOutcome::Success { .. } => None,
            EmbedOutcome::Failure { error } => Some(error),
        }
    }
}
