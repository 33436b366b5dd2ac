//! Document domain type.
//!
//! A document starts as an identifier, gets its text loaded once, and may
//! later carry the raw embedding returned by the embedding service.

use serde::{Deserialize, Serialize};

/// A unit of text submitted for embedding.
///
/// The identifier is typically the file path the text was read from, but any
/// caller-chosen string works; identifiers are not required to be unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Source identifier (file path or synthetic name)
    pub identifier: String,

    /// Text content, unset until loaded
    #[serde(default)]
    pub text: Option<String>,

    /// Raw embedding vector, unset until computed by the service
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
}

impl Document {
    /// Create a document with no text loaded yet.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            text: None,
            embedding: None,
        }
    }

    /// Set the text content (builder pattern).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Attach the computed embedding (builder pattern).
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Whether an embedding has been attached.
    pub fn has_embedding(&self) -> bool {
        self.embedding.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_no_text() {
        let doc = Document::new("notes/a.txt");
        assert_eq!(doc.identifier, "notes/a.txt");
        assert!(doc.text.is_none());
        assert!(!doc.has_embedding());
    }

    #[test]
    fn test_builder_chain() {
        let doc = Document::new("a.txt")
            .with_text("hello")
            .with_embedding(vec![0.1, 0.2]);
        assert_eq!(doc.text.as_deref(), Some("hello"));
        assert!(doc.has_embedding());
    }

    #[test]
    fn test_serde_round_trip() {
        let doc = Document::new("a.txt").with_text("hello");
        let json = serde_json::to_string(&doc).unwrap();
        let decoded: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, doc);
    }

    #[test]
    fn test_deserialize_minimal() {
        let doc: Document = serde_json::from_str(r#"{"identifier":"a"}"#).unwrap();
        assert_eq!(doc.identifier, "a");
        assert!(doc.text.is_none());
        assert!(doc.embedding.is_none());
    }
}
