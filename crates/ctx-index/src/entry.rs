//! Index entry and payload types.

use std::collections::HashMap;

use ctx_embeddings::Embedding;

/// Original text and metadata carried alongside a vector.
#[derive(Debug, Clone)]
pub struct Payload {
    /// Text the embedding was computed from
    pub text: String,
    /// Free-form metadata
    pub metadata: HashMap<String, String>,
}

impl Payload {
    /// Short single-line preview of the text for display.
    pub fn preview(&self, max_chars: usize) -> String {
        let line = self.text.lines().next().unwrap_or("");
        let mut preview: String = line.chars().take(max_chars).collect();
        if line.chars().count() > max_chars {
            preview.push_str("...");
        }
        preview
    }
}

/// A vector plus its identifier and payload, owned by the index.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    /// Source identifier (not unique; duplicates are kept)
    pub identifier: String,
    /// The stored embedding
    pub embedding: Embedding,
    /// Original text and metadata
    pub payload: Payload,
}

impl IndexEntry {
    /// Create an entry from an identifier, its embedding and the source text.
    pub fn new(
        identifier: impl Into<String>,
        embedding: Embedding,
        text: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            embedding,
            payload: Payload {
                text: text.into(),
                metadata: HashMap::new(),
            },
        }
    }

    /// Attach a metadata key/value pair (builder pattern).
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.payload.metadata.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_builder() {
        let entry = IndexEntry::new("a.txt", Embedding::new(vec![1.0, 0.0]), "hello")
            .with_metadata("lang", "en");
        assert_eq!(entry.identifier, "a.txt");
        assert_eq!(entry.payload.text, "hello");
        assert_eq!(entry.payload.metadata.get("lang").map(String::as_str), Some("en"));
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let payload = Payload {
            text: "héllo wörld this is a long line".to_string(),
            metadata: HashMap::new(),
        };
        let preview = payload.preview(10);
        assert!(preview.starts_with("héllo wör"));
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_preview_keeps_first_line_only() {
        let payload = Payload {
            text: "first\nsecond".to_string(),
            metadata: HashMap::new(),
        };
        assert_eq!(payload.preview(80), "first");
    }
}
