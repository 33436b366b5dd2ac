//! Exact flat index: brute-force cosine scan over all stored entries.

use std::cmp::Ordering;

use ctx_embeddings::Embedding;
use tracing::debug;

use crate::entry::IndexEntry;
use crate::error::IndexError;
use crate::index::{IndexStats, SearchResult, VectorIndex};

/// Append-only in-memory index with exact search.
///
/// Each query is O(N * D): every entry is scored against the query and the
/// true top-k is returned. Inserts are O(1) amortized appends.
#[derive(Debug, Default)]
pub struct FlatIndex {
    entries: Vec<IndexEntry>,
    dimension: Option<usize>,
}

impl FlatIndex {
    /// Create an empty index; the first insert fixes the dimension.
    pub fn new() -> Self {
        Self::default()
    }
}

impl VectorIndex for FlatIndex {
    fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn insert(&mut self, entry: IndexEntry) -> Result<u64, IndexError> {
        let actual = entry.embedding.dimension();
        match self.dimension {
            Some(expected) if expected != actual => {
                return Err(IndexError::DimensionMismatch { expected, actual });
            }
            Some(_) => {}
            None => self.dimension = Some(actual),
        }

        let entry_id = self.entries.len() as u64;
        debug!(entry_id, identifier = %entry.identifier, "Inserted entry");
        self.entries.push(entry);
        Ok(entry_id)
    }

    fn search(&self, query: &Embedding, k: usize) -> Result<Vec<SearchResult>, IndexError> {
        if self.entries.is_empty() {
            return Err(IndexError::EmptyIndex);
        }

        // Non-empty, so the dimension is fixed
        let expected = self.dimension.unwrap_or_default();
        if query.dimension() != expected {
            return Err(IndexError::DimensionMismatch {
                expected,
                actual: query.dimension(),
            });
        }

        let mut results: Vec<SearchResult> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| SearchResult {
                entry_id: i as u64,
                identifier: entry.identifier.clone(),
                score: entry.embedding.cosine_similarity(query),
            })
            .collect();

        // Stable sort keeps insertion order for equal scores
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        results.truncate(k);

        debug!(k, found = results.len(), "Search complete");
        Ok(results)
    }

    fn entry(&self, entry_id: u64) -> Option<&IndexEntry> {
        self.entries.get(entry_id as usize)
    }

    fn stats(&self) -> IndexStats {
        IndexStats {
            vector_count: self.entries.len(),
            dimension: self.dimension,
        }
    }
}
