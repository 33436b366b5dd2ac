//! Vector index trait and result types.

use ctx_embeddings::Embedding;

use crate::entry::IndexEntry;
use crate::error::IndexError;

/// A single search hit.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Entry id assigned at insert time (position in insertion order)
    pub entry_id: u64,
    /// The entry's identifier
    pub identifier: String,
    /// Cosine similarity to the query, higher is more similar
    pub score: f32,
}

/// Index statistics.
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    /// Number of stored vectors
    pub vector_count: usize,
    /// Embedding dimension, unset until the first insert
    pub dimension: Option<usize>,
}

/// Trait for vector indexes.
pub trait VectorIndex: Send + Sync {
    /// Embedding dimension, fixed by the first insert.
    fn dimension(&self) -> Option<usize>;

    /// Number of stored entries.
    fn len(&self) -> usize;

    /// Whether the index holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append an entry, returning its entry id.
    ///
    /// The first insert fixes the index dimension; later entries whose
    /// embedding length differs are rejected without modifying the store.
    fn insert(&mut self, entry: IndexEntry) -> Result<u64, IndexError>;

    /// Append several entries in order, stopping at the first rejection.
    fn insert_batch(&mut self, entries: Vec<IndexEntry>) -> Result<Vec<u64>, IndexError> {
        let mut ids = Vec::with_capacity(entries.len());
        for entry in entries {
            ids.push(self.insert(entry)?);
        }
        Ok(ids)
    }

    /// Exact top-k search, best first; ties keep insertion order.
    fn search(&self, query: &Embedding, k: usize) -> Result<Vec<SearchResult>, IndexError>;

    /// Look up a stored entry by its entry id.
    fn entry(&self, entry_id: u64) -> Option<&IndexEntry>;

    /// Current statistics.
    fn stats(&self) -> IndexStats;
}
