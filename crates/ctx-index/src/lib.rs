//! # ctx-index
//!
//! In-memory exact nearest-neighbor index for ctxlib.
//!
//! Every query scores every stored entry with cosine similarity, so results
//! are the true top-k (no approximation, no skipped candidates) and are
//! deterministic for a fixed insertion order. This is the baseline any
//! approximate index would be benchmarked against.
//!
//! The store is append-only for the process lifetime: no deletes, no
//! updates, no persistence. Identifiers are not keys; inserting the same
//! identifier twice keeps both entries.

pub mod entry;
pub mod error;
pub mod flat;
pub mod index;

pub use entry::{IndexEntry, Payload};
pub use error::IndexError;
pub use flat::FlatIndex;
pub use index::{IndexStats, SearchResult, VectorIndex};
