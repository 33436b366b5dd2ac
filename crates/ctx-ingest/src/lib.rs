//! # ctx-ingest
//!
//! Ingestion pipeline for ctxlib.
//!
//! Walks a directory tree for text files, reads them, sends them through the
//! embedding protocol in configurable batches and inserts the results into a
//! vector index. Per-file failures (unreadable file, per-document encode
//! error, rejected insert) are logged and skipped; a transport failure drops
//! only the batch it hit. One run never aborts because of a bad file.
//!
//! Re-running over the same tree appends duplicate entries: the index is
//! in-memory only and identifiers are not keys.

pub mod error;
pub mod pipeline;

pub use error::IngestError;
pub use pipeline::{discover_files, IngestConfig, IngestPipeline, IngestStats};
