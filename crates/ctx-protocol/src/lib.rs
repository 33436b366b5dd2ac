//! # ctx-protocol
//!
//! Wire contract between embedding clients and the embedding service.
//!
//! One route: `POST /embeddings/generate`. The request body is a JSON array
//! of `{identifier, text}` documents; the response body is a JSON array of
//! the same length and order where each entry is either
//! `{identifier, embedding}` or `{identifier, error}`. Clients correlate by
//! position, so duplicate identifiers are harmless.
//!
//! A transport-level failure (connection, timeout, malformed payload) voids
//! the whole batch; per-document failures void only their own entry.

pub mod error;
pub mod wire;

pub use error::ProtocolError;
pub use wire::{EmbedOutcome, RequestDoc, ResponseDoc, GENERATE_ROUTE};
