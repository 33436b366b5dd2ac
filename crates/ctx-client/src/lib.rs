//! # ctx-client
//!
//! HTTP client for the ctxlib embedding service.
//!
//! Wraps the wire contract from `ctx-protocol`: a batch of documents is
//! POSTed as one request and the per-document outcomes come back in request
//! order. Any transport problem (connection refused, timeout, non-success
//! status, undecodable body) fails the whole batch; the caller must not
//! assume any document in it succeeded.

pub mod client;
pub mod error;

pub use client::{EmbeddingClient, DEFAULT_ENDPOINT};
pub use error::ClientError;
