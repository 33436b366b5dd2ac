//! # ctx-types
//!
//! Shared domain types for the ctxlib context retrieval system.
//!
//! This crate defines the data structures passed between the ingestion
//! pipeline, the embedding protocol and the query loop:
//! - Documents: a unit of text identified by its source path
//! - Configuration: layered settings shared by the client and server binaries

pub mod config;
pub mod document;

pub use config::{ConfigError, CtxConfig, ModelSettings, ServerSettings};
pub use document::Document;
