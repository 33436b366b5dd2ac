//! # ctx-server
//!
//! HTTP embedding service for ctxlib.
//!
//! Wraps a loaded [`ctx_embeddings::Embedder`] behind the wire contract from
//! `ctx-protocol`: `POST /embeddings/generate` takes a batch of documents and
//! returns one outcome per document in request order, isolating model
//! failures to the document that caused them. `GET /health` reports the
//! loaded model.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing
//! - `error`: HTTP error mapping
//! - `routes`: Request handlers
//! - `server`: Router assembly, serving and shutdown
//! - `state`: Shared handler state

pub mod cli;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use cli::Cli;
pub use error::ServerError;
pub use server::{build_router, init_tracing, serve};
pub use state::AppState;
