//! ctx CLI library exports.
//!
//! The `ctx` binary ingests a directory tree into an in-memory vector index
//! and answers free-text queries against it. Ingestion always completes
//! before querying starts, so the index needs no locking.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (ingest, search)
//! - `query`: Interactive query loop

pub mod cli;
pub mod commands;
pub mod query;

pub use cli::{Cli, Commands};
pub use commands::{handle_ingest, handle_search};
pub use query::QueryLoop;
