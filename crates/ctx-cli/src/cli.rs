//! CLI argument parsing for the ctx binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// ctxlib command-line client
///
/// Embeds text files through the embedding service and retrieves the
/// documents most similar to a free-text query.
#[derive(Parser, Debug)]
#[command(name = "ctx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/ctxlib/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// ctx commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Embed a directory tree and print ingestion stats
    Ingest {
        /// Corpus root directory
        root: PathBuf,

        /// File extension to ingest
        #[arg(short = 'x', long)]
        extension: Option<String>,

        /// Embedding service endpoint
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Documents per embedding request
        #[arg(short, long)]
        batch_size: Option<usize>,
    },

    /// Embed a directory tree, then query it interactively
    Search {
        /// Corpus root directory
        root: PathBuf,

        /// File extension to ingest
        #[arg(short = 'x', long)]
        extension: Option<String>,

        /// Embedding service endpoint
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Documents per embedding request
        #[arg(short, long)]
        batch_size: Option<usize>,

        /// Results per query
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },
}
