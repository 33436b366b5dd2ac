//! ctxlib command-line client
//!
//! # Usage
//!
//! ```bash
//! ctx ingest <ROOT> [--extension EXT] [--endpoint URL] [--batch-size N]
//! ctx search <ROOT> [--extension EXT] [--endpoint URL] [--top-k K]
//! ```
//!
//! `search` embeds every matching file under ROOT through the embedding
//! service, then reads queries from stdin until `exit`.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ctx_cli::{handle_ingest, handle_search, Cli, Commands};
use ctx_types::CtxConfig;

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn apply_overrides(
    config: &mut CtxConfig,
    extension: Option<String>,
    endpoint: Option<String>,
    batch_size: Option<usize>,
    top_k: Option<usize>,
) {
    if let Some(extension) = extension {
        config.extension = extension;
    }
    if let Some(endpoint) = endpoint {
        config.endpoint = endpoint;
    }
    if let Some(batch_size) = batch_size {
        config.batch_size = batch_size;
    }
    if let Some(top_k) = top_k {
        config.top_k = top_k;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CtxConfig::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    init_tracing(&config.log_level);

    match cli.command {
        Commands::Ingest {
            root,
            extension,
            endpoint,
            batch_size,
        } => {
            apply_overrides(&mut config, extension, endpoint, batch_size, None);
            config.validate()?;
            handle_ingest(&config, root).await?;
        }
        Commands::Search {
            root,
            extension,
            endpoint,
            batch_size,
            top_k,
        } => {
            apply_overrides(&mut config, extension, endpoint, batch_size, top_k);
            config.validate()?;
            handle_search(&config, root).await?;
        }
    }

    Ok(())
}
