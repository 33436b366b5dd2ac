//! Command implementations for the ctx binary.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use ctx_client::EmbeddingClient;
use ctx_index::{FlatIndex, VectorIndex};
use ctx_ingest::{IngestConfig, IngestPipeline, IngestStats};
use ctx_types::CtxConfig;

use crate::query::QueryLoop;

fn build_client(config: &CtxConfig) -> Result<EmbeddingClient> {
    Ok(EmbeddingClient::new(
        config.endpoint.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?)
}

async fn ingest_into(
    config: &CtxConfig,
    root: PathBuf,
    client: &EmbeddingClient,
    index: &mut dyn VectorIndex,
) -> Result<IngestStats> {
    let ingest_config = IngestConfig::new(root)
        .with_extension(config.extension.clone())
        .with_batch_size(config.batch_size);

    let pipeline = IngestPipeline::new(client.clone(), ingest_config);
    let stats = pipeline.run(index).await?;
    Ok(stats)
}

fn print_stats(stats: &IngestStats, index: &dyn VectorIndex) {
    let index_stats = index.stats();
    println!(
        "discovered {} files, indexed {}, failed {}",
        stats.discovered, stats.indexed, stats.failed
    );
    if let Some(dimension) = index_stats.dimension {
        println!(
            "index holds {} vectors of dimension {}",
            index_stats.vector_count, dimension
        );
    }
}

/// Ingest a directory tree and print the resulting stats.
pub async fn handle_ingest(config: &CtxConfig, root: PathBuf) -> Result<()> {
    let client = build_client(config)?;
    let mut index = FlatIndex::new();

    let stats = ingest_into(config, root, &client, &mut index).await?;
    print_stats(&stats, &index);
    Ok(())
}

/// Ingest a directory tree, then run the interactive query loop.
///
/// Ingestion completes before the first prompt; the two phases never touch
/// the index concurrently.
pub async fn handle_search(config: &CtxConfig, root: PathBuf) -> Result<()> {
    let client = build_client(config)?;
    let mut index = FlatIndex::new();

    let stats = ingest_into(config, root, &client, &mut index).await?;
    print_stats(&stats, &index);
    info!(top_k = config.top_k, "Entering query loop");

    let looper = QueryLoop::new(&client, &index, config.top_k);
    let stdin = io::stdin();
    looper.run(stdin.lock(), io::stdout()).await?;
    Ok(())
}
