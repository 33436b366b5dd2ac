//! ctxlib embedding service
//!
//! # Usage
//!
//! ```bash
//! ctx-server [--host HOST] [--port PORT] [--model-repo REPO]
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/ctxlib/config.toml)
//! 3. Environment variables (CTXLIB_*)
//! 4. CLI flags

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use ctx_embeddings::{Embedder, MiniLmEmbedder, ModelCache};
use ctx_server::{build_router, init_tracing, serve, AppState, Cli};
use ctx_types::CtxConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CtxConfig::load(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(repo) = cli.model_repo {
        config.model.repo_id = repo;
    }
    if let Some(dir) = cli.model_cache_dir {
        config.model.cache_dir = Some(dir);
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_tracing(&config.log_level);

    let cache = ModelCache::from_settings(&config.model);
    info!(repo = %cache.repo_id, "Loading embedding model");
    let embedder = tokio::task::spawn_blocking(move || MiniLmEmbedder::load(&cache)).await??;
    info!(
        model = %embedder.info().name,
        dim = embedder.info().dimension,
        "Model ready"
    );

    let state = Arc::new(AppState::new(Arc::new(embedder)));
    let app = build_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr: SocketAddr = config.server.addr().parse()?;
    serve(addr, app).await?;

    Ok(())
}
