//! CLI argument parsing for the embedding service binary.

use clap::Parser;

/// ctxlib embedding service
///
/// Serves batch embedding generation over HTTP for ingestion pipelines and
/// query clients.
#[derive(Parser, Debug)]
#[command(name = "ctx-server")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/ctxlib/config.toml)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Override bind host
    #[arg(long)]
    pub host: Option<String>,

    /// Override bind port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the model repository id
    #[arg(long)]
    pub model_repo: Option<String>,

    /// Override the model cache directory
    #[arg(long)]
    pub model_cache_dir: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["ctx-server"]);
        assert!(cli.config.is_none());
        assert!(cli.port.is_none());
    }

    #[test]
    fn test_cli_port_override() {
        let cli = Cli::parse_from(["ctx-server", "-p", "9000"]);
        assert_eq!(cli.port, Some(9000));
    }

    #[test]
    fn test_cli_model_overrides() {
        let cli = Cli::parse_from([
            "ctx-server",
            "--model-repo",
            "org/other-model",
            "--model-cache-dir",
            "/tmp/models",
        ]);
        assert_eq!(cli.model_repo.as_deref(), Some("org/other-model"));
        assert_eq!(cli.model_cache_dir.as_deref(), Some("/tmp/models"));
    }
}
