//! Configuration loading for ctxlib.
//!
//! Layered precedence: built-in defaults, then the config file at
//! `~/.config/ctxlib/config.toml`, then environment variables (`CTXLIB_*`),
//! then CLI flags applied by the caller after `load` returns.

use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source failed to load or deserialize
    #[error("Config error: {0}")]
    Load(String),

    /// Values failed validation
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Embedding service server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-request timeout applied by the server, in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServerSettings {
    /// Socket address string for binding.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Embedding model settings.
///
/// The model is looked up in the local cache first and only downloaded when
/// missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// HuggingFace repository id of the sentence encoder
    #[serde(default = "default_model_repo")]
    pub repo_id: String,

    /// Override for the model file cache directory
    #[serde(default)]
    pub cache_dir: Option<String>,
}

fn default_model_repo() -> String {
    "sentence-transformers/all-MiniLM-L6-v2".to_string()
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            repo_id: default_model_repo(),
            cache_dir: None,
        }
    }
}

/// Main application settings shared by the `ctx` and `ctx-server` binaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CtxConfig {
    /// Embedding service endpoint used by the client side
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// File extension ingested from the corpus root
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Documents per embedding request during ingestion
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Result count for the query loop
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Client-side request timeout, in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Model settings
    #[serde(default)]
    pub model: ModelSettings,
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_extension() -> String {
    "txt".to_string()
}

fn default_batch_size() -> usize {
    16
}

fn default_top_k() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CtxConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            extension: default_extension(),
            batch_size: default_batch_size(),
            top_k: default_top_k(),
            request_timeout_secs: default_timeout_secs(),
            log_level: default_log_level(),
            server: ServerSettings::default(),
            model: ModelSettings::default(),
        }
    }
}

impl CtxConfig {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (`~/.config/ctxlib/config.toml`)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (`CTXLIB_*`, `__` separates nested keys)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, ConfigError> {
        let config_dir = ProjectDirs::from("", "", "ctxlib")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("CTXLIB")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| ConfigError::Load(e.to_string()))?;

        let settings: Self = config
            .try_deserialize()
            .map_err(|e| ConfigError::Load(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("batch_size must be > 0".to_string()));
        }
        if self.top_k == 0 {
            return Err(ConfigError::Invalid("top_k must be > 0".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CtxConfig::default();
        assert_eq!(config.endpoint, "http://127.0.0.1:8000");
        assert_eq!(config.extension, "txt");
        assert_eq!(config.batch_size, 16);
        assert_eq!(config.top_k, 5);
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.model.repo_id, "sentence-transformers/all-MiniLM-L6-v2");
    }

    #[test]
    fn test_server_addr() {
        let config = CtxConfig::default();
        assert_eq!(config.server.addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_validate_rejects_zero_batch_size() {
        let config = CtxConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_top_k() {
        let config = CtxConfig {
            top_k: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "batch_size = 4\nextension = \"md\"\n").unwrap();

        let config = CtxConfig::load(Some(&path.to_string_lossy())).unwrap();
        assert_eq!(config.batch_size, 4);
        assert_eq!(config.extension, "md");
        // Untouched fields keep their defaults
        assert_eq!(config.top_k, 5);
    }
}
