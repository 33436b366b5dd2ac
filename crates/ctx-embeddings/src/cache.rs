//! Model file caching.
//!
//! Model files are looked up in the local cache first and only fetched from
//! HuggingFace Hub when missing, so later starts work offline.

use std::path::PathBuf;

use tracing::{debug, info};

use ctx_types::ModelSettings;

use crate::error::EncodeError;

/// Files required to run the encoder
pub const MODEL_FILES: &[&str] = &["config.json", "tokenizer.json", "model.safetensors"];

/// Model cache configuration.
#[derive(Debug, Clone)]
pub struct ModelCache {
    /// Cache directory path
    pub cache_dir: PathBuf,
    /// Model repository id
    pub repo_id: String,
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::from_settings(&ModelSettings::default())
    }
}

impl ModelCache {
    /// Create a cache with explicit settings.
    pub fn new(cache_dir: impl Into<PathBuf>, repo_id: impl Into<String>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            repo_id: repo_id.into(),
        }
    }

    /// Build a cache from configuration, falling back to the user cache dir.
    pub fn from_settings(settings: &ModelSettings) -> Self {
        let cache_dir = settings
            .cache_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::cache_dir()
                    .unwrap_or_else(|| PathBuf::from(".cache"))
                    .join("ctxlib")
                    .join("models")
            });

        Self {
            cache_dir,
            repo_id: settings.repo_id.clone(),
        }
    }

    /// Directory holding this repo's files.
    pub fn model_dir(&self) -> PathBuf {
        self.cache_dir.join(self.repo_id.replace('/', "_"))
    }

    /// Whether all required files are present locally.
    pub fn is_cached(&self) -> bool {
        let model_dir = self.model_dir();
        MODEL_FILES.iter().all(|f| model_dir.join(f).exists())
    }

    /// Path to a specific model file.
    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.model_dir().join(filename)
    }
}

/// Paths to the three model files.
#[derive(Debug, Clone)]
pub struct ModelPaths {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
}

/// Resolve model files, downloading them on first use.
pub fn ensure_model(cache: &ModelCache) -> Result<ModelPaths, EncodeError> {
    let model_dir = cache.model_dir();

    if cache.is_cached() {
        debug!(path = ?model_dir, "Using cached model");
    } else {
        info!(repo = %cache.repo_id, "Downloading model files...");
        download_model_files(cache)?;
    }

    Ok(ModelPaths {
        config: model_dir.join("config.json"),
        tokenizer: model_dir.join("tokenizer.json"),
        weights: model_dir.join("model.safetensors"),
    })
}

fn download_model_files(cache: &ModelCache) -> Result<(), EncodeError> {
    use hf_hub::api::sync::Api;

    let api = Api::new().map_err(|e| EncodeError::Download(e.to_string()))?;
    let repo = api.model(cache.repo_id.clone());

    std::fs::create_dir_all(cache.model_dir())?;

    for filename in MODEL_FILES {
        info!(file = filename, "Downloading...");
        let source_path = repo
            .get(filename)
            .map_err(|e| EncodeError::Download(format!("{}: {}", filename, e)))?;

        let dest_path = cache.file_path(filename);
        std::fs::copy(&source_path, &dest_path)?;
        debug!(file = filename, "Downloaded to {:?}", dest_path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cache_uses_configured_repo() {
        let cache = ModelCache::default();
        assert!(cache.cache_dir.to_string_lossy().contains("ctxlib"));
        assert_eq!(cache.repo_id, "sentence-transformers/all-MiniLM-L6-v2");
    }

    #[test]
    fn test_settings_override_cache_dir() {
        let temp = tempfile::tempdir().unwrap();
        let settings = ModelSettings {
            repo_id: "test/model".to_string(),
            cache_dir: Some(temp.path().to_string_lossy().to_string()),
        };
        let cache = ModelCache::from_settings(&settings);
        assert_eq!(cache.cache_dir, temp.path());
        assert!(!cache.is_cached());
    }

    #[test]
    fn test_model_dir_flattens_repo_id() {
        let cache = ModelCache::new("/tmp/cache", "org/model");
        assert!(cache.model_dir().ends_with("org_model"));
    }
}
