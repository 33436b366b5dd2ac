//! Ingestion pipeline: discover, read, embed, insert.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use ctx_client::EmbeddingClient;
use ctx_embeddings::Embedding;
use ctx_index::{IndexEntry, VectorIndex};
use ctx_protocol::{EmbedOutcome, RequestDoc};
use ctx_types::Document;

use crate::error::IngestError;

/// Configuration for an ingestion run.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Root directory to walk
    pub root: PathBuf,
    /// File extension to ingest (without the dot)
    pub extension: String,
    /// Documents per embedding request
    pub batch_size: usize,
    /// Keep going when a batch or insert fails
    pub continue_on_error: bool,
}

impl IngestConfig {
    /// Create a config for the given root with default settings.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: "txt".to_string(),
            batch_size: 16,
            continue_on_error: true,
        }
    }

    /// Set the ingested file extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Set the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set whether to continue on batch and insert errors.
    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }
}

/// Result of an ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Candidate files found under the root
    pub discovered: usize,
    /// Entries inserted into the index
    pub indexed: usize,
    /// Files skipped for any reason
    pub failed: usize,
}

/// Pipeline turning a directory tree into index entries.
pub struct IngestPipeline {
    client: EmbeddingClient,
    config: IngestConfig,
}

impl IngestPipeline {
    pub fn new(client: EmbeddingClient, config: IngestConfig) -> Self {
        Self { client, config }
    }

    /// Run the pipeline, inserting embedded documents into `index`.
    pub async fn run(&self, index: &mut dyn VectorIndex) -> Result<IngestStats, IngestError> {
        let files = discover_files(&self.config.root, &self.config.extension)?;

        let mut stats = IngestStats {
            discovered: files.len(),
            ..Default::default()
        };
        info!(
            count = files.len(),
            root = %self.config.root.display(),
            extension = %self.config.extension,
            "Discovered files"
        );

        let mut loaded: Vec<(RequestDoc, String)> = Vec::with_capacity(files.len());
        for path in &files {
            match fs::read_to_string(path) {
                Ok(text) => {
                    let doc = Document::new(identifier_for(&self.config.root, path))
                        .with_text(text.as_str());
                    match RequestDoc::try_from(&doc) {
                        Ok(request) => loaded.push((request, text)),
                        Err(err) => {
                            warn!(identifier = %doc.identifier, error = %err, "Skipping document");
                            stats.failed += 1;
                        }
                    }
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Skipping unreadable file");
                    stats.failed += 1;
                }
            }
        }

        for chunk in loaded.chunks(self.config.batch_size.max(1)) {
            let request: Vec<RequestDoc> = chunk.iter().map(|(doc, _)| doc.clone()).collect();

            let responses = match self.client.embed_batch(&request).await {
                Ok(responses) => responses,
                Err(err) => {
                    if !self.config.continue_on_error {
                        return Err(err.into());
                    }
                    warn!(
                        count = chunk.len(),
                        error = %err,
                        "Batch failed, skipping its files"
                    );
                    stats.failed += chunk.len();
                    continue;
                }
            };

            for ((doc, text), response) in chunk.iter().zip(responses) {
                match response.outcome {
                    EmbedOutcome::Success { embedding } => {
                        let entry = IndexEntry::new(
                            doc.identifier.as_str(),
                            Embedding::new(embedding),
                            text.clone(),
                        );
                        match index.insert(entry) {
                            Ok(entry_id) => {
                                debug!(entry_id, identifier = %doc.identifier, "Indexed");
                                stats.indexed += 1;
                            }
                            Err(err) => {
                                if !self.config.continue_on_error {
                                    return Err(err.into());
                                }
                                warn!(identifier = %doc.identifier, error = %err, "Insert rejected");
                                stats.failed += 1;
                            }
                        }
                    }
                    EmbedOutcome::Failure { error } => {
                        warn!(identifier = %doc.identifier, error = %error, "Document failed to encode");
                        stats.failed += 1;
                    }
                }
            }
        }

        info!(
            discovered = stats.discovered,
            indexed = stats.indexed,
            failed = stats.failed,
            "Ingest complete"
        );
        Ok(stats)
    }
}

/// Find files under `root` with the given extension, in a stable order.
///
/// Sorted traversal keeps insertion order (and therefore tie-breaking and
/// entry ids) reproducible across runs over the same tree.
pub fn discover_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>, IngestError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|e| e.to_str()) == Some(extension)
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn identifier_for(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "alpha").unwrap();
        fs::write(dir.path().join("b.md"), "beta").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/c.txt"), "gamma").unwrap();

        let files = discover_files(dir.path(), "txt").unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.extension().unwrap() == "txt"));
    }

    #[test]
    fn test_discover_order_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("c.txt"), "c").unwrap();

        let first = discover_files(dir.path(), "txt").unwrap();
        let second = discover_files(dir.path(), "txt").unwrap();
        assert_eq!(first, second);

        let names: Vec<_> = first
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn test_discover_missing_root_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(discover_files(&missing, "txt").is_err());
    }

    #[test]
    fn test_identifier_is_relative_to_root() {
        let root = Path::new("/corpus");
        let path = Path::new("/corpus/sub/a.txt");
        assert_eq!(identifier_for(root, path), "sub/a.txt");
    }

    #[test]
    fn test_config_builders() {
        let config = IngestConfig::new("/corpus")
            .with_extension("md")
            .with_batch_size(4)
            .with_continue_on_error(false);
        assert_eq!(config.extension, "md");
        assert_eq!(config.batch_size, 4);
        assert!(!config.continue_on_error);
    }
}
