//! Embedding error types.

use thiserror::Error;

/// Errors that can occur while encoding text.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Candle model error
    #[error("Candle error: {0}")]
    Candle(#[from] candle_core::Error),

    /// Tokenizer error
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// Model file missing or unreadable
    #[error("Model file error: {0}")]
    ModelFiles(String),

    /// Download error
    #[error("Failed to download model: {0}")]
    Download(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Model produced no or malformed output
    #[error("Model error: {0}")]
    Model(String),
}
