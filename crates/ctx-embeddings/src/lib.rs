//! # ctx-embeddings
//!
//! Sentence embedding generation for ctxlib using Candle.
//!
//! The embedding service wraps a local all-MiniLM-L6-v2 encoder (384
//! dimensions) behind the [`Embedder`] trait so callers never depend on the
//! model stack directly. Model files are fetched once from HuggingFace Hub
//! and reused from the local cache on every later start.

pub mod cache;
pub mod error;
pub mod minilm;
pub mod model;

pub use cache::{ensure_model, ModelCache, ModelPaths, MODEL_FILES};
pub use error::EncodeError;
pub use minilm::{MiniLmEmbedder, EMBEDDING_DIM, MAX_SEQ_LENGTH};
pub use model::{Embedder, Embedding, ModelInfo};
