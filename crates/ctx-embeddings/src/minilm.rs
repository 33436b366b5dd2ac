//! Candle-based all-MiniLM-L6-v2 encoder.
//!
//! BERT forward pass followed by attention-masked mean pooling, matching the
//! sentence-transformers reference for this model.

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::cache::{ensure_model, ModelCache, ModelPaths};
use crate::error::EncodeError;
use crate::model::{Embedder, Embedding, ModelInfo};

/// Embedding dimension for all-MiniLM-L6-v2
pub const EMBEDDING_DIM: usize = 384;

/// Maximum sequence length in tokens
pub const MAX_SEQ_LENGTH: usize = 256;

/// Local all-MiniLM-L6-v2 encoder.
pub struct MiniLmEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    info: ModelInfo,
}

impl MiniLmEmbedder {
    /// Load the encoder, resolving model files through the cache.
    pub fn load(cache: &ModelCache) -> Result<Self, EncodeError> {
        let paths = ensure_model(cache)?;
        Self::from_files(&paths)
    }

    /// Load with the default cache location and repository.
    pub fn load_default() -> Result<Self, EncodeError> {
        Self::load(&ModelCache::default())
    }

    fn from_files(paths: &ModelPaths) -> Result<Self, EncodeError> {
        info!("Loading embedding model...");

        // CPU inference only; the service holds one model for its lifetime
        let device = Device::Cpu;

        let config_str = std::fs::read_to_string(&paths.config)?;
        let config: BertConfig = serde_json::from_str(&config_str)
            .map_err(|e| EncodeError::ModelFiles(format!("Invalid config: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&paths.tokenizer)
            .map_err(|e| EncodeError::Tokenizer(e.to_string()))?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[paths.weights.clone()], DType::F32, &device)?
        };
        let model = BertModel::load(vb, &config)?;

        info!(
            dim = EMBEDDING_DIM,
            max_seq = MAX_SEQ_LENGTH,
            "Model loaded"
        );

        Ok(Self {
            model,
            tokenizer,
            device,
            info: ModelInfo {
                name: "all-MiniLM-L6-v2".to_string(),
                dimension: EMBEDDING_DIM,
                max_sequence_length: MAX_SEQ_LENGTH,
            },
        })
    }

    /// Tokenize a batch into padded id and attention-mask tensors.
    fn tokenize(&self, texts: &[&str]) -> Result<(Tensor, Tensor), EncodeError> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| EncodeError::Tokenizer(e.to_string()))?;

        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0)
            .min(MAX_SEQ_LENGTH);

        let mut input_ids: Vec<u32> = Vec::with_capacity(texts.len() * max_len);
        let mut attention_mask: Vec<u32> = Vec::with_capacity(texts.len() * max_len);

        for encoding in &encodings {
            let ids = encoding.get_ids();
            let mask = encoding.get_attention_mask();
            let keep = ids.len().min(max_len);

            input_ids.extend_from_slice(&ids[..keep]);
            input_ids.extend(std::iter::repeat(0).take(max_len - keep));
            attention_mask.extend_from_slice(&mask[..keep]);
            attention_mask.extend(std::iter::repeat(0).take(max_len - keep));
        }

        let shape = (texts.len(), max_len);
        let input_ids = Tensor::from_vec(input_ids, shape, &self.device)?;
        let attention_mask = Tensor::from_vec(attention_mask, shape, &self.device)?;
        Ok((input_ids, attention_mask))
    }
}

/// Mean pooling over token embeddings, ignoring padding positions.
fn mean_pool(hidden: &Tensor, attention_mask: &Tensor) -> Result<Tensor, candle_core::Error> {
    let mask = attention_mask
        .unsqueeze(2)?
        .broadcast_as(hidden.shape())?
        .to_dtype(DType::F32)?;

    let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
    let counts = mask.sum(1)?.clamp(1e-9, f64::MAX)?;
    summed.broadcast_div(&counts)
}

impl Embedder for MiniLmEmbedder {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EncodeError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        debug!(count = texts.len(), "Encoding batch");

        let (input_ids, attention_mask) = self.tokenize(texts)?;
        let token_type_ids = Tensor::zeros_like(&input_ids)?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let pooled = mean_pool(&hidden, &attention_mask)?;

        let rows: Vec<Vec<f32>> = pooled.to_vec2()?;
        let embeddings: Vec<Embedding> = rows.into_iter().map(Embedding::new).collect();

        debug!(count = embeddings.len(), dim = EMBEDDING_DIM, "Batch done");
        Ok(embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These exercise the real model; run with:
    // cargo test -p ctx-embeddings -- --ignored

    #[test]
    #[ignore = "requires model download"]
    fn test_load_model() {
        let embedder = MiniLmEmbedder::load_default().unwrap();
        assert_eq!(embedder.info().dimension, EMBEDDING_DIM);
    }

    #[test]
    #[ignore = "requires model download"]
    fn test_encode_single() {
        let embedder = MiniLmEmbedder::load_default().unwrap();
        let emb = embedder.encode("Hello, world!").unwrap();
        assert_eq!(emb.dimension(), EMBEDDING_DIM);
        let norm: f32 = emb.values.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 0.001);
    }

    #[test]
    #[ignore = "requires model download"]
    fn test_encode_batch_preserves_order() {
        let embedder = MiniLmEmbedder::load_default().unwrap();
        let texts = ["first text", "second text", "third text"];
        let batch = embedder.encode_batch(&texts).unwrap();
        assert_eq!(batch.len(), 3);

        // Each batch position matches the single-text encoding
        let single = embedder.encode("second text").unwrap();
        assert!((batch[1].cosine_similarity(&single) - 1.0).abs() < 0.01);
    }

    #[test]
    #[ignore = "requires model download"]
    fn test_empty_string_is_valid_input() {
        let embedder = MiniLmEmbedder::load_default().unwrap();
        let emb = embedder.encode("").unwrap();
        assert_eq!(emb.dimension(), EMBEDDING_DIM);
    }

    #[test]
    #[ignore = "requires model download"]
    fn test_similar_texts_score_higher() {
        let embedder = MiniLmEmbedder::load_default().unwrap();
        let emb1 = embedder.encode("The cat sat on the mat").unwrap();
        let emb2 = embedder.encode("A cat is sitting on a mat").unwrap();
        let emb3 = embedder.encode("Distributed consensus protocols").unwrap();

        assert!(emb1.cosine_similarity(&emb2) > emb1.cosine_similarity(&emb3));
    }
}
