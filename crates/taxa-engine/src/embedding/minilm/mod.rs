//! MiniLM sentence embedder (BERT + mean pooling + L2 normalization).
//!
//! Mirrors the upstream `all-MiniLM-L6-v2` feature-extraction pipeline:
//! tokenize, transformer forward pass, mean-pool the token states, normalize
//! to unit length. Use [`MiniLmConfig::stub`] for tests and dev environments
//! without model files.

/// MiniLM configuration.
pub mod config;

#[cfg(test)]
mod tests;

pub use config::{MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmConfig};

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info, warn};

use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::{Embedder, l2_normalize, seeded_embedding};

enum EmbedderBackend {
    Model {
        model: BertModel,
        tokenizer: Tokenizer,
        device: Device,
    },
    Stub,
}

/// Sentence embedder backing the categorization engine (supports stub mode).
pub struct MiniLmEmbedder {
    backend: EmbedderBackend,
    config: MiniLmConfig,
}

impl std::fmt::Debug for MiniLmEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiniLmEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.config.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl MiniLmEmbedder {
    /// Loads the embedder from a config (stub mode is supported).
    pub fn load(config: MiniLmConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("MiniLM embedder running in STUB mode (testing only)");
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                config,
            });
        }

        if !config.model_available() {
            return Err(EmbeddingError::ModelNotFound {
                path: config.model_dir.clone(),
            });
        }

        let device = select_device();
        debug!(?device, "Selected compute device for MiniLM");

        let (model, tokenizer) = Self::load_model(&config, &device)?;

        info!(
            model_dir = %config.model_dir.display(),
            embedding_dim = config.embedding_dim,
            max_seq_len = config.max_seq_len,
            "MiniLM embedder loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                model,
                tokenizer,
                device,
            },
            config,
        })
    }

    fn load_model(
        config: &MiniLmConfig,
        device: &Device,
    ) -> Result<(BertModel, Tokenizer), EmbeddingError> {
        let config_content = std::fs::read_to_string(config.bert_config_path())?;
        let bert_config: BertConfig = serde_json::from_str(&config_content).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("failed to parse model config: {e}"),
            }
        })?;

        if config.embedding_dim > bert_config.hidden_size {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!(
                    "embedding_dim ({}) exceeds model hidden_size ({})",
                    config.embedding_dim, bert_config.hidden_size
                ),
            });
        }

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[config.weights_path()], DType::F32, device)
        }
        .map_err(|e| EmbeddingError::ModelLoadFailed {
            reason: format!("failed to map safetensors: {e}"),
        })?;

        let model =
            BertModel::load(vb, &bert_config).map_err(|e| EmbeddingError::ModelLoadFailed {
                reason: format!("failed to load BERT weights: {e}"),
            })?;

        let mut tokenizer = Tokenizer::from_file(config.tokenizer_path()).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("failed to load tokenizer: {e}"),
            }
        })?;

        let truncation = TruncationParams {
            max_length: config.max_seq_len,
            ..Default::default()
        };
        tokenizer.with_truncation(Some(truncation)).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("failed to configure truncation: {e}"),
            }
        })?;

        Ok((model, tokenizer))
    }

    fn embed_with_model(
        &self,
        text: &str,
        model: &BertModel,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let tokens = encoding.get_ids();
        if tokens.is_empty() {
            return Ok(vec![0.0; self.config.embedding_dim]);
        }

        debug!(
            text_len = text.len(),
            token_count = tokens.len(),
            "Generating embedding (transformer forward pass)"
        );

        let input_ids = Tensor::new(tokens, device)?.unsqueeze(0)?;
        let token_type_ids = input_ids.zeros_like()?;

        // hidden_states: [1, seq_len, hidden_size]
        let hidden_states = model
            .forward(&input_ids, &token_type_ids, None)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("transformer forward pass failed: {e}"),
            })?;

        // Single unpadded sequence, so a plain mean over the token axis
        // equals attention-mask-weighted mean pooling.
        let mut embedding = hidden_states.mean(1)?.squeeze(0)?.to_vec1::<f32>()?;
        embedding.truncate(self.config.embedding_dim);

        Ok(l2_normalize(embedding))
    }

    /// Returns the embedder configuration.
    pub fn config(&self) -> &MiniLmConfig {
        &self.config
    }

    /// Returns `true` if a model is loaded.
    pub fn has_model(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Model { .. })
    }
}

impl Embedder for MiniLmEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EmbedderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.embed_with_model(text, model, tokenizer, device),
            EmbedderBackend::Stub => {
                debug!(text_len = text.len(), "Generating stub embedding");
                Ok(seeded_embedding(text, self.config.embedding_dim))
            }
        }
    }

    fn dim(&self) -> usize {
        self.config.embedding_dim
    }

    fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }
}
