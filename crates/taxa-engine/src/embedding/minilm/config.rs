use std::path::PathBuf;

use crate::embedding::error::EmbeddingError;

/// Default MiniLM output dimension (all-MiniLM-L6-v2 hidden size).
pub const MINILM_EMBEDDING_DIM: usize = 384;

/// Default max tokens per input (the model's trained sequence length).
pub const MINILM_MAX_SEQ_LEN: usize = 256;

/// Configuration for [`MiniLmEmbedder`](super::MiniLmEmbedder).
///
/// `model_dir` must contain `config.json`, `model.safetensors` and
/// `tokenizer.json` (the sentence-transformers export layout).
#[derive(Debug, Clone)]
pub struct MiniLmConfig {
    /// Directory holding the model files.
    pub model_dir: PathBuf,
    /// Max tokens to consider; longer inputs are truncated.
    pub max_seq_len: usize,
    /// Output embedding dimension.
    pub embedding_dim: usize,
    /// If true, run in deterministic stub mode (no model files required).
    pub testing_stub: bool,
}

impl Default for MiniLmConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::new(),
            max_seq_len: MINILM_MAX_SEQ_LEN,
            embedding_dim: MINILM_EMBEDDING_DIM,
            testing_stub: false,
        }
    }
}

impl MiniLmConfig {
    /// Creates a config for a model directory.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; produces deterministic embeddings).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    /// Validates required fields for non-stub mode.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be non-zero".to_string(),
            });
        }

        if self.testing_stub {
            return Ok(());
        }

        if self.model_dir.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_dir is required (stubbing is disabled)".to_string(),
            });
        }

        if !self.model_dir.is_dir() {
            return Err(EmbeddingError::ModelNotFound {
                path: self.model_dir.clone(),
            });
        }

        Ok(())
    }

    /// Path to the BERT config file.
    pub fn bert_config_path(&self) -> PathBuf {
        self.model_dir.join("config.json")
    }

    /// Path to the safetensors weights.
    pub fn weights_path(&self) -> PathBuf {
        self.model_dir.join("model.safetensors")
    }

    /// Path to `tokenizer.json`.
    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir.join("tokenizer.json")
    }

    /// Returns `true` if all model files are present.
    pub fn model_available(&self) -> bool {
        self.bert_config_path().is_file()
            && self.weights_path().is_file()
            && self.tokenizer_path().is_file()
    }
}
