//! Embedding capability.
//!
//! - [`Embedder`] is the seam the engine is written against.
//! - [`minilm`] provides the production sentence embedder (candle BERT).
//! - [`MockEmbedder`] (test/mock builds) returns scripted vectors.

/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// MiniLM sentence embedder.
pub mod minilm;

#[cfg(any(test, feature = "mock"))]
mod mock;

pub use error::EmbeddingError;
pub use minilm::{MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmConfig, MiniLmEmbedder};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;

/// Converts a text span into a fixed-length dense vector.
///
/// Implementations must return L2-normalized vectors of [`Self::dim`] length;
/// downstream similarity is a plain dot product, which equals cosine
/// similarity only under that precondition.
pub trait Embedder: Send + Sync {
    /// Embeds a single string.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Output vector length.
    fn dim(&self) -> usize;

    /// Returns `true` if this embedder produces synthetic (non-model) vectors.
    fn is_stub(&self) -> bool {
        false
    }
}

impl<E: Embedder + ?Sized> Embedder for std::sync::Arc<E> {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed(text)
    }

    fn dim(&self) -> usize {
        (**self).dim()
    }

    fn is_stub(&self) -> bool {
        (**self).is_stub()
    }
}

/// Scales a vector to unit length in place (no-op on the zero vector).
pub(crate) fn l2_normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}

/// Deterministic pseudo-embedding seeded from the text's hash.
///
/// Shared by the MiniLM stub backend and [`MockEmbedder`] so both produce the
/// same vector for the same text.
pub(crate) fn seeded_embedding(text: &str, dim: usize) -> Vec<f32> {
    use std::hash::{DefaultHasher, Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    let seed = hasher.finish();

    let mut embedding = Vec::with_capacity(dim);
    let mut state = seed;

    for _ in 0..dim {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
        embedding.push(value);
    }

    l2_normalize(embedding)
}
