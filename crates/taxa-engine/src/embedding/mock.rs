//! Deterministic mock embedder for policy and gateway tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::{Embedder, EmbeddingError, seeded_embedding};

/// Test embedder returning scripted vectors with an invocation counter.
///
/// Texts without a scripted vector fall back to the same seeded deterministic
/// embedding the stub backend produces. Scripted vectors are returned exactly
/// as given (hand-craft unit vectors when the test exercises thresholds).
#[derive(Debug)]
pub struct MockEmbedder {
    dim: usize,
    scripted: HashMap<String, Vec<f32>>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl MockEmbedder {
    /// Creates a mock producing vectors of the given length.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            scripted: HashMap::new(),
            calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// Scripts an exact vector for an exact input text.
    pub fn with_vector(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.scripted.insert(text.to_string(), vector);
        self
    }

    /// Number of `embed` invocations so far (failed calls included).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Makes subsequent `embed` calls fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl Embedder for MockEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            return Err(EmbeddingError::InferenceFailed {
                reason: "mock embedder configured to fail".to_string(),
            });
        }

        Ok(self
            .scripted
            .get(text)
            .cloned()
            .unwrap_or_else(|| seeded_embedding(text, self.dim)))
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn is_stub(&self) -> bool {
        true
    }
}
