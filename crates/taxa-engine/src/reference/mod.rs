//! Category reference vectors: lazily computed, cached for the process
//! lifetime, immutable once warm.
//!
//! Warm-up is guarded with single-flight semantics: concurrent cold-start
//! callers await one in-flight computation instead of each issuing duplicate
//! embedding calls. A failed warm-up is not memoized; the next caller
//! retries, so a transient embedder outage does not poison the store.


use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::info;

use crate::embedding::{Embedder, EmbeddingError};
use crate::taxonomy::Taxonomy;

/// One label's embedded descriptor.
#[derive(Debug, Clone)]
pub struct ReferenceVector {
    /// Taxonomy label.
    pub label: String,
    /// Embedding of the label's description (unit length).
    pub vector: Vec<f32>,
}

/// The full warmed set of reference vectors, in taxonomy declaration order.
#[derive(Debug)]
pub struct ReferenceSet {
    entries: Vec<ReferenceVector>,
}

impl ReferenceSet {
    /// Builds a set from precomputed references (order is preserved).
    pub fn from_entries(entries: Vec<ReferenceVector>) -> Self {
        Self { entries }
    }

    /// References in taxonomy order.
    pub fn iter(&self) -> impl Iterator<Item = &ReferenceVector> {
        self.entries.iter()
    }

    /// Number of references (equals the taxonomy size).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no references are held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Owner of the process-lifetime reference-vector cache.
#[derive(Debug, Default)]
pub struct ReferenceStore {
    cell: OnceCell<Arc<ReferenceSet>>,
}

impl ReferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the warmed reference set, computing it on first call.
    ///
    /// At most one embedding call is issued per label per process lifetime;
    /// concurrent first-time callers share the in-flight warm-up.
    pub async fn ensure<E: Embedder>(
        &self,
        taxonomy: &Taxonomy,
        embedder: &E,
    ) -> Result<Arc<ReferenceSet>, EmbeddingError> {
        self.cell
            .get_or_try_init(|| async {
                let mut entries = Vec::with_capacity(taxonomy.len());
                for descriptor in taxonomy.entries() {
                    let vector = embedder.embed(&descriptor.description)?;
                    entries.push(ReferenceVector {
                        label: descriptor.label.clone(),
                        vector,
                    });
                }

                info!(labels = entries.len(), "Category reference vectors warmed");
                Ok(Arc::new(ReferenceSet { entries }))
            })
            .await
            .map(Arc::clone)
    }

    /// Returns `true` once the cache is populated.
    pub fn is_warm(&self) -> bool {
        self.cell.initialized()
    }
}
