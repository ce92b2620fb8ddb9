//! Per-request orchestration: combine text, warm references, embed, score,
//! select.
//!
//! Stateless per request apart from the shared reference-vector cache. No
//! retries live here; retry policy belongs to the caller.

#[cfg(test)]
mod tests;

use thiserror::Error;
use tracing::debug;

use crate::embedding::{Embedder, EmbeddingError};
use crate::reference::ReferenceStore;
use crate::scoring::{ScoredCandidate, score_against};
use crate::selection::{SelectionConfig, SelectionError, SelectionReason, select};
use crate::taxonomy::{FALLBACK_LABEL, Taxonomy};

/// Errors from the categorization service.
///
/// Infrastructure failures surface here; they are never silently substituted
/// with the fallback label, so operators can tell an embedder outage apart
/// from confidently uncategorizable text.
#[derive(Debug, Error)]
pub enum CategorizeError {
    #[error("embedding unavailable: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("invalid selection config: {0}")]
    InvalidSelectionConfig(#[from] SelectionError),
}

/// Outcome of one categorization request.
#[derive(Debug, Clone)]
pub struct Categorization {
    /// 1-2 taxonomy labels, or exactly `["general"]`.
    pub labels: Vec<String>,
    /// Why the selector chose these labels.
    pub reason: SelectionReason,
    /// Full sorted score list (empty when the input was empty). Diagnostic
    /// only; truncating or inspecting it never changes the selection.
    pub scores: Vec<ScoredCandidate>,
}

impl Categorization {
    /// Top `n` scored candidates, for debug payloads.
    pub fn top(&self, n: usize) -> &[ScoredCandidate] {
        &self.scores[..self.scores.len().min(n)]
    }
}

/// The categorization engine: embedder, taxonomy, reference cache and
/// selection thresholds behind one entry point.
#[derive(Debug)]
pub struct Categorizer<E: Embedder> {
    embedder: E,
    taxonomy: Taxonomy,
    references: ReferenceStore,
    selection: SelectionConfig,
}

impl<E: Embedder> Categorizer<E> {
    /// Builds the engine, rejecting incoherent thresholds up front.
    pub fn new(
        embedder: E,
        taxonomy: Taxonomy,
        selection: SelectionConfig,
    ) -> Result<Self, CategorizeError> {
        selection.validate()?;

        Ok(Self {
            embedder,
            taxonomy,
            references: ReferenceStore::new(),
            selection,
        })
    }

    /// Categorizes an article from its parts.
    ///
    /// `title`, `auxiliary_text` and `text` are combined in that fixed order.
    /// Empty combined text short-circuits to the fallback without invoking
    /// the embedder (embedding an empty string is semantically degenerate).
    pub async fn categorize(
        &self,
        title: &str,
        text: &str,
        auxiliary_text: &str,
    ) -> Result<Categorization, CategorizeError> {
        let combined = combine_text(title, auxiliary_text, text);
        if combined.is_empty() {
            debug!("Empty combined text, returning fallback without embedding");
            return Ok(Categorization {
                labels: vec![FALLBACK_LABEL.to_string()],
                reason: SelectionReason::NoScores,
                scores: Vec::new(),
            });
        }

        let references = self.references.ensure(&self.taxonomy, &self.embedder).await?;
        let article = self.embedder.embed(&combined)?;

        let scores = score_against(&article, &references);
        let selection = select(&scores, &self.selection);

        debug!(
            labels = ?selection.labels,
            reason = %selection.reason,
            top_score = scores.first().map(|s| s.score),
            "Categorized article"
        );

        Ok(Categorization {
            labels: selection.labels,
            reason: selection.reason,
            scores,
        })
    }

    /// Warms the reference cache ahead of the first request.
    pub async fn warm_references(&self) -> Result<(), CategorizeError> {
        self.references
            .ensure(&self.taxonomy, &self.embedder)
            .await
            .map(drop)
            .map_err(Into::into)
    }

    /// Active thresholds (echoed in debug payloads).
    pub fn selection_config(&self) -> &SelectionConfig {
        &self.selection
    }

    /// The taxonomy this engine scores against.
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Returns `true` if the embedder produces synthetic vectors.
    pub fn is_embedder_stub(&self) -> bool {
        self.embedder.is_stub()
    }

    /// Returns `true` once the reference cache is populated.
    pub fn references_warm(&self) -> bool {
        self.references.is_warm()
    }
}

/// Combines the request parts in the contract's fixed order and trims.
fn combine_text(title: &str, auxiliary_text: &str, text: &str) -> String {
    format!("{title}\n\n{auxiliary_text}\n\n{text}")
        .trim()
        .to_string()
}
