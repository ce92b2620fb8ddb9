//! Similarity scoring: plain dot products against the reference set.
//!
//! All vectors are unit length by construction of the embedding step, so the
//! dot product equals cosine similarity. Pure functions; same inputs always
//! yield the same ordering.


use serde::Serialize;

use crate::reference::ReferenceSet;

/// A label with its similarity to the article vector. Ephemeral per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    /// Taxonomy label.
    pub label: String,
    /// Cosine similarity (dot product of unit vectors), roughly [-1, 1].
    pub score: f32,
}

/// Dot product truncated to the shorter length.
///
/// Length mismatch should not occur (all vectors share one embedder), but a
/// truncated product degrades gracefully instead of panicking.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Scores the article vector against every reference, sorted descending.
///
/// The sort is stable, so ties keep taxonomy declaration order and output is
/// deterministic.
pub fn score_against(article: &[f32], references: &ReferenceSet) -> Vec<ScoredCandidate> {
    let mut scores: Vec<ScoredCandidate> = references
        .iter()
        .map(|r| ScoredCandidate {
            label: r.label.clone(),
            score: dot(article, &r.vector),
        })
        .collect();

    scores.sort_by(|a, b| b.score.total_cmp(&a.score));
    scores
}
