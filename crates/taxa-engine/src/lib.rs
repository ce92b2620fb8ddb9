//! Taxa library crate (used by the server and integration tests).
//!
//! Embedding-based categorization for news articles: given free-form text,
//! assign zero, one, or two labels from a fixed taxonomy using vector
//! similarity against per-category reference embeddings, with a tiered
//! threshold policy and a guaranteed `"general"` fallback.
//!
//! # Public API Surface
//!
//! ## Core Types (Stable)
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`Taxonomy`], [`CategoryDescriptor`] - The fixed label set and its glosses
//! - [`Categorizer`], [`Categorization`] - Per-request orchestration
//!
//! ## Embedding & Scoring
//! - [`Embedder`] - Pluggable embedding capability
//! - [`MiniLmEmbedder`], [`MiniLmConfig`] - BERT sentence embeddings (candle)
//! - [`ReferenceStore`], [`ReferenceSet`] - Cached category reference vectors
//! - [`score_against`], [`ScoredCandidate`] - Dot-product similarity ranking
//!
//! ## Selection Policy
//! - [`SelectionConfig`] - Tunable thresholds (validated at startup)
//! - [`select`], [`Selection`], [`SelectionReason`] - The decision policy
//! - [`FALLBACK_LABEL`] - The `"general"` sentinel
//!
//! ## Test/Mock Support
//! [`MockEmbedder`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod embedding;
pub mod reference;
pub mod scoring;
pub mod selection;
pub mod service;
pub mod taxonomy;

pub use config::{Config, ConfigError};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
pub use embedding::{
    Embedder, EmbeddingError, MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmConfig,
    MiniLmEmbedder,
};
pub use reference::{ReferenceSet, ReferenceStore, ReferenceVector};
pub use scoring::{ScoredCandidate, dot, score_against};
pub use selection::{
    MAX_PICKABLE_LABELS, Selection, SelectionConfig, SelectionError, SelectionReason, select,
};
pub use service::{Categorization, CategorizeError, Categorizer};
pub use taxonomy::{CategoryDescriptor, FALLBACK_LABEL, Taxonomy, TaxonomyError};
