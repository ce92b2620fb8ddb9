//! Label selection: the tiered decision policy over sorted similarity scores.
//!
//! Three independent absolute floors plus one relative-ratio gate bias the
//! engine toward precision over recall: emitting the safe `"general"`
//! fallback is preferred to emitting a wrong or noisy label.
//!
//! All thresholds are configuration, not constants; they are tuned
//! empirically and must be retunable without redeploying logic.


use serde::Serialize;
use thiserror::Error;

use crate::scoring::ScoredCandidate;
use crate::taxonomy::FALLBACK_LABEL;

/// Hard cap on emitted labels. The policy never returns more than two.
pub const MAX_PICKABLE_LABELS: usize = 2;

/// Tunable thresholds for [`select`].
///
/// Serializes with the wire names consumers already log against
/// (`MIN_SCORE`, `SOFT_TOP_FLOOR`, ...), echoed in debug payloads.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionConfig {
    /// Hard minimum: below this a candidate is never usable.
    #[serde(rename = "MIN_SCORE")]
    pub min_score: f32,

    /// Circuit breaker: if even the best match is below this, give up and
    /// return the fallback. Must not exceed `min_score`.
    #[serde(rename = "SOFT_TOP_FLOOR")]
    pub soft_top_floor: f32,

    /// Absolute floor a second label must clear on its own.
    #[serde(rename = "SECOND_MIN_SCORE")]
    pub second_min_score: f32,

    /// A second label must also score at least `second_ratio * top score`.
    #[serde(rename = "SECOND_RATIO")]
    pub second_ratio: f32,

    /// How many labels may be emitted (1 or 2).
    #[serde(rename = "MAX_LABELS")]
    pub max_labels: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            min_score: 0.14,
            soft_top_floor: 0.14,
            second_min_score: 0.11,
            second_ratio: 0.70,
            max_labels: MAX_PICKABLE_LABELS,
        }
    }
}

/// Errors from validating a [`SelectionConfig`]. Rejected at startup, never
/// discovered mid-request.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("threshold '{name}' must be a finite number")]
    NonFiniteThreshold { name: &'static str },

    #[error("second_ratio must be within [0, 1], got {value}")]
    RatioOutOfRange { value: f32 },

    #[error(
        "soft_top_floor ({soft_top_floor}) must not exceed min_score ({min_score}); \
         the two-tier gating is meaningless otherwise"
    )]
    FloorOrdering { soft_top_floor: f32, min_score: f32 },

    #[error("max_labels must be between 1 and {MAX_PICKABLE_LABELS}, got {value}")]
    MaxLabelsOutOfRange { value: usize },
}

impl SelectionConfig {
    /// Validates threshold invariants.
    pub fn validate(&self) -> Result<(), SelectionError> {
        for (name, value) in [
            ("min_score", self.min_score),
            ("soft_top_floor", self.soft_top_floor),
            ("second_min_score", self.second_min_score),
            ("second_ratio", self.second_ratio),
        ] {
            if !value.is_finite() {
                return Err(SelectionError::NonFiniteThreshold { name });
            }
        }

        if !(0.0..=1.0).contains(&self.second_ratio) {
            return Err(SelectionError::RatioOutOfRange {
                value: self.second_ratio,
            });
        }

        if self.soft_top_floor > self.min_score {
            return Err(SelectionError::FloorOrdering {
                soft_top_floor: self.soft_top_floor,
                min_score: self.min_score,
            });
        }

        if self.max_labels == 0 || self.max_labels > MAX_PICKABLE_LABELS {
            return Err(SelectionError::MaxLabelsOutOfRange {
                value: self.max_labels,
            });
        }

        Ok(())
    }
}

/// Why the selector produced its label set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionReason {
    /// The candidate list was empty.
    NoScores,
    /// The best score did not clear the soft floor.
    TopBelowSoftFloor,
    /// The soft floor passed but nothing cleared the hard minimum.
    NoneAboveMinScore,
    /// At least one label was confidently picked.
    PickedOk,
    /// Safety net: the accepted list ended up empty.
    PickedEmpty,
}

impl SelectionReason {
    /// Wire code for this reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionReason::NoScores => "no_scores",
            SelectionReason::TopBelowSoftFloor => "top_below_soft_floor",
            SelectionReason::NoneAboveMinScore => "none_above_min_score",
            SelectionReason::PickedOk => "picked_ok",
            SelectionReason::PickedEmpty => "picked_empty",
        }
    }
}

impl std::fmt::Display for SelectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The selector's verdict: 1-2 taxonomy labels, or the fallback alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Accepted labels, primary first. Exactly `["general"]` on fallback.
    pub labels: Vec<String>,
    /// Reason code.
    pub reason: SelectionReason,
}

impl Selection {
    fn fallback(reason: SelectionReason) -> Self {
        Self {
            labels: vec![FALLBACK_LABEL.to_string()],
            reason,
        }
    }

    /// Returns `true` if the fallback label was emitted.
    pub fn is_fallback(&self) -> bool {
        self.labels.len() == 1 && self.labels[0] == FALLBACK_LABEL
    }
}

/// Picks up to [`SelectionConfig::max_labels`] labels from candidates sorted
/// descending by score.
///
/// The top candidate must clear `soft_top_floor` or the whole taxonomy is
/// considered a poor fit for the text. Candidates must then clear the harder
/// `min_score` to be eligible at all; a weak-but-not-terrible top score can
/// pass the first gate and still fail here. A second label needs both its own
/// absolute floor and proximity to the leader, so an unrelated category
/// cannot ride along just because it crossed a floor independently.
pub fn select(candidates: &[ScoredCandidate], config: &SelectionConfig) -> Selection {
    let Some(top) = candidates.first() else {
        return Selection::fallback(SelectionReason::NoScores);
    };

    if top.score < config.soft_top_floor {
        return Selection::fallback(SelectionReason::TopBelowSoftFloor);
    }

    let eligible: Vec<&ScoredCandidate> = candidates
        .iter()
        .filter(|c| c.score >= config.min_score)
        .collect();

    let Some(primary) = eligible.first() else {
        return Selection::fallback(SelectionReason::NoneAboveMinScore);
    };

    let mut picked = vec![primary.label.clone()];

    if config.max_labels >= 2 {
        if let Some(second) = eligible.iter().find(|c| c.label != primary.label) {
            let close_enough = second.score >= top.score * config.second_ratio;
            let strong_enough = second.score >= config.second_min_score;
            if close_enough && strong_enough {
                picked.push(second.label.clone());
            }
        }
    }

    if picked.is_empty() {
        return Selection::fallback(SelectionReason::PickedEmpty);
    }

    Selection {
        labels: picked,
        reason: SelectionReason::PickedOk,
    }
}
