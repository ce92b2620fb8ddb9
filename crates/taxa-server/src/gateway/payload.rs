//! Wire types for the categorize endpoint.

use serde::{Deserialize, Serialize};

use taxa::{ScoredCandidate, SelectionConfig, SelectionReason};

/// How many scored candidates the debug payload exposes.
pub const DEBUG_TOP_N: usize = 10;

/// `POST /categorize` request body. All fields optional.
#[derive(Debug, Default, Deserialize)]
pub struct CategorizeRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub auxiliary_text: String,
    #[serde(default)]
    pub debug: bool,
}

/// Success response: 1-2 labels, plus diagnostics when requested.
#[derive(Debug, Serialize)]
pub struct CategorizeResponse {
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugInfo>,
}

/// Operator-facing diagnostics. Visibility only; never changes the outcome.
#[derive(Debug, Serialize)]
pub struct DebugInfo {
    pub reason: SelectionReason,
    pub top: Vec<ScoredCandidate>,
    pub thresholds: SelectionConfig,
}

/// Body for unparsable requests: the safe fallback plus an error marker.
#[derive(Debug, Serialize)]
pub struct BadRequestResponse {
    pub categories: Vec<&'static str>,
    pub error: &'static str,
}

impl BadRequestResponse {
    pub fn bad_request() -> Self {
        Self {
            categories: vec![taxa::FALLBACK_LABEL],
            error: "bad_request",
        }
    }
}
