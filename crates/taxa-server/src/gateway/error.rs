use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use taxa::CategorizeError;

/// Gateway-level failures.
///
/// Infrastructure failures map to 5xx so operators can tell an embedder
/// outage apart from a confident `"general"` fallback, which is a 200.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("categorization failed: {0}")]
    Categorization(#[from] CategorizeError),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::Categorization(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
