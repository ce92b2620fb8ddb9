use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument};

use taxa::Embedder;

use crate::gateway::TAXA_REASON_HEADER;
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{
    BadRequestResponse, CategorizeRequest, CategorizeResponse, DEBUG_TOP_N, DebugInfo,
};
use crate::gateway::state::HandlerState;

/// `POST /categorize`: assigns 0-2 taxonomy labels to an article.
///
/// The body is parsed from raw bytes rather than with the `Json` extractor so
/// a malformed request maps to the contract's 400 body instead of a generic
/// rejection. An empty body is treated as `{}` (all fields default).
#[instrument(skip(state, body))]
pub async fn categorize_handler<E>(
    State(state): State<HandlerState<E>>,
    body: Bytes,
) -> Result<Response, GatewayError>
where
    E: Embedder + 'static,
{
    let raw: &[u8] = if body.is_empty() { b"{}" } else { &body };
    let request: CategorizeRequest = match serde_json::from_slice(raw) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "Malformed categorize request");
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(BadRequestResponse::bad_request()),
            )
                .into_response());
        }
    };

    let outcome = state
        .categorizer
        .categorize(&request.title, &request.text, &request.auxiliary_text)
        .await?;

    let debug_info = request.debug.then(|| DebugInfo {
        reason: outcome.reason,
        top: outcome.top(DEBUG_TOP_N).to_vec(),
        thresholds: state.categorizer.selection_config().clone(),
    });

    let mut headers = HeaderMap::new();
    headers.insert(
        TAXA_REASON_HEADER,
        HeaderValue::from_static(outcome.reason.as_str()),
    );

    Ok((
        StatusCode::OK,
        headers,
        Json(CategorizeResponse {
            categories: outcome.labels,
            debug: debug_info,
        }),
    )
        .into_response())
}
