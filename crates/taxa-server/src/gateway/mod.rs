//! HTTP gateway (Axum) for the categorization engine.
//!
//! This module is primarily used by the `taxa` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handler::categorize_handler;
pub use state::HandlerState;

use axum::extract::State;
use taxa::Embedder;

/// Response header carrying the selection reason code.
pub const TAXA_REASON_HEADER: &str = "x-taxa-reason";

pub fn create_router_with_state<E>(state: HandlerState<E>) -> Router
where
    E: Embedder + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/categorize", post(categorize_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub embedding: &'static str,
    pub embedder_mode: &'static str,
    pub references: &'static str,
    pub taxonomy_labels: usize,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler<E>(State(state): State<HandlerState<E>>) -> Response
where
    E: Embedder + 'static,
{
    let embedder_mode = if state.categorizer.is_embedder_stub() {
        "stub"
    } else {
        "real"
    };

    let references = if state.categorizer.references_warm() {
        "warm"
    } else {
        "cold"
    };

    let components = ComponentStatus {
        http: "ready",
        embedding: "ready",
        embedder_mode,
        references,
        taxonomy_labels: state.categorizer.taxonomy().len(),
    };

    (
        StatusCode::OK,
        Json(ReadyResponse {
            status: "ok",
            components,
        }),
    )
        .into_response()
}
