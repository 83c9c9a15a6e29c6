//! Root greeting, liveness and readiness handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use domain::{health_status, HealthStatus, ROOT_MESSAGE};

use crate::state::AppState;

/// Root endpoint body.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Hello, world!")]
    pub message: String,
}

/// Readiness probe body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Routes shared by every variant; they need no state.
pub fn probe_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}

/// Greeting
#[utoipa::path(
    get,
    path = "/",
    tag = "Probes",
    responses((status = 200, description = "Greeting", body = MessageResponse))
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: ROOT_MESSAGE.to_string(),
    })
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    tag = "Probes",
    responses((status = 200, description = "Service is alive", body = HealthStatus))
)]
pub async fn health_check() -> (StatusCode, Json<HealthStatus>) {
    (StatusCode::OK, Json(health_status()))
}

/// Readiness probe - verifies database connectivity.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Probes",
    responses(
        (status = 200, description = "Database reachable", body = ReadinessResponse),
        (status = 503, description = "Database unreachable", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    match state.database.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadinessResponse {
                status: "ready".to_string(),
                error: None,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("Readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessResponse {
                    status: "unavailable".to_string(),
                    error: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    }
}
