//! Liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use quest_service::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// `GET /health`. Answers as long as the process is up.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// `GET /health/ready`. Also checks that a database connection can be
/// acquired; reports 503 when it cannot.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let database = state.service_context().pool().acquire().await.is_ok();

    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(ReadinessResponse::ready(database)))
}
