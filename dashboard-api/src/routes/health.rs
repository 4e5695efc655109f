//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use dashboard_services::RefreshStats;
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    /// Snapshots published so far
    generation: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_updated: Option<String>,
    refresh: RefreshStats,
}

/// Health check handler
///
/// `starting` until the first cycle finishes, then `healthy` or `degraded`
/// depending on whether the latest cycle succeeded.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let stats = state.refresh.stats();
    let current = state.store.current();

    let status = if stats.is_healthy() {
        "healthy"
    } else if stats.attempts == 0 {
        "starting"
    } else {
        "degraded"
    };

    let code = if status == "healthy" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: status.to_string(),
        generation: current.generation,
        last_updated: current.last_updated_display.clone(),
        refresh: stats,
    };

    (code, Json(response))
}

/// Simple liveness check (always returns OK if server is running)
async fn liveness() -> &'static str {
    "OK"
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
}
