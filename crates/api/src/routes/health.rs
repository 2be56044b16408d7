use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use toyshop_core::types::Timestamp;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status (`ok`, or `degraded` when the database is
    /// unreachable).
    pub status: &'static str,
    /// Time of the check.
    pub timestamp: Timestamp,
    /// Whole seconds since process start.
    pub uptime: u64,
}

/// GET /health -- liveness plus a database reachability probe.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = toyshop_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        timestamp: chrono::Utc::now(),
        uptime: state.started_at.elapsed().as_secs(),
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
