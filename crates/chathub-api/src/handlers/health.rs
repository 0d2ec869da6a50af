//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/health/detailed
pub async fn health_detailed(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    let (status, hub, users) = match state.realtime.members().await {
        Ok(snapshot) => ("ok", "running", snapshot.users),
        Err(_) => ("degraded", "stopped", Vec::new()),
    };

    Json(DetailedHealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        hub: hub.to_string(),
        members: users.len(),
        users,
        metrics: state.realtime.metrics(),
    })
}
