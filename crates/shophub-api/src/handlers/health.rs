//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// `"connected"`, `"unavailable"` or `"memory"`.
    pub database: String,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match &state.db_pool {
        None => "memory",
        Some(pool) => match pool.health_check().await {
            Ok(true) => "connected",
            Ok(false) | Err(_) => "unavailable",
        },
    };
    let healthy = database != "unavailable";

    let status = if healthy {
        StatusCode::OK
    } else {
        tracing::warn!("Health check failed: database unavailable");
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: database.to_string(),
        }),
    )
}
