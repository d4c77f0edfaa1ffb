//! Health check endpoints
//!
//! - /health - Basic health check
//! - /health/ready - Readiness check (checks the store)
//! - /health/live - Liveness check (always returns OK if server is running)

use crate::config::StorageBackend;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

/// Individual health checks
#[derive(Serialize)]
pub struct HealthChecks {
    pub storage: CheckStatus,
}

/// Status of an individual check
#[derive(Serialize)]
pub struct CheckStatus {
    pub status: String,
    pub backend: StorageBackend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn response(status: &str, checks: Option<HealthChecks>) -> HealthResponse {
    HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    }
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(response("healthy", None))
}

/// Readiness check
///
/// Returns 503 when the store cannot be reached.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let backend = state.config().database.backend;
    let storage = match state.store().health_check().await {
        Ok(()) => CheckStatus {
            status: "healthy".to_string(),
            backend,
            message: None,
        },
        Err(e) => CheckStatus {
            status: "unhealthy".to_string(),
            backend,
            message: Some(e.to_string()),
        },
    };

    let is_healthy = storage.status == "healthy";
    let body = response(
        if is_healthy { "ready" } else { "not_ready" },
        Some(HealthChecks { storage }),
    );

    if is_healthy {
        Ok(Json(body))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(body)))
    }
}

/// Liveness check
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(response("alive", None))
}
