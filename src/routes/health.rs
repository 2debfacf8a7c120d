//! Health check endpoints for liveness and readiness.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// Health check response body.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

/// GET /health — liveness check, always 200 while the process is running.
pub async fn live() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        database: None,
    })
}

/// GET /health/ready — readiness check that verifies database connectivity.
pub async fn ready(State(state): State<AppState>) -> Json<HealthStatus> {
    let database = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => "connected".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            format!("error: {e}")
        }
    };

    Json(HealthStatus {
        status: "healthy".to_string(),
        database: Some(database),
    })
}
