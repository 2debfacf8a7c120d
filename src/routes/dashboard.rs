//! Dashboard routes: aggregated project statistics for the overview charts.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::services::dashboard::{self, DashboardView};
use crate::AppState;

/// GET /dashboard — statistics for the logged-in overview page.
pub async fn stats(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<DashboardView>, AppError> {
    tracing::debug!(user_id = user.id, "Serving dashboard");
    let stats = dashboard::get_stats(&state.db).await?;
    Ok(Json(stats.into()))
}

/// GET /dashboard2 — the same statistics for the public overview page.
pub async fn public_stats(State(state): State<AppState>) -> Result<Json<DashboardView>, AppError> {
    let stats = dashboard::get_stats(&state.db).await?;
    Ok(Json(stats.into()))
}
