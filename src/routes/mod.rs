//! Route definitions for the extension program tracker.

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod projects;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    trace::TraceLayer,
};

use crate::AppState;

/// Largest accepted request body (form posts only).
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth_routes = Router::new()
        .route("/", post(auth::login))
        .route("/login", post(auth::login))
        .route("/signup", post(auth::signup))
        .route("/logout", get(auth::logout));

    let dashboard_routes = Router::new()
        .route("/dashboard", get(dashboard::stats))
        .route("/dashboard2", get(dashboard::public_stats));

    let program_routes = Router::new()
        .route("/main-campus", get(projects::summaries))
        .route("/main-campus2", get(projects::summaries))
        .route("/extension-program-management", get(projects::list))
        .route("/api/projects", get(projects::locations))
        .route("/add-program", post(projects::create))
        .route("/get-program/{id}", get(projects::get_for_edit))
        .route("/project-details/{id}", get(projects::details))
        .route("/edit-program/{id}", put(projects::update))
        .route("/delete-program/{id}", delete(projects::delete));

    Router::new()
        .route("/health", get(health::live))
        .route("/health/ready", get(health::ready))
        .merge(auth_routes)
        .merge(dashboard_routes)
        .merge(program_routes)
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
