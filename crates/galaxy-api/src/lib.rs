//! Galaxy of Consequence — HTTP API.
//!
//! Exposes the turn endpoint, a session read endpoint and a health check,
//! and owns process-level concerns: configuration, telemetry, and the mapping
//! of domain errors onto HTTP responses.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

/// Builds the full application router.
pub fn build_router(app_state: state::AppState) -> Router {
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    Router::new()
        .merge(routes::health::router())
        .merge(routes::play::router())
        .nest("/api/sessions", routes::sessions::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
