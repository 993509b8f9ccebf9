//! API route definitions

use axum::routing::get;
use axum::Router;

use super::handlers;
use super::server::AppState;

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/transcript", get(handlers::transcript::fetch_transcript))
        .route("/health", get(handlers::health::health_check))
        .with_state(state)
}
