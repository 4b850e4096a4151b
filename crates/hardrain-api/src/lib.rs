//! Hard Rain — HTTP API.
//!
//! Exposes the sequencing engine over axum: read the transcript, render it
//! as text, and trigger the next line.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    // TODO: Replace CorsLayer::permissive() with the deployed frontend origin.
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/poem", routes::poem::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
