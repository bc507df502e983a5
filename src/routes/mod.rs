//! HTTP surface.

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::service::SeoService;

pub mod analysis;
pub mod health;

/// Build the application router around a shared service.
pub fn router(service: SeoService) -> Router {
    Router::new()
        .route("/", get(health::home))
        .route("/analyze", post(analysis::analyze))
        .route("/history", get(analysis::history))
        .route("/clear-history", delete(analysis::clear_history))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}
