//! Route configuration.

use crate::handlers;
use crate::state::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Create the application router.
///
/// The protocol's version endpoints are `.suffix` patterns under arbitrary
/// module paths, which no route template can express, so the entire surface
/// is a single fallback handler.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .fallback(handlers::proxy_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
