//! Route table and middleware.

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{handlers, state::AppState};

/// Create the application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/weather/{city}", get(handlers::current_weather))
        .route("/api/forecast/{city}", get(handlers::forecast))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
