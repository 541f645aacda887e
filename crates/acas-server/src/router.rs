use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use acas_protocol::endpoints;
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// Build the axum router with all ACAS endpoints.
pub fn build_router(state: AppState, max_request_size: usize) -> Router {
    Router::new()
        .route(endpoints::HEALTH, get(handler::health_handler))
        .route(endpoints::INFO, get(handler::info_handler))
        .route(endpoints::INVOKE, post(handler::invoke_handler))
        .layer(DefaultBodyLimit::max(max_request_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
