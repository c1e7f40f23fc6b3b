//! Route definitions for the Publisher HTTP API.
//!
//! All routes are mounted under `/api`.

use axum::{Router, routing::get};

use crate::handlers;
use crate::state::AppState;

/// Build the router and thread `state` through every route.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(publish_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Publish endpoints: smart, republish, item, edge item, result
fn publish_routes() -> Router<AppState> {
    Router::new()
        .route("/publish/smart", get(handlers::publish::publish_smart))
        .route(
            "/publish/republish-all-languages",
            get(handlers::publish::republish_all_languages),
        )
        .route("/publish/item", get(handlers::publish::publish_item))
        .route("/publish/edge-item", get(handlers::publish::publish_edge_item))
        .route("/publish/result", get(handlers::publish::publish_result))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
