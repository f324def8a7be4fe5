use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers::{get_facet, get_report, handler_404, health, list_facets};
use super::state::AppState;

/// Build the router with routes and middleware wired.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_report))
        .route("/facets", get(list_facets))
        .route("/facets/:name", get(get_facet))
        .route("/health", get(health))
        .fallback(handler_404)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
