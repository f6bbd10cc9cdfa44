//! Route definitions for the console server.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the console router.
///
/// Views are not registered individually: every unmatched GET is handed to
/// the shell, which does its own path matching.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/api/capabilities", get(handlers::api::capabilities))
        .route("/actions/go-to-task", post(handlers::go_to_task))
        .route("/actions/go-to-segments", post(handlers::go_to_segments))
        .route(
            "/actions/show-unavailable-segments",
            post(handlers::show_unavailable_segments),
        )
        .route("/actions/query-with-sql", post(handlers::query_with_sql))
        .route("/actions/go-to-middle-manager", post(handlers::go_to_middle_manager))
        .route("/toasts/{id}/dismiss", post(handlers::dismiss_toast))
        .fallback(handlers::page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
