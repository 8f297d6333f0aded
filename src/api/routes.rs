use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // State
        .route("/state", get(handlers::get_state))
        // Candidate views & fetches
        .route("/movies", get(handlers::get_movies))
        .route("/movies/refresh", post(handlers::refresh_movies))
        .route("/movies/more", post(handlers::more_movies))
        // User actions
        .route("/actions/seen", post(handlers::mark_seen))
        .route("/actions/dislike", post(handlers::mark_disliked))
        .route("/actions/watchlist", post(handlers::toggle_watchlist))
        // Filters
        .route("/filters", post(handlers::set_filters))
        .route("/filters/platforms", post(handlers::toggle_platform))
        // Cross-device sync
        .route("/sync/token", get(handlers::sync_token))
        .route("/sync/merge", post(handlers::sync_merge))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
