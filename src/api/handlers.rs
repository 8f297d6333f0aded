use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::visible;
use crate::error::AppResult;
use crate::models::{MaxRuntime, Movie, UserSlot, UserState, ViewTab, YearRange};
use crate::sync;

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct MoviesQuery {
    #[serde(default)]
    pub tab: ViewTab,
}

#[derive(Debug, Serialize)]
pub struct MoviesResponse {
    pub movies: Vec<Movie>,
    /// The last fetch failed; an empty list here is an error state with a
    /// retry affordance, not a true empty result
    pub fetch_failed: bool,
}

#[derive(Debug, Serialize)]
pub struct StateResponse {
    #[serde(flatten)]
    pub state: UserState,
    pub watchlist_a_count: usize,
    pub watchlist_b_count: usize,
    pub fetching: bool,
}

#[derive(Debug, Deserialize)]
pub struct MovieActionRequest {
    pub movie_id: String,
}

#[derive(Debug, Deserialize)]
pub struct WatchlistToggleRequest {
    pub movie_id: String,
    pub user: UserSlot,
}

#[derive(Debug, Serialize)]
pub struct WatchlistToggleResponse {
    /// The movie is on the list after the toggle
    pub on: bool,
}

#[derive(Debug, Deserialize)]
pub struct SetFiltersRequest {
    pub mood: Option<String>,
    pub year_range: Option<YearRange>,
    pub max_runtime: Option<MaxRuntime>,
}

#[derive(Debug, Deserialize)]
pub struct TogglePlatformRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct SyncTokenResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct SyncMergeRequest {
    pub token: String,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Get the persisted user state plus session flags
pub async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    let inner = state.inner.read().await;
    Json(StateResponse {
        watchlist_a_count: inner.user_state.watchlist_a.len(),
        watchlist_b_count: inner.user_state.watchlist_b.len(),
        fetching: inner.fetching(),
        state: inner.user_state.clone(),
    })
}

/// Get the derived view for a tab, recomputed from current state
pub async fn get_movies(
    State(state): State<AppState>,
    Query(query): Query<MoviesQuery>,
) -> Json<Vec<Movie>> {
    let inner = state.inner.read().await;
    let view: Vec<Movie> = visible(inner.catalog.movies(), &inner.user_state, query.tab)
        .into_iter()
        .cloned()
        .collect();
    Json(view)
}

/// Replace the candidate list with a fresh fetch (the "shuffle" action)
pub async fn refresh_movies(State(state): State<AppState>) -> Json<MoviesResponse> {
    fetch_and_view(&state, true).await
}

/// Append a fresh fetch to the candidate list, skipping known IDs
pub async fn more_movies(State(state): State<AppState>) -> Json<MoviesResponse> {
    fetch_and_view(&state, false).await
}

/// Mark a movie as seen; it disappears from every view permanently
pub async fn mark_seen(
    State(state): State<AppState>,
    Json(request): Json<MovieActionRequest>,
) -> StatusCode {
    {
        let mut inner = state.inner.write().await;
        inner.user_state.mark_seen(request.movie_id);
    }
    state.save_state().await;
    StatusCode::OK
}

/// Mark a movie as disliked; it disappears from every view permanently
pub async fn mark_disliked(
    State(state): State<AppState>,
    Json(request): Json<MovieActionRequest>,
) -> StatusCode {
    {
        let mut inner = state.inner.write().await;
        inner.user_state.mark_disliked(request.movie_id);
    }
    state.save_state().await;
    StatusCode::OK
}

/// Toggle a movie on one user's watchlist
pub async fn toggle_watchlist(
    State(state): State<AppState>,
    Json(request): Json<WatchlistToggleRequest>,
) -> Json<WatchlistToggleResponse> {
    let on = {
        let mut inner = state.inner.write().await;
        inner
            .user_state
            .toggle_watchlist(request.user, request.movie_id)
    };
    state.save_state().await;
    Json(WatchlistToggleResponse { on })
}

/// Overwrite filter selections, then refetch under the new filters
pub async fn set_filters(
    State(state): State<AppState>,
    Json(request): Json<SetFiltersRequest>,
) -> Json<MoviesResponse> {
    {
        let mut inner = state.inner.write().await;
        if let Some(mood) = request.mood {
            inner.user_state.set_mood(mood);
        }
        if let Some(range) = request.year_range {
            inner.user_state.set_year_range(range);
        }
        if let Some(runtime) = request.max_runtime {
            inner.user_state.set_max_runtime(runtime);
        }
    }
    state.save_state().await;
    // The reset fetch bumps the epoch, superseding any fetch still in flight
    fetch_and_view(&state, true).await
}

/// Toggle one streaming platform, then refetch under the new set
pub async fn toggle_platform(
    State(state): State<AppState>,
    Json(request): Json<TogglePlatformRequest>,
) -> Json<MoviesResponse> {
    {
        let mut inner = state.inner.write().await;
        inner.user_state.toggle_platform(&request.name);
    }
    state.save_state().await;
    fetch_and_view(&state, true).await
}

/// Encode the current state as a shareable snapshot token
pub async fn sync_token(State(state): State<AppState>) -> Json<SyncTokenResponse> {
    let inner = state.inner.read().await;
    Json(SyncTokenResponse {
        token: sync::encode_snapshot(&inner.user_state),
    })
}

/// Merge a partner's snapshot token into local state
///
/// Invalid tokens are rejected with 400; local state is untouched.
pub async fn sync_merge(
    State(state): State<AppState>,
    Json(request): Json<SyncMergeRequest>,
) -> AppResult<Json<StateResponse>> {
    let incoming = sync::decode_snapshot(&request.token)?;

    let response = {
        let mut inner = state.inner.write().await;
        inner.user_state = sync::merge_states(&inner.user_state, &incoming);
        // The incoming snapshot's filters won; any in-flight fetch is stale
        inner.catalog.invalidate();
        StateResponse {
            watchlist_a_count: inner.user_state.watchlist_a.len(),
            watchlist_b_count: inner.user_state.watchlist_b.len(),
            fetching: inner.fetching(),
            state: inner.user_state.clone(),
        }
    };
    // Persist immediately so the merge survives even if the token is gone
    state.save_state().await;
    Ok(Json(response))
}

async fn fetch_and_view(state: &AppState, reset: bool) -> Json<MoviesResponse> {
    let fetch_failed = state.run_fetch(reset).await;
    let inner = state.inner.read().await;
    let movies = visible(inner.catalog.movies(), &inner.user_state, ViewTab::Discover)
        .into_iter()
        .cloned()
        .collect();
    Json(MoviesResponse {
        movies,
        fetch_failed,
    })
}
