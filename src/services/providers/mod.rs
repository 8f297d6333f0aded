/// Recommendation provider abstraction
///
/// The generative backend that turns the couple's filters into movie
/// candidates is pluggable. A provider gets the current filters plus the
/// exclusion lists and returns candidate records; it may legitimately return
/// nothing, which is an empty state for the view, not an error.
use crate::{
    error::AppResult,
    models::{MaxRuntime, Movie, UserState, YearRange},
};

pub mod gemini;

/// How many seen IDs are spelled out in the provider prompt. Anything beyond
/// this can resurface; dedup against the working list catches repeats within
/// a session.
const SEEN_IDS_PROMPT_CAP: usize = 30;

/// What the provider is asked for: one session's filters and exclusions
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub mood: String,
    pub year_range: YearRange,
    pub max_runtime: MaxRuntime,
    pub platforms: Vec<String>,
    pub seen_ids: Vec<String>,
    pub disliked_ids: Vec<String>,
}

impl RecommendationRequest {
    pub fn from_state(state: &UserState) -> Self {
        Self {
            mood: state.mood.clone(),
            year_range: state.year_range,
            max_runtime: state.max_runtime,
            platforms: state.platforms.clone(),
            seen_ids: state.seen.iter().take(SEEN_IDS_PROMPT_CAP).cloned().collect(),
            disliked_ids: state.disliked.iter().cloned().collect(),
        }
    }
}

#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Fetches a fresh batch of movie candidates matching the request.
    async fn fetch_candidates(&self, request: &RecommendationRequest) -> AppResult<Vec<Movie>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
