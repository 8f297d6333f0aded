//! Cross-device sync via shareable snapshot tokens
//!
//! There is no server: one device encodes its whole state into a token, the
//! other pastes it and merges. Merging is asymmetric on purpose. The ID sets
//! (seen, both watchlists, dislikes) union so nobody's picks are ever lost by
//! syncing; the filter fields (platforms, mood, recency, runtime) are one
//! session's preference and follow whoever shared last, wholesale.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::models::UserState;

#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("not a valid state snapshot: {0}")]
    Structure(#[from] serde_json::Error),
}

/// Encodes the full state as a URL-safe token. Pure; no side effects.
pub fn encode_snapshot(state: &UserState) -> String {
    // UserState serialization cannot fail: string keys, no non-finite floats
    let json = serde_json::to_vec(state).expect("UserState is always serializable");
    URL_SAFE_NO_PAD.encode(json)
}

/// Decodes a token produced by [`encode_snapshot`].
///
/// Malformed tokens fail with `DecodeError`; callers keep their local state.
pub fn decode_snapshot(token: &str) -> Result<UserState, DecodeError> {
    let json = URL_SAFE_NO_PAD.decode(token.trim())?;
    let state = serde_json::from_slice(&json)?;
    Ok(state)
}

/// Merges an incoming snapshot into the local state.
///
/// ID sets union (commutative, idempotent, monotonic); filter fields take the
/// incoming value outright.
pub fn merge_states(local: &UserState, incoming: &UserState) -> UserState {
    UserState {
        seen: local.seen.union(&incoming.seen).cloned().collect(),
        watchlist_a: local
            .watchlist_a
            .union(&incoming.watchlist_a)
            .cloned()
            .collect(),
        watchlist_b: local
            .watchlist_b
            .union(&incoming.watchlist_b)
            .cloned()
            .collect(),
        disliked: local.disliked.union(&incoming.disliked).cloned().collect(),
        platforms: incoming.platforms.clone(),
        mood: incoming.mood.clone(),
        year_range: incoming.year_range,
        max_runtime: incoming.max_runtime,
    }
}
