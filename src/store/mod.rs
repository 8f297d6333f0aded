//! Key-value persistence port for the user state
//!
//! The state lives under a single key (here: one JSON file). It is read once
//! at startup and rewritten after every mutation. Loading distinguishes
//! "nothing persisted yet" from "persisted but unreadable" so callers can
//! fall back to defaults on corruption instead of crashing.

use std::path::PathBuf;

use crate::models::UserState;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("corrupt state: {0}")]
    CorruptState(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persistence port for the single `UserState` aggregate
#[async_trait::async_trait]
pub trait StateStore: Send + Sync {
    /// Returns `Ok(None)` when nothing has been persisted yet and
    /// `StoreError::CorruptState` when the persisted blob does not parse.
    async fn load(&self) -> Result<Option<UserState>, StoreError>;

    /// Overwrites the persisted state wholesale.
    async fn save(&self, state: &UserState) -> Result<(), StoreError>;
}

/// File-backed store: the whole state as one JSON document
#[derive(Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl StateStore for JsonFileStore {
    async fn load(&self) -> Result<Option<UserState>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let state = serde_json::from_slice(&bytes)?;
        Ok(Some(state))
    }

    async fn save(&self, state: &UserState) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(state)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

/// Loads persisted state, falling back to defaults when nothing is stored or
/// the stored blob is corrupt. Corruption is logged, never fatal.
pub async fn load_or_default(store: &dyn StateStore) -> UserState {
    match store.load().await {
        Ok(Some(state)) => state,
        Ok(None) => {
            tracing::info!("No persisted state found, starting fresh");
            UserState::default()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Persisted state unreadable, falling back to defaults");
            UserState::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserSlot;

    fn temp_store() -> (tempfile::TempDir, JsonFileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));
        (dir, store)
    }

    #[tokio::test]
    async fn test_load_missing_file_returns_none() {
        let (_dir, store) = temp_store();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let (_dir, store) = temp_store();

        let mut state = UserState::default();
        state.mark_seen("m1");
        state.mark_disliked("m2");
        state.toggle_watchlist(UserSlot::A, "m3");
        state.toggle_platform("Netflix");

        store.save(&state).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_corrupt_state_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let store = JsonFileStore::new(&path);
        match store.load().await {
            Err(StoreError::CorruptState(_)) => {}
            other => panic!("expected CorruptState, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_load_or_default_recovers_from_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, b"garbage").await.unwrap();

        let store = JsonFileStore::new(&path);
        let state = load_or_default(&store).await;
        assert_eq!(state, UserState::default());
    }

    #[tokio::test]
    async fn test_save_overwrites_prior_contents() {
        let (_dir, store) = temp_store();

        let mut first = UserState::default();
        first.mark_seen("m1");
        store.save(&first).await.unwrap();

        let mut second = UserState::default();
        second.mark_seen("m2");
        store.save(&second).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert!(!loaded.seen.contains("m1"));
        assert!(loaded.seen.contains("m2"));
    }
}
