use std::sync::Arc;

use tokio::sync::RwLock;

use crate::catalog::Catalog;
use crate::models::UserState;
use crate::services::{RecommendationProvider, RecommendationRequest};
use crate::store::StateStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
    pub store: Arc<dyn StateStore>,
    pub provider: Arc<dyn RecommendationProvider>,
}

/// Inner state that can be modified
pub struct AppStateInner {
    pub user_state: UserState,
    pub catalog: Catalog,
    /// Provider fetches currently outstanding; clients show a loading state
    /// while this is non-zero
    pub in_flight: usize,
}

impl AppStateInner {
    pub fn fetching(&self) -> bool {
        self.in_flight > 0
    }
}

impl AppState {
    pub fn new(
        user_state: UserState,
        store: Arc<dyn StateStore>,
        provider: Arc<dyn RecommendationProvider>,
    ) -> Self {
        Self {
            inner: Arc::new(RwLock::new(AppStateInner {
                user_state,
                catalog: Catalog::default(),
                in_flight: 0,
            })),
            store,
            provider,
        }
    }

    /// Persists the current user state. Persistence failure never fails the
    /// action that triggered it; the in-memory state is already updated.
    pub async fn save_state(&self) {
        let state = {
            let inner = self.inner.read().await;
            inner.user_state.clone()
        };
        if let Err(e) = self.store.save(&state).await {
            tracing::error!(error = %e, "Failed to persist user state");
        }
    }

    /// Runs one provider fetch and folds the result into the catalog.
    ///
    /// A reset fetch bumps the epoch before capturing it, so any fetch still
    /// pending at that point is superseded rather than combined with the
    /// reset. The request and the epoch are captured together, and the lock
    /// is released while the provider call is in flight. If the filters have
    /// changed by the time it completes, the batch is thrown away. Provider
    /// failure degrades to an empty batch and is reported, not propagated.
    ///
    /// Returns true when the fetch failed.
    pub async fn run_fetch(&self, reset: bool) -> bool {
        let (request, epoch) = {
            let mut inner = self.inner.write().await;
            if reset {
                inner.catalog.invalidate();
            }
            inner.in_flight += 1;
            (
                RecommendationRequest::from_state(&inner.user_state),
                inner.catalog.epoch(),
            )
        };

        let (batch, failed) = match self.provider.fetch_candidates(&request).await {
            Ok(movies) => (movies, false),
            Err(e) => {
                tracing::error!(error = %e, provider = self.provider.name(), "Candidate fetch failed");
                (Vec::new(), true)
            }
        };

        let mut inner = self.inner.write().await;
        inner.in_flight -= 1;
        inner.catalog.absorb(batch, reset, epoch);
        failed
    }
}
