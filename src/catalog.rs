//! Working candidate list and the derived per-tab view
//!
//! The catalog holds whatever the provider has returned so far, in response
//! order. It is not persisted; only the user's verdicts on it are. The epoch
//! counter guards against a slow fetch landing after the filters that
//! requested it have already changed.

use crate::models::{Movie, UserState, ViewTab};

#[derive(Default)]
pub struct Catalog {
    movies: Vec<Movie>,
    epoch: u64,
}

impl Catalog {
    /// Current fetch epoch. A fetch captures this before calling the
    /// provider and hands it back to [`absorb`](Self::absorb) on completion.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Bumps the epoch, invalidating any fetch still in flight. Called on
    /// every filter mutation.
    pub fn invalidate(&mut self) {
        self.epoch += 1;
    }

    /// Folds a fetched batch into the candidate list.
    ///
    /// A reset replaces the list; otherwise the batch is appended, keeping
    /// existing entries in place and dropping IDs already present. Batches
    /// whose epoch is stale are discarded entirely. Returns whether the
    /// batch was applied.
    pub fn absorb(&mut self, batch: Vec<Movie>, reset: bool, epoch: u64) -> bool {
        if epoch != self.epoch {
            tracing::info!(
                stale_epoch = epoch,
                current_epoch = self.epoch,
                discarded = batch.len(),
                "Discarding fetch results for superseded filters"
            );
            return false;
        }

        if reset {
            self.movies.clear();
        }
        for movie in batch {
            if !self.movies.iter().any(|m| m.id == movie.id) {
                self.movies.push(movie);
            }
        }
        true
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }
}

/// Computes the movies to present for a tab. Pure; recomputed per request.
///
/// Seen and disliked movies are excluded everywhere. The watchlist tab shows
/// candidates either user wants; the matches tab only those both want.
pub fn visible<'a>(candidates: &'a [Movie], state: &UserState, tab: ViewTab) -> Vec<&'a Movie> {
    candidates
        .iter()
        .filter(|m| {
            if state.seen.contains(&m.id) || state.disliked.contains(&m.id) {
                return false;
            }
            match tab {
                ViewTab::Watchlist => {
                    state.watchlist_a.contains(&m.id) || state.watchlist_b.contains(&m.id)
                }
                ViewTab::Matches => {
                    state.watchlist_a.contains(&m.id) && state.watchlist_b.contains(&m.id)
                }
                ViewTab::Discover => true,
            }
        })
        .collect()
}
