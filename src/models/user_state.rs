use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{MaxRuntime, UserSlot, YearRange};

/// Platforms both users are assumed to pay for out of the box
pub const DEFAULT_PLATFORMS: [&str; 5] = ["Netflix", "Hulu", "Max", "Peacock", "Amazon Prime"];

pub const DEFAULT_MOOD: &str = "Any Mood";

/// The single persisted aggregate: everything the two users have decided so far
///
/// The four ID sets serialize as plain lists and re-collect to sets on load.
/// `seen` and `disliked` only ever grow; the watchlists and platforms toggle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserState {
    pub seen: BTreeSet<String>,
    pub watchlist_a: BTreeSet<String>,
    pub watchlist_b: BTreeSet<String>,
    pub disliked: BTreeSet<String>,
    /// Unique platform names, in the order the users toggled them on
    pub platforms: Vec<String>,
    pub mood: String,
    pub year_range: YearRange,
    pub max_runtime: MaxRuntime,
}

impl Default for UserState {
    fn default() -> Self {
        Self {
            seen: BTreeSet::new(),
            watchlist_a: BTreeSet::new(),
            watchlist_b: BTreeSet::new(),
            disliked: BTreeSet::new(),
            platforms: DEFAULT_PLATFORMS.iter().map(|p| p.to_string()).collect(),
            mood: DEFAULT_MOOD.to_string(),
            year_range: YearRange::LastYear,
            max_runtime: MaxRuntime::Any,
        }
    }
}

impl UserState {
    /// Marks a movie as seen. Idempotent; there is no way to un-see.
    pub fn mark_seen(&mut self, id: impl Into<String>) {
        self.seen.insert(id.into());
    }

    /// Marks a movie as disliked. Idempotent; dislikes are permanent.
    pub fn mark_disliked(&mut self, id: impl Into<String>) {
        self.disliked.insert(id.into());
    }

    /// Adds the movie to the user's watchlist, or removes it if already there.
    ///
    /// Returns true when the movie ended up on the list. A movie may sit on
    /// both watchlists at once; that is what makes it a match.
    pub fn toggle_watchlist(&mut self, slot: UserSlot, id: impl Into<String>) -> bool {
        let list = match slot {
            UserSlot::A => &mut self.watchlist_a,
            UserSlot::B => &mut self.watchlist_b,
        };
        let id = id.into();
        if list.remove(&id) {
            false
        } else {
            list.insert(id);
            true
        }
    }

    /// Toggles a platform on or off, keeping the list unique and stable.
    ///
    /// Returns true when the platform ended up active.
    pub fn toggle_platform(&mut self, name: &str) -> bool {
        if let Some(pos) = self.platforms.iter().position(|p| p == name) {
            self.platforms.remove(pos);
            false
        } else {
            self.platforms.push(name.to_string());
            true
        }
    }

    pub fn set_mood(&mut self, mood: impl Into<String>) {
        self.mood = mood.into();
    }

    pub fn set_year_range(&mut self, range: YearRange) {
        self.year_range = range;
    }

    pub fn set_max_runtime(&mut self, runtime: MaxRuntime) {
        self.max_runtime = runtime;
    }
}
