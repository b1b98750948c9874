//! Team list fetcher state.
//!
//! DESIGN
//! ======
//! Loads are versioned the same way identity checks are: `begin_load`
//! bumps a generation and returns a token, and `apply_result` discards
//! anything stale. Aborting the underlying request is an optimization;
//! the generation check is what guarantees a cancelled load can never
//! land.

#[cfg(test)]
#[path = "teams_test.rs"]
mod teams_test;

use crate::net::types::Team;
use crate::state::gate::FetchPhase;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeamsState {
    items: Vec<Team>,
    phase: FetchPhase,
    selected_team_id: Option<String>,
    generation: u64,
}

impl TeamsState {
    #[must_use]
    pub fn items(&self) -> &[Team] {
        &self.items
    }

    #[must_use]
    pub fn phase(&self) -> &FetchPhase {
        &self.phase
    }

    #[must_use]
    pub fn selected_team_id(&self) -> Option<&str> {
        self.selected_team_id.as_deref()
    }

    /// Start a load; the token must accompany the result.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.phase = FetchPhase::Loading;
        self.generation
    }

    /// Gate closed: drop data and supersede any in-flight load.
    pub fn disable(&mut self) {
        self.generation += 1;
        self.items.clear();
        self.selected_team_id = None;
        self.phase = FetchPhase::Disabled;
    }

    /// Force a refetch while keeping current items visible (used after
    /// a mutation). Supersedes any in-flight load.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.phase = FetchPhase::Disabled;
    }

    /// Apply a load result. Returns `false` when the token is stale and
    /// nothing changed.
    pub fn apply_result(&mut self, token: u64, result: Result<Vec<Team>, String>) -> bool {
        if token != self.generation {
            return false;
        }
        match result {
            Ok(items) => {
                self.items = items;
                self.phase = FetchPhase::Ready;
                // Drop a selection that no longer exists.
                if let Some(selected) = &self.selected_team_id
                    && !self.items.iter().any(|t| &t.id == selected)
                {
                    self.selected_team_id = None;
                }
            }
            Err(message) => {
                self.phase = FetchPhase::Failed(message);
            }
        }
        true
    }

    pub fn select_team(&mut self, team_id: &str) {
        self.selected_team_id = Some(team_id.to_owned());
    }

    /// Which team to select after a successful load.
    ///
    /// Priority: the persisted last selection when it still exists,
    /// then the sole team when there is exactly one, then the first
    /// team, then nothing.
    #[must_use]
    pub fn default_team_id(&self, last: Option<&str>) -> Option<String> {
        if let Some(last) = last
            && self.items.iter().any(|t| t.id == last)
        {
            return Some(last.to_owned());
        }
        self.items.first().map(|t| t.id.clone())
    }
}
