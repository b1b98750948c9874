//! Roster fetcher state for the selected team.
//!
//! Same generation-token discipline as `teams`; loads are additionally
//! keyed by team, and a result for a team other than the one currently
//! loading is stale by construction (switching teams begins a new
//! load, which bumps the generation).

#[cfg(test)]
#[path = "players_test.rs"]
mod players_test;

use crate::net::types::Player;
use crate::state::gate::FetchPhase;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayersState {
    items: Vec<Player>,
    phase: FetchPhase,
    team_id: Option<String>,
    generation: u64,
}

impl PlayersState {
    #[must_use]
    pub fn items(&self) -> &[Player] {
        &self.items
    }

    #[must_use]
    pub fn phase(&self) -> &FetchPhase {
        &self.phase
    }

    /// Team the current items (or in-flight load) belong to.
    #[must_use]
    pub fn team_id(&self) -> Option<&str> {
        self.team_id.as_deref()
    }

    /// Start a load for `team_id`; supersedes any in-flight load.
    pub fn begin_load(&mut self, team_id: &str) -> u64 {
        self.generation += 1;
        self.phase = FetchPhase::Loading;
        if self.team_id.as_deref() != Some(team_id) {
            // Switching teams: stale roster must not flash.
            self.items.clear();
            self.team_id = Some(team_id.to_owned());
        }
        self.generation
    }

    /// Gate closed or no team selected: drop data and supersede any
    /// in-flight load.
    pub fn disable(&mut self) {
        self.generation += 1;
        self.items.clear();
        self.team_id = None;
        self.phase = FetchPhase::Disabled;
    }

    /// Force a refetch after a mutation; keeps current items visible.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.phase = FetchPhase::Disabled;
    }

    /// Apply a load result. Returns `false` when the token is stale.
    pub fn apply_result(&mut self, token: u64, result: Result<Vec<Player>, String>) -> bool {
        if token != self.generation {
            return false;
        }
        match result {
            Ok(items) => {
                self.items = items;
                self.phase = FetchPhase::Ready;
            }
            Err(message) => {
                self.phase = FetchPhase::Failed(message);
            }
        }
        true
    }
}
