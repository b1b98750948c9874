//! Gated roster data fetchers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two effects keep the team list and the selected team's roster in
//! sync with the fetch gate. When the gate closes mid-flight the
//! request is aborted and state disabled in the same tick; when it
//! opens, a load starts from the `Disabled` phase only, so a `Failed`
//! phase never retries on its own.
//!
//! DESIGN
//! ======
//! Aborting is best-effort; the generation token checked by
//! `apply_result` is what guarantees a superseded response can never
//! land. At most one request per fetcher is in flight, enforced by a
//! thread-local registry (wasm is single-threaded, so thread-local is
//! effectively global here).

use leptos::prelude::*;

use crate::app::AppContext;
use crate::state::gate::{FetchPhase, compute_fetch_gate};
use crate::state::players::PlayersState;
use crate::state::teams::TeamsState;

const TEAMS_KEY: &str = "teams";
const PLAYERS_KEY: &str = "players";

#[cfg(feature = "hydrate")]
mod in_flight {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use crate::net::api::AbortHandle;

    thread_local! {
        static REGISTRY: RefCell<HashMap<&'static str, AbortHandle>> =
            RefCell::new(HashMap::new());
    }

    /// Register a fresh handle for `key`, aborting any previous one.
    pub fn replace(key: &'static str) -> AbortHandle {
        let handle = AbortHandle::new();
        REGISTRY.with(|registry| {
            if let Some(old) = registry.borrow_mut().insert(key, handle.clone()) {
                old.abort();
            }
        });
        handle
    }

    pub fn abort(key: &'static str) {
        REGISTRY.with(|registry| {
            if let Some(old) = registry.borrow_mut().remove(key) {
                old.abort();
            }
        });
    }
}

#[cfg(not(feature = "hydrate"))]
mod in_flight {
    pub fn abort(_key: &'static str) {}
}

/// Keep the team list in sync with the fetch gate. After a successful
/// load with no selection, picks the default team (persisted last
/// selection, else the first).
pub fn install_team_fetcher(ctx: &AppContext) {
    let ctx = ctx.clone();
    Effect::new(move || {
        let gate = compute_fetch_gate(ctx.auth.with(|a| a.gate_inputs()));
        let disabled = ctx.teams.with(|t| matches!(t.phase(), FetchPhase::Disabled));
        if !gate {
            in_flight::abort(TEAMS_KEY);
            if !disabled {
                ctx.teams.update(TeamsState::disable);
            }
            return;
        }
        if !disabled {
            return;
        }
        let token = ctx.teams.try_update(TeamsState::begin_load).unwrap_or_default();
        #[cfg(feature = "hydrate")]
        {
            let ctx = ctx.clone();
            let abort = in_flight::replace(TEAMS_KEY);
            leptos::task::spawn_local(async move {
                let result = crate::net::api::list_teams(&ctx.store, Some(&abort))
                    .await
                    .map_err(|e| e.to_string());
                let applied = ctx
                    .teams
                    .try_update(|t| t.apply_result(token, result))
                    .unwrap_or(false);
                if applied {
                    let last = ctx.store.last_team_id();
                    let default = ctx.teams.with_untracked(|t| {
                        if t.selected_team_id().is_none() {
                            t.default_team_id(last.as_deref())
                        } else {
                            None
                        }
                    });
                    if let Some(id) = default {
                        ctx.teams.update(|t| t.select_team(&id));
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = token;
        }
    });
}

/// Keep the roster in sync with the fetch gate and the selected team.
/// Persists each selection as the default for the next session.
pub fn install_player_fetcher(ctx: &AppContext) {
    let ctx = ctx.clone();
    Effect::new(move || {
        let gate = compute_fetch_gate(ctx.auth.with(|a| a.gate_inputs()));
        let selected = ctx.teams.with(|t| t.selected_team_id().map(str::to_owned));
        let (disabled, loaded_team) = ctx.players.with(|p| {
            (
                matches!(p.phase(), FetchPhase::Disabled),
                p.team_id().map(str::to_owned),
            )
        });

        let Some(team_id) = selected.filter(|_| gate) else {
            in_flight::abort(PLAYERS_KEY);
            if !disabled || loaded_team.is_some() {
                ctx.players.update(PlayersState::disable);
            }
            return;
        };

        let needs_load = disabled || loaded_team.as_deref() != Some(team_id.as_str());
        if !needs_load {
            return;
        }
        ctx.store.set_last_team_id(&team_id);
        let token = ctx
            .players
            .try_update(|p| p.begin_load(&team_id))
            .unwrap_or_default();
        #[cfg(feature = "hydrate")]
        {
            let ctx = ctx.clone();
            let abort = in_flight::replace(PLAYERS_KEY);
            leptos::task::spawn_local(async move {
                let result = crate::net::api::list_players(&ctx.store, &team_id, Some(&abort))
                    .await
                    .map_err(|e| e.to_string());
                let _ = ctx.players.try_update(|p| p.apply_result(token, result));
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = token;
        }
    });
}
