//! Roster page: the authenticated (or guest) landing route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Installs the full reconciliation wiring for this route: the login
//! redirect, the OAuth redirect confirmation, and both gated
//! fetchers. Guest mode bypasses the fetchers entirely and works from
//! an in-browser roster that is lost on refresh.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::AppContext;
use crate::components::lineup_board::LineupBoard;
use crate::components::player_table::PlayerTable;
use crate::components::team_picker::TeamPicker;
use crate::net::types::Player;
use crate::state::gate::FetchPhase;
use crate::state::players::PlayersState;
use crate::state::teams::TeamsState;
use crate::util::lineup::{Lineup, random_lineup};

const GUEST_TEAM_ID: &str = "guest";

#[component]
pub fn RosterPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let navigate = use_navigate();

    crate::util::auth::install_signin_redirect(&ctx, navigate.clone());
    crate::util::auth::install_redirect_confirmation(&ctx);
    crate::util::fetch::install_team_fetcher(&ctx);
    crate::util::fetch::install_player_fetcher(&ctx);

    let auth = ctx.auth;
    let teams = ctx.teams;
    let players = ctx.players;

    // Guest roster: purely local, deliberately not persisted.
    let guest_players = RwSignal::new(Vec::<Player>::new());
    let guest_counter = RwSignal::new(0_u32);

    let lineup = RwSignal::new(None::<Lineup>);
    let new_player_name = RwSignal::new(String::new());
    let new_team_name = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());

    let is_guest = move || auth.with(|a| a.is_guest_mode());
    let visible_players = Signal::derive(move || {
        if is_guest() {
            guest_players.get()
        } else {
            players.with(|p| p.items().to_vec())
        }
    });

    // A regenerated roster invalidates the displayed lineup.
    Effect::new(move || {
        visible_players.track();
        lineup.set(None);
    });

    let on_add_player = {
        let ctx = ctx.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let name = new_player_name.get().trim().to_owned();
            if name.is_empty() {
                return;
            }
            new_player_name.set(String::new());
            if is_guest() {
                let serial = guest_counter.get() + 1;
                guest_counter.set(serial);
                guest_players.update(|list| {
                    list.push(Player {
                        id: format!("{GUEST_TEAM_ID}-{serial}"),
                        team_id: GUEST_TEAM_ID.to_owned(),
                        name,
                        jersey_number: None,
                    });
                });
                return;
            }
            let Some(team_id) = teams.with_untracked(|t| t.selected_team_id().map(str::to_owned))
            else {
                error.set("Select a team first.".to_owned());
                return;
            };
            #[cfg(feature = "hydrate")]
            {
                let ctx = ctx.clone();
                leptos::task::spawn_local(async move {
                    match crate::net::api::create_player(&ctx.store, &team_id, &name, None).await {
                        Ok(_) => ctx.players.update(PlayersState::invalidate),
                        Err(e) => error.set(format!("Could not add player: {e}")),
                    }
                });
            }
            #[cfg(not(feature = "hydrate"))]
            let _ = (&ctx, team_id);
        }
    };

    let on_delete_player = {
        let ctx = ctx.clone();
        Callback::new(move |player_id: String| {
            if is_guest() {
                guest_players.update(|list| list.retain(|p| p.id != player_id));
                return;
            }
            #[cfg(feature = "hydrate")]
            {
                let ctx = ctx.clone();
                leptos::task::spawn_local(async move {
                    match crate::net::api::delete_player(&ctx.store, &player_id).await {
                        Ok(()) => ctx.players.update(PlayersState::invalidate),
                        Err(e) => error.set(format!("Could not remove player: {e}")),
                    }
                });
            }
            #[cfg(not(feature = "hydrate"))]
            let _ = (&ctx, player_id);
        })
    };

    let on_add_team = {
        let ctx = ctx.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let name = new_team_name.get().trim().to_owned();
            if name.is_empty() {
                return;
            }
            new_team_name.set(String::new());
            #[cfg(feature = "hydrate")]
            {
                let ctx = ctx.clone();
                leptos::task::spawn_local(async move {
                    match crate::net::api::create_team(&ctx.store, &name, None).await {
                        Ok(team) => {
                            ctx.teams.update(|t| {
                                t.invalidate();
                                t.select_team(&team.id);
                            });
                        }
                        Err(e) => error.set(format!("Could not create team: {e}")),
                    }
                });
            }
            #[cfg(not(feature = "hydrate"))]
            let _ = &ctx;
        }
    };

    let on_select_team = Callback::new(move |team_id: String| {
        teams.update(|t| t.select_team(&team_id));
    });

    let on_generate_lineup = move |_| {
        let roster = visible_players.get_untracked();
        if roster.is_empty() {
            error.set("Add some players first.".to_owned());
            return;
        }
        error.set(String::new());
        lineup.set(Some(random_lineup(&roster)));
    };

    let ctx_signout = ctx.clone();
    let on_sign_out = move |_| {
        crate::util::auth::sign_out(&ctx_signout);
    };

    let team_items = Signal::derive(move || teams.with(|t| t.items().to_vec()));
    let selected_team = Signal::derive(move || {
        teams.with(|t| t.selected_team_id().map(str::to_owned))
    });
    let loading = move || {
        auth.with(|a| a.is_loading())
            || teams.with(|t| t.phase().is_loading())
            || players.with(|p| p.phase().is_loading())
    };
    let fetch_error = move || {
        let from_teams = teams.with(|t| match t.phase() {
            FetchPhase::Failed(message) => Some(message.clone()),
            _ => None,
        });
        from_teams.or_else(|| {
            players.with(|p| match p.phase() {
                FetchPhase::Failed(message) => Some(message.clone()),
                _ => None,
            })
        })
    };
    let on_retry = move |_| {
        teams.update(TeamsState::invalidate);
        players.update(PlayersState::invalidate);
    };

    view! {
        <div class="roster-page">
            <header class="roster-page__header">
                <h1>"Dugout"</h1>
                <div class="roster-page__identity">
                    <Show when=move || is_guest()>
                        <span class="roster-page__badge">"Guest"</span>
                    </Show>
                    <Show when=move || auth.with(|a| a.is_authenticated())>
                        <span>{move || {
                            auth.with(|a| a.user().map(|u| u.name.clone()).unwrap_or_default())
                        }}</span>
                    </Show>
                    <button class="roster-page__signout" on:click=on_sign_out>
                        {move || if is_guest() { "Exit guest mode" } else { "Sign out" }}
                    </button>
                </div>
            </header>

            <Show when=loading>
                <p class="roster-page__loading">"Loading..."</p>
            </Show>

            <Show when=move || fetch_error().is_some()>
                <div class="roster-page__error">
                    <p>{move || fetch_error().unwrap_or_default()}</p>
                    <button on:click=on_retry>"Retry"</button>
                </div>
            </Show>

            <Show when=move || !error.get().is_empty()>
                <p class="roster-page__error">{move || error.get()}</p>
            </Show>

            <Show when=move || !is_guest()>
                <section class="roster-page__teams">
                    <TeamPicker teams=team_items selected=selected_team on_select=on_select_team/>
                    <form class="roster-page__add" on:submit=on_add_team.clone()>
                        <input
                            type="text"
                            placeholder="New team name"
                            prop:value=move || new_team_name.get()
                            on:input=move |ev| new_team_name.set(event_target_value(&ev))
                        />
                        <button type="submit">"Add team"</button>
                    </form>
                </section>
            </Show>

            <section class="roster-page__players">
                <PlayerTable players=visible_players on_delete=on_delete_player/>
                <form class="roster-page__add" on:submit=on_add_player.clone()>
                    <input
                        type="text"
                        placeholder="Player name"
                        prop:value=move || new_player_name.get()
                        on:input=move |ev| new_player_name.set(event_target_value(&ev))
                    />
                    <button type="submit">"Add player"</button>
                </form>
            </section>

            <section class="roster-page__lineup">
                <button class="roster-page__generate" on:click=on_generate_lineup>
                    "Generate lineup"
                </button>
                <LineupBoard lineup=lineup.into()/>
            </section>
        </div>
    }
}
