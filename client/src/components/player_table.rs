//! Roster table with per-row delete.

use leptos::prelude::*;

use crate::net::types::Player;

#[component]
pub fn PlayerTable(
    players: Signal<Vec<Player>>,
    on_delete: Callback<String>,
) -> impl IntoView {
    view! {
        <table class="player-table">
            <thead>
                <tr>
                    <th>"#"</th>
                    <th>"Name"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || players.get()
                    key=|player| player.id.clone()
                    children=move |player: Player| {
                        let id = player.id.clone();
                        let jersey = player
                            .jersey_number
                            .map_or_else(|| "-".to_owned(), |n| n.to_string());
                        view! {
                            <tr>
                                <td class="player-table__number">{jersey}</td>
                                <td>{player.name.clone()}</td>
                                <td>
                                    <button
                                        class="player-table__delete"
                                        on:click=move |_| on_delete.run(id.clone())
                                    >
                                        "Remove"
                                    </button>
                                </td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
    }
}
