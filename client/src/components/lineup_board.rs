//! Generated lineup display: batting order, fielding chart, bench.

use leptos::prelude::*;

use crate::util::lineup::Lineup;

#[component]
pub fn LineupBoard(lineup: Signal<Option<Lineup>>) -> impl IntoView {
    view! {
        <Show when=move || lineup.get().is_some()>
            <div class="lineup-board">
                <div class="lineup-board__column">
                    <h3>"Batting order"</h3>
                    <ol>
                        {move || {
                            lineup
                                .get()
                                .map(|l| {
                                    l.batting_order
                                        .iter()
                                        .map(|p| view! { <li>{p.name.clone()}</li> })
                                        .collect_view()
                                })
                        }}
                    </ol>
                </div>
                <div class="lineup-board__column">
                    <h3>"Fielding"</h3>
                    <ul>
                        {move || {
                            lineup
                                .get()
                                .map(|l| {
                                    l.fielding
                                        .iter()
                                        .map(|a| {
                                            view! {
                                                <li>
                                                    <span class="lineup-board__position">
                                                        {a.position}
                                                    </span>
                                                    {a.player.name.clone()}
                                                </li>
                                            }
                                        })
                                        .collect_view()
                                })
                        }}
                    </ul>
                </div>
                <Show when=move || lineup.get().is_some_and(|l| !l.bench.is_empty())>
                    <div class="lineup-board__column">
                        <h3>"Bench"</h3>
                        <ul>
                            {move || {
                                lineup
                                    .get()
                                    .map(|l| {
                                        l.bench
                                            .iter()
                                            .map(|p| view! { <li>{p.name.clone()}</li> })
                                            .collect_view()
                                    })
                            }}
                        </ul>
                    </div>
                </Show>
            </div>
        </Show>
    }
}
