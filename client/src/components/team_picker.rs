//! Team selector dropdown.

use leptos::prelude::*;

use crate::net::types::Team;

/// A select over the loaded teams. Selection changes flow through
/// `on_select`; the parent owns the actual state write.
#[component]
pub fn TeamPicker(
    teams: Signal<Vec<Team>>,
    selected: Signal<Option<String>>,
    on_select: Callback<String>,
) -> impl IntoView {
    view! {
        <select
            class="team-picker"
            prop:value=move || selected.get().unwrap_or_default()
            on:change=move |ev| {
                let value = event_target_value(&ev);
                if !value.is_empty() {
                    on_select.run(value);
                }
            }
        >
            <Show when=move || selected.get().is_none()>
                <option value="">"Select a team"</option>
            </Show>
            <For
                each=move || teams.get()
                key=|team| team.id.clone()
                children=move |team: Team| {
                    let label = match &team.season {
                        Some(season) => format!("{} ({season})", team.name),
                        None => team.name.clone(),
                    };
                    view! { <option value=team.id.clone()>{label}</option> }
                }
            />
        </select>
    }
}
