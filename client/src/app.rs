//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{login::LoginPage, roster::RosterPage};
use crate::state::auth::AuthState;
use crate::state::players::PlayersState;
use crate::state::teams::TeamsState;
use crate::util::bootstrap;
use crate::util::credential_store::CredentialStore;
use crate::util::timer::OneShot;

/// Tunable delays for the auth reconciliation flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Delay before the single post-redirect identity re-check.
    pub recheck_delay_ms: u64,
    /// How long storage-delayed browsers hold the fetch gate after an
    /// OAuth redirect (see `util::platform`).
    pub settle_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { recheck_delay_ms: 1_500, settle_delay_ms: 1_500 }
    }
}

/// Everything the auth machinery and fetchers share, provided as one
/// context at the root.
#[derive(Clone)]
pub struct AppContext {
    pub auth: RwSignal<AuthState>,
    pub teams: RwSignal<TeamsState>,
    pub players: RwSignal<PlayersState>,
    pub store: CredentialStore,
    pub config: AppConfig,
    /// Timer slot for the post-redirect identity re-check.
    pub recheck_timer: OneShot,
    /// Timer slot for the storage settle delay.
    pub settle_timer: OneShot,
}

impl AppContext {
    #[must_use]
    pub fn new(store: CredentialStore, config: AppConfig) -> Self {
        // Guest mode survives reloads; seed it from storage so the
        // login redirect never flashes for a returning guest.
        let auth = RwSignal::new(AuthState::with_guest_flag(store.guest_mode()));
        Self {
            auth,
            teams: RwSignal::new(TeamsState::default()),
            players: RwSignal::new(PlayersState::default()),
            store,
            config,
            recheck_timer: OneShot::new(),
            settle_timer: OneShot::new(),
        }
    }
}

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Normalizes the URL before the router sees it, then provides the
/// shared context and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let store = CredentialStore::browser();
    // Must run before the router reads the location: it restores
    // 404-rewritten deep links and pulls the bearer token out of the
    // URL.
    bootstrap::run(&store);

    let ctx = AppContext::new(store, AppConfig::default());
    provide_context(ctx.clone());

    crate::util::auth::install_auth(&ctx);

    view! {
        <Stylesheet id="leptos" href="/pkg/dugout.css"/>
        <Title text="Dugout"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=(StaticSegment("app"), StaticSegment("login")) view=LoginPage/>
                <Route path=StaticSegment("app") view=RosterPage/>
                <Route path=StaticSegment("") view=RosterPage/>
            </Routes>
        </Router>
    }
}
