//! Login page: GitHub OAuth or guest mode.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::AppContext;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let navigate = use_navigate();

    // An already-resolved identity (or active guest session) skips the
    // login screen.
    let ctx_redirect = ctx.clone();
    let navigate_app = navigate.clone();
    Effect::new(move || {
        let state = ctx_redirect.auth.get();
        if !state.is_loading() && (state.is_authenticated() || state.is_guest_mode()) {
            navigate_app("/app", NavigateOptions::default());
        }
    });

    let ctx_guest = ctx.clone();
    let on_guest = move |_| {
        crate::util::auth::set_guest_mode(&ctx_guest, true);
        navigate("/app", NavigateOptions::default());
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Dugout"</h1>
                <p class="login-card__subtitle">"Manage your team rosters"</p>
                <a
                    href="/auth/github"
                    class="login-button"
                    on:click=move |ev| {
                        ev.prevent_default();
                        #[cfg(feature = "hydrate")]
                        {
                            if let Some(window) = web_sys::window() {
                                let _ = window.location().set_href("/auth/github");
                            }
                        }
                    }
                >
                    "Sign in with GitHub"
                </a>
                <div class="login-divider"></div>
                <button class="login-button login-button--secondary" on:click=on_guest>
                    "Continue as guest"
                </button>
                <p class="login-message">
                    "Guest rosters live in this browser only and are lost on refresh."
                </p>
            </div>
        </div>
    }
}
