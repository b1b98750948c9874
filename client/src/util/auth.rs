//! Auth reconciliation wiring.
//!
//! SYSTEM CONTEXT
//! ==============
//! Bridges the pure [`AuthState`] transitions to the reactive layer:
//! the mount-time identity check, the OAuth redirect confirmation with
//! its single cancellable re-check, guest mode, and sign-out. Route
//! components call the `install_*` helpers so every page applies
//! identical behavior.
//!
//! DESIGN
//! ======
//! The redirect-confirmation effect tracks ONLY the location signals.
//! Auth state is read with `with_untracked` and written with `update`;
//! tracking it would make the effect re-run on its own writes.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_location;

use crate::app::AppContext;
use crate::net::api;
use crate::state::auth::{AuthState, CheckResolution, SettleState};
use crate::util::{bootstrap, platform};

/// Start an identity check against the server. The stale-token guard
/// in [`AuthState::finish_check`] makes this safe to call while an
/// earlier check is still in flight.
pub fn run_identity_check(ctx: &AppContext) {
    let token = ctx.auth.try_update(AuthState::begin_check).unwrap_or_default();
    #[cfg(feature = "hydrate")]
    {
        let ctx = ctx.clone();
        leptos::task::spawn_local(async move {
            let user = api::fetch_current_user(&ctx.store).await;
            finish_identity_check(&ctx, token, user);
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
    }
}

#[cfg(feature = "hydrate")]
fn finish_identity_check(ctx: &AppContext, token: u64, user: Option<crate::net::types::User>) {
    let resolution = ctx
        .auth
        .try_update(|a| a.finish_check(token, user))
        .unwrap_or(CheckResolution::Stale);
    if resolution == (CheckResolution::Confirmed { cleared_guest_flag: true }) {
        // A confirmed identity overrides guest mode; persist the
        // cleared flag so the next page load agrees.
        ctx.store.set_guest_mode(false);
    }
}

/// Kick off the first identity check after hydration.
pub fn install_auth(ctx: &AppContext) {
    let ctx = ctx.clone();
    // No tracked reads inside, so this runs exactly once client-side.
    Effect::new(move || {
        run_identity_check(&ctx);
    });
}

/// Whether this page view should run redirect confirmation.
#[must_use]
pub fn should_confirm_redirect(
    has_callback_param: bool,
    has_marker: bool,
    already_handled: bool,
) -> bool {
    !already_handled && (has_callback_param || has_marker)
}

pub(crate) fn has_callback_param(search: &str) -> bool {
    let query = search.strip_prefix('?').unwrap_or(search);
    bootstrap::parse_pairs(query)
        .iter()
        .any(|(key, _)| key == bootstrap::CALLBACK_PARAM)
}

/// Query string with the callback parameter removed, or `None` when it
/// was not present.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn search_without_callback(search: &str) -> Option<String> {
    let query = search.strip_prefix('?').unwrap_or(search);
    let mut pairs = bootstrap::parse_pairs(query);
    bootstrap::remove_pair(&mut pairs, bootstrap::CALLBACK_PARAM)?;
    Some(bootstrap::encode_pairs(&pairs))
}

/// Confirm an OAuth callback landing: consume the marker, strip the
/// callback parameter from the URL, hold the gate for the storage
/// settle delay where the browser needs it, and arm one cancellable
/// re-check of the identity.
pub fn install_redirect_confirmation(ctx: &AppContext) {
    let location = use_location();
    let ctx_effect = ctx.clone();
    Effect::new(move || {
        let path = location.pathname.get();
        let search = location.search.get();
        if !bootstrap::is_app_surface(&path) {
            return;
        }
        let callback = has_callback_param(&search);
        let marker = ctx_effect.store.redirect_marker().is_some();
        let already = ctx_effect.auth.with_untracked(AuthState::redirect_handled);
        if !should_confirm_redirect(callback, marker, already) {
            return;
        }

        ctx_effect.auth.update(AuthState::mark_redirect_handled);
        let _ = ctx_effect.store.take_redirect_marker();

        if callback {
            strip_callback_from_url(&path, &search);
        }

        if platform::requires_settle_delay() {
            ctx_effect.auth.update(|a| a.set_settle(SettleState::Waiting));
            let settle_ctx = ctx_effect.clone();
            ctx_effect.settle_timer.schedule(ctx_effect.config.settle_delay_ms, move || {
                settle_ctx.auth.update(|a| a.set_settle(SettleState::Elapsed));
            });
        }

        // One re-check: the cookie set during the OAuth callback may
        // not have been visible to the check that ran at mount.
        // Re-arming supersedes, so repeated confirmations cannot stack
        // checks.
        let recheck_ctx = ctx_effect.clone();
        ctx_effect.recheck_timer.schedule(ctx_effect.config.recheck_delay_ms, move || {
            run_identity_check(&recheck_ctx);
        });
    });

    let cleanup_ctx = ctx.clone();
    on_cleanup(move || {
        cleanup_ctx.recheck_timer.cancel();
        cleanup_ctx.settle_timer.cancel();
        let _ = cleanup_ctx.auth.try_update(AuthState::reset_redirect_handled);
    });
}

fn strip_callback_from_url(path: &str, search: &str) {
    #[cfg(feature = "hydrate")]
    {
        let Some(new_search) = search_without_callback(search) else {
            return;
        };
        let url = if new_search.is_empty() {
            path.to_owned()
        } else {
            format!("{path}?{new_search}")
        };
        if let Some(window) = web_sys::window()
            && let Ok(history) = window.history()
            && let Err(e) =
                history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url))
        {
            leptos::logging::warn!("failed to strip callback parameter: {e:?}");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (path, search);
    }
}

/// Toggle guest mode, store first so a crash between the two writes
/// leaves the persisted flag authoritative.
pub fn set_guest_mode(ctx: &AppContext, enabled: bool) {
    ctx.store.set_guest_mode(enabled);
    ctx.auth.update(|a| a.set_guest_mode(enabled));
}

/// Sign out: best-effort server logout, clear local credentials, drop
/// all fetched data.
pub fn sign_out(ctx: &AppContext) {
    #[cfg(feature = "hydrate")]
    {
        let store = ctx.store.clone();
        leptos::task::spawn_local(async move {
            api::logout(&store).await;
        });
    }
    ctx.store.clear_bearer_token();
    ctx.store.set_guest_mode(false);
    ctx.auth.update(|a| a.sign_out());
    ctx.teams.update(crate::state::teams::TeamsState::disable);
    ctx.players.update(crate::state::players::PlayersState::disable);
}

/// Redirect to the login page whenever auth has resolved and neither a
/// user nor guest mode is present.
pub fn install_signin_redirect<F>(ctx: &AppContext, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let auth = ctx.auth;
    Effect::new(move || {
        let state = auth.get();
        if !state.is_loading() && !state.is_authenticated() && !state.is_guest_mode() {
            navigate("/app/login", NavigateOptions::default());
        }
    });
}
