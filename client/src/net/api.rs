//! Credentialed REST helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`. Server-side
//! (SSR): stubs that report a network failure, since these endpoints
//! are only meaningful in the browser.
//!
//! CREDENTIALS
//! ===========
//! Every request includes cookies, and additionally carries
//! `Authorization: Bearer <token>` whenever the credential store holds
//! a token. Both are always sent; the server arbitrates precedence.
//! This covers browsers that drop the cross-site session cookie
//! (Safari ITP) without forking the request path per browser.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures (connection refused, CORS rejection) surface as
//! `ApiError::Network`, distinct from HTTP status errors: the identity
//! probe maps network failures to "not authenticated" instead of
//! escalating them.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;

use super::types::{Player, Team, User};
use crate::util::credential_store::CredentialStore;

/// Request-layer failure taxonomy. Storage errors never reach this
/// layer; they are absorbed by the credential store.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, CORS rejection).
    #[error("network error: {0}")]
    Network(String),
    /// HTTP 401 under [`OnUnauthorized::Error`].
    #[error("unauthorized")]
    Unauthorized,
    /// Any other non-2xx response.
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
}

/// Policy for credentialed GETs that hit a 401.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnUnauthorized {
    /// Treat 401 as "no data" — used by the identity probe.
    ReturnNone,
    /// Surface [`ApiError::Unauthorized`] to the caller.
    Error,
}

/// HTTP methods used by roster mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Post,
    Patch,
    Delete,
}

/// Handle for aborting an in-flight request. Inert outside the browser.
#[derive(Clone, Debug, Default)]
pub struct AbortHandle {
    #[cfg(feature = "hydrate")]
    controller: Option<web_sys::AbortController>,
}

impl AbortHandle {
    #[must_use]
    pub fn new() -> Self {
        #[cfg(feature = "hydrate")]
        {
            Self { controller: web_sys::AbortController::new().ok() }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self {}
        }
    }

    /// Abort the request this handle was attached to, if still running.
    pub fn abort(&self) {
        #[cfg(feature = "hydrate")]
        if let Some(controller) = &self.controller {
            controller.abort();
        }
    }

    #[cfg(feature = "hydrate")]
    fn signal(&self) -> Option<web_sys::AbortSignal> {
        self.controller.as_ref().map(web_sys::AbortController::signal)
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn players_endpoint(team_id: &str) -> String {
    format!("/api/teams/{team_id}/players")
}

#[cfg(any(test, feature = "hydrate"))]
fn team_endpoint(team_id: &str) -> String {
    format!("/api/teams/{team_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn player_endpoint(player_id: &str) -> String {
    format!("/api/players/{player_id}")
}

/// Credentialed GET returning the parsed JSON body.
///
/// `Ok(None)` covers both a literal `null` body and a 401 under the
/// [`OnUnauthorized::ReturnNone`] policy.
///
/// # Errors
///
/// `Network` on transport failure, `Unauthorized` on 401 under the
/// error policy, `Http` on any other non-2xx status.
pub async fn fetch_json<T: DeserializeOwned>(
    store: &CredentialStore,
    path: &str,
    on_unauthorized: OnUnauthorized,
    abort: Option<&AbortHandle>,
) -> Result<Option<T>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let mut req = gloo_net::http::Request::get(path)
            .credentials(web_sys::RequestCredentials::Include);
        if let Some(token) = store.bearer_token() {
            req = req.header("Authorization", &format!("Bearer {token}"));
        }
        let signal = abort.and_then(AbortHandle::signal);
        req = req.abort_signal(signal.as_ref());

        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        match resp.status() {
            200..=299 => resp
                .json::<Option<T>>()
                .await
                .map_err(|e| ApiError::Network(e.to_string())),
            401 => match on_unauthorized {
                OnUnauthorized::ReturnNone => Ok(None),
                OnUnauthorized::Error => Err(ApiError::Unauthorized),
            },
            status => Err(ApiError::Http { status, body: resp.text().await.unwrap_or_default() }),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (store, path, on_unauthorized, abort);
        Err(ApiError::Network("not available on server".to_owned()))
    }
}

/// Credentialed mutation. Non-2xx always fails; there is no
/// return-none policy for writes.
///
/// # Errors
///
/// `Network` on transport failure, `Unauthorized` on 401, `Http`
/// otherwise.
pub async fn mutate<T: DeserializeOwned>(
    store: &CredentialStore,
    method: Method,
    path: &str,
    body: Option<&serde_json::Value>,
) -> Result<T, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let mut builder = match method {
            Method::Post => gloo_net::http::Request::post(path),
            Method::Patch => gloo_net::http::Request::patch(path),
            Method::Delete => gloo_net::http::Request::delete(path),
        }
        .credentials(web_sys::RequestCredentials::Include);
        if let Some(token) = store.bearer_token() {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }

        let req = match body {
            Some(value) => builder
                .json(value)
                .map_err(|e| ApiError::Network(e.to_string()))?,
            None => builder.build().map_err(|e| ApiError::Network(e.to_string()))?,
        };

        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        match resp.status() {
            200..=299 => resp
                .json::<T>()
                .await
                .map_err(|e| ApiError::Network(e.to_string())),
            401 => Err(ApiError::Unauthorized),
            status => Err(ApiError::Http { status, body: resp.text().await.unwrap_or_default() }),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (store, method, path, body);
        Err(ApiError::Network("not available on server".to_owned()))
    }
}

/// Identity probe against `/api/auth/user`.
///
/// The server answers `200 null` for anonymous sessions; a 401 or a
/// transport/CORS failure reads the same way. Every failure class
/// degrades to `None` — this call is non-critical-path and must never
/// crash the app.
pub async fn fetch_current_user(store: &CredentialStore) -> Option<User> {
    match fetch_json::<User>(store, "/api/auth/user", OnUnauthorized::ReturnNone, None).await {
        Ok(user) => user,
        Err(e) => {
            leptos::logging::warn!("identity check failed, treating as anonymous: {e}");
            None
        }
    }
}

/// Fetch the current user's teams (401 throws).
///
/// # Errors
///
/// Propagates the request-layer taxonomy; never retries.
pub async fn list_teams(
    store: &CredentialStore,
    abort: Option<&AbortHandle>,
) -> Result<Vec<Team>, ApiError> {
    let teams = fetch_json::<Vec<Team>>(store, "/api/teams", OnUnauthorized::Error, abort).await?;
    Ok(teams.unwrap_or_default())
}

/// Fetch the roster for one team (401 throws).
///
/// # Errors
///
/// Propagates the request-layer taxonomy; never retries.
pub async fn list_players(
    store: &CredentialStore,
    team_id: &str,
    abort: Option<&AbortHandle>,
) -> Result<Vec<Player>, ApiError> {
    #[cfg(feature = "hydrate")]
    let path = players_endpoint(team_id);
    #[cfg(not(feature = "hydrate"))]
    let path = {
        let _ = team_id;
        String::new()
    };
    let players =
        fetch_json::<Vec<Player>>(store, &path, OnUnauthorized::Error, abort).await?;
    Ok(players.unwrap_or_default())
}

/// Create a team.
///
/// # Errors
///
/// Propagates the request-layer taxonomy.
pub async fn create_team(
    store: &CredentialStore,
    name: &str,
    season: Option<&str>,
) -> Result<Team, ApiError> {
    let body = serde_json::json!({ "name": name, "season": season });
    mutate(store, Method::Post, "/api/teams", Some(&body)).await
}

/// Delete a team and its roster.
///
/// # Errors
///
/// Propagates the request-layer taxonomy.
pub async fn delete_team(store: &CredentialStore, team_id: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    let path = team_endpoint(team_id);
    #[cfg(not(feature = "hydrate"))]
    let path = {
        let _ = team_id;
        String::new()
    };
    mutate::<serde_json::Value>(store, Method::Delete, &path, None).await?;
    Ok(())
}

/// Add a player to a team's roster.
///
/// # Errors
///
/// Propagates the request-layer taxonomy.
pub async fn create_player(
    store: &CredentialStore,
    team_id: &str,
    name: &str,
    jersey_number: Option<i32>,
) -> Result<Player, ApiError> {
    #[cfg(feature = "hydrate")]
    let path = players_endpoint(team_id);
    #[cfg(not(feature = "hydrate"))]
    let path = {
        let _ = team_id;
        String::new()
    };
    let body = serde_json::json!({ "name": name, "jersey_number": jersey_number });
    mutate(store, Method::Post, &path, Some(&body)).await
}

/// Remove a player from their team's roster.
///
/// # Errors
///
/// Propagates the request-layer taxonomy.
pub async fn delete_player(store: &CredentialStore, player_id: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    let path = player_endpoint(player_id);
    #[cfg(not(feature = "hydrate"))]
    let path = {
        let _ = player_id;
        String::new()
    };
    mutate::<serde_json::Value>(store, Method::Delete, &path, None).await?;
    Ok(())
}

/// Best-effort logout; clears the server session. Errors are ignored —
/// local credential state is cleared by the caller regardless.
pub async fn logout(store: &CredentialStore) {
    let _ = mutate::<serde_json::Value>(store, Method::Post, "/api/auth/logout", None).await;
}
