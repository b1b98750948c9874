//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the REST API and the Leptos SSR app under a single Axum
//! router. The SPA lives under `/app`; the root redirects into it.

pub mod auth;
pub mod teams;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// REST API routes shared by the SSR app and any external client.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/login", get(redirect_login_to_app))
        .route("/auth/github", get(auth::github_redirect))
        .route("/auth/github/callback", get(auth::github_callback))
        .route("/api/auth/user", get(auth::current_user))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/teams", get(teams::list_teams).post(teams::create_team))
        .route(
            "/api/teams/{id}",
            axum::routing::patch(teams::update_team).delete(teams::delete_team),
        )
        .route(
            "/api/teams/{id}/players",
            get(teams::list_players).post(teams::create_player),
        )
        .route(
            "/api/players/{id}",
            axum::routing::patch(teams::update_player).delete(teams::delete_player),
        )
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

async fn redirect_login_to_app() -> Redirect {
    Redirect::temporary("/app/login")
}

/// Full application: API routes + Leptos SSR + static assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded
/// (missing or malformed `Cargo.toml` `[package.metadata.leptos]`
/// section).
pub fn app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    // Leptos static assets (WASM, CSS, JS) from the site root.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
