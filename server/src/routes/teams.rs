//! Team and player REST routes.
//!
//! Handlers translate HTTP to the roster service and map its errors
//! to status codes; all authorization lives in the service layer.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::routes::auth::AuthUser;
use crate::services::roster::{self, PlayerRow, RosterError, TeamRow};
use crate::state::AppState;

fn status_for(e: &RosterError) -> StatusCode {
    match e {
        RosterError::NotFound => StatusCode::NOT_FOUND,
        RosterError::Forbidden => StatusCode::FORBIDDEN,
        RosterError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn map_err(e: RosterError) -> StatusCode {
    if let RosterError::Database(db) = &e {
        tracing::error!(error = %db, "roster query failed");
    }
    status_for(&e)
}

// =============================================================================
// TEAMS
// =============================================================================

/// `GET /api/teams` — teams owned by the current user.
pub async fn list_teams(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<TeamRow>>, StatusCode> {
    roster::list_teams(&state.pool, auth.user.id)
        .await
        .map(Json)
        .map_err(map_err)
}

#[derive(Deserialize)]
pub struct CreateTeamBody {
    name: String,
    #[serde(default)]
    season: Option<String>,
}

/// `POST /api/teams` — create a team.
pub async fn create_team(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateTeamBody>,
) -> Result<Json<TeamRow>, StatusCode> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    roster::create_team(&state.pool, auth.user.id, name, body.season.as_deref())
        .await
        .map(Json)
        .map_err(map_err)
}

#[derive(Deserialize)]
pub struct UpdateTeamBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    season: Option<String>,
}

/// `PATCH /api/teams/{id}` — rename or re-season a team.
pub async fn update_team(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(team_id): Path<Uuid>,
    Json(body): Json<UpdateTeamBody>,
) -> Result<Json<TeamRow>, StatusCode> {
    roster::update_team(
        &state.pool,
        auth.user.id,
        team_id,
        body.name.as_deref(),
        body.season.as_deref(),
    )
    .await
    .map(Json)
    .map_err(map_err)
}

/// `DELETE /api/teams/{id}` — delete a team and its roster.
pub async fn delete_team(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(team_id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    roster::delete_team(&state.pool, auth.user.id, team_id)
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(map_err)
}

// =============================================================================
// PLAYERS
// =============================================================================

/// `GET /api/teams/{id}/players` — a team's roster.
pub async fn list_players(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(team_id): Path<Uuid>,
) -> Result<Json<Vec<PlayerRow>>, StatusCode> {
    roster::list_players(&state.pool, auth.user.id, team_id)
        .await
        .map(Json)
        .map_err(map_err)
}

#[derive(Deserialize)]
pub struct CreatePlayerBody {
    name: String,
    #[serde(default)]
    jersey_number: Option<i32>,
}

/// `POST /api/teams/{id}/players` — add a player.
pub async fn create_player(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(team_id): Path<Uuid>,
    Json(body): Json<CreatePlayerBody>,
) -> Result<Json<PlayerRow>, StatusCode> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    roster::create_player(&state.pool, auth.user.id, team_id, name, body.jersey_number)
        .await
        .map(Json)
        .map_err(map_err)
}

#[derive(Deserialize)]
pub struct UpdatePlayerBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    jersey_number: Option<i32>,
}

/// `PATCH /api/players/{id}` — update a player.
pub async fn update_player(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(player_id): Path<Uuid>,
    Json(body): Json<UpdatePlayerBody>,
) -> Result<Json<PlayerRow>, StatusCode> {
    roster::update_player(
        &state.pool,
        auth.user.id,
        player_id,
        body.name.as_deref(),
        body.jersey_number,
    )
    .await
    .map(Json)
    .map_err(map_err)
}

/// `DELETE /api/players/{id}` — remove a player.
pub async fn delete_player(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(player_id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    roster::delete_player(&state.pool, auth.user.id, player_id)
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(map_err)
}

#[cfg(test)]
#[path = "teams_test.rs"]
mod tests;
