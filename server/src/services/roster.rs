//! Roster service: team and player CRUD with ownership checks.
//!
//! DESIGN
//! ======
//! Every operation takes the acting user's id and enforces ownership
//! in SQL (teams are owned; players inherit through their team). A
//! row that exists but belongs to someone else reports `Forbidden`,
//! not `NotFound`, so the client can distinguish a stale id from a
//! permissions problem.

use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("not found")]
    NotFound,
    #[error("forbidden")]
    Forbidden,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Row returned from team queries.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TeamRow {
    pub id: Uuid,
    pub name: String,
    pub season: Option<String>,
}

/// Row returned from player queries.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PlayerRow {
    pub id: Uuid,
    pub team_id: Uuid,
    pub name: String,
    pub jersey_number: Option<i32>,
}

fn team_from_row(row: &sqlx::postgres::PgRow) -> TeamRow {
    TeamRow { id: row.get("id"), name: row.get("name"), season: row.get("season") }
}

fn player_from_row(row: &sqlx::postgres::PgRow) -> PlayerRow {
    PlayerRow {
        id: row.get("id"),
        team_id: row.get("team_id"),
        name: row.get("name"),
        jersey_number: row.get("jersey_number"),
    }
}

/// Resolve a team's owner, or `NotFound`.
async fn team_owner(pool: &PgPool, team_id: Uuid) -> Result<Uuid, RosterError> {
    let row = sqlx::query("SELECT owner_id FROM teams WHERE id = $1")
        .bind(team_id)
        .fetch_optional(pool)
        .await?
        .ok_or(RosterError::NotFound)?;
    Ok(row.get("owner_id"))
}

async fn require_team_owner(pool: &PgPool, team_id: Uuid, user_id: Uuid) -> Result<(), RosterError> {
    if team_owner(pool, team_id).await? == user_id {
        Ok(())
    } else {
        Err(RosterError::Forbidden)
    }
}

// =============================================================================
// TEAMS
// =============================================================================

/// List the teams owned by `user_id`, oldest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_teams(pool: &PgPool, user_id: Uuid) -> Result<Vec<TeamRow>, RosterError> {
    let rows = sqlx::query(
        "SELECT id, name, season FROM teams WHERE owner_id = $1 ORDER BY created_at, id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(team_from_row).collect())
}

/// Create a team owned by `user_id`.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_team(
    pool: &PgPool,
    user_id: Uuid,
    name: &str,
    season: Option<&str>,
) -> Result<TeamRow, RosterError> {
    let row = sqlx::query(
        "INSERT INTO teams (owner_id, name, season) VALUES ($1, $2, $3)
         RETURNING id, name, season",
    )
    .bind(user_id)
    .bind(name)
    .bind(season)
    .fetch_one(pool)
    .await?;
    Ok(team_from_row(&row))
}

/// Rename or re-season a team. `None` fields are left unchanged.
///
/// # Errors
///
/// `NotFound`/`Forbidden` for bad ids, database errors otherwise.
pub async fn update_team(
    pool: &PgPool,
    user_id: Uuid,
    team_id: Uuid,
    name: Option<&str>,
    season: Option<&str>,
) -> Result<TeamRow, RosterError> {
    require_team_owner(pool, team_id, user_id).await?;
    let row = sqlx::query(
        "UPDATE teams SET name = COALESCE($2, name), season = COALESCE($3, season)
         WHERE id = $1 RETURNING id, name, season",
    )
    .bind(team_id)
    .bind(name)
    .bind(season)
    .fetch_one(pool)
    .await?;
    Ok(team_from_row(&row))
}

/// Delete a team and (via cascade) its roster.
///
/// # Errors
///
/// `NotFound`/`Forbidden` for bad ids, database errors otherwise.
pub async fn delete_team(pool: &PgPool, user_id: Uuid, team_id: Uuid) -> Result<(), RosterError> {
    require_team_owner(pool, team_id, user_id).await?;
    sqlx::query("DELETE FROM teams WHERE id = $1")
        .bind(team_id)
        .execute(pool)
        .await?;
    Ok(())
}

// =============================================================================
// PLAYERS
// =============================================================================

/// List a team's roster, oldest first.
///
/// # Errors
///
/// `NotFound`/`Forbidden` for bad ids, database errors otherwise.
pub async fn list_players(
    pool: &PgPool,
    user_id: Uuid,
    team_id: Uuid,
) -> Result<Vec<PlayerRow>, RosterError> {
    require_team_owner(pool, team_id, user_id).await?;
    let rows = sqlx::query(
        "SELECT id, team_id, name, jersey_number FROM players
         WHERE team_id = $1 ORDER BY created_at, id",
    )
    .bind(team_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(player_from_row).collect())
}

/// Add a player to a team.
///
/// # Errors
///
/// `NotFound`/`Forbidden` for bad ids, database errors otherwise.
pub async fn create_player(
    pool: &PgPool,
    user_id: Uuid,
    team_id: Uuid,
    name: &str,
    jersey_number: Option<i32>,
) -> Result<PlayerRow, RosterError> {
    require_team_owner(pool, team_id, user_id).await?;
    let row = sqlx::query(
        "INSERT INTO players (team_id, name, jersey_number) VALUES ($1, $2, $3)
         RETURNING id, team_id, name, jersey_number",
    )
    .bind(team_id)
    .bind(name)
    .bind(jersey_number)
    .fetch_one(pool)
    .await?;
    Ok(player_from_row(&row))
}

async fn require_player_owner(
    pool: &PgPool,
    player_id: Uuid,
    user_id: Uuid,
) -> Result<(), RosterError> {
    let row = sqlx::query(
        "SELECT t.owner_id FROM players p JOIN teams t ON t.id = p.team_id WHERE p.id = $1",
    )
    .bind(player_id)
    .fetch_optional(pool)
    .await?
    .ok_or(RosterError::NotFound)?;
    let owner: Uuid = row.get("owner_id");
    if owner == user_id { Ok(()) } else { Err(RosterError::Forbidden) }
}

/// Update a player's name or jersey number. `None` fields are left
/// unchanged.
///
/// # Errors
///
/// `NotFound`/`Forbidden` for bad ids, database errors otherwise.
pub async fn update_player(
    pool: &PgPool,
    user_id: Uuid,
    player_id: Uuid,
    name: Option<&str>,
    jersey_number: Option<i32>,
) -> Result<PlayerRow, RosterError> {
    require_player_owner(pool, player_id, user_id).await?;
    let row = sqlx::query(
        "UPDATE players SET name = COALESCE($2, name),
             jersey_number = COALESCE($3, jersey_number)
         WHERE id = $1 RETURNING id, team_id, name, jersey_number",
    )
    .bind(player_id)
    .bind(name)
    .bind(jersey_number)
    .fetch_one(pool)
    .await?;
    Ok(player_from_row(&row))
}

/// Remove a player from their team.
///
/// # Errors
///
/// `NotFound`/`Forbidden` for bad ids, database errors otherwise.
pub async fn delete_player(pool: &PgPool, user_id: Uuid, player_id: Uuid) -> Result<(), RosterError> {
    require_player_owner(pool, player_id, user_id).await?;
    sqlx::query("DELETE FROM players WHERE id = $1")
        .bind(player_id)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
#[path = "roster_test.rs"]
mod tests;
