//! Wire DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! Ids travel as strings (server-side UUIDs serialized) so the client
//! never depends on a UUID implementation; optional fields default to
//! `None` to stay lossless against older server payloads.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// An authenticated user as returned by `/api/auth/user`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier (UUID string).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address, if the account has one.
    #[serde(default)]
    pub email: Option<String>,
    /// Avatar image URL, if available.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A team owned by the current user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique team identifier (UUID string).
    pub id: String,
    /// Team display name.
    pub name: String,
    /// Free-form season label (e.g. `"Spring 2026"`).
    #[serde(default)]
    pub season: Option<String>,
}

/// A player on a team's roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique player identifier (UUID string).
    pub id: String,
    /// Team this player belongs to (UUID string).
    pub team_id: String,
    /// Player display name.
    pub name: String,
    /// Jersey number, if assigned.
    #[serde(default)]
    pub jersey_number: Option<i32>,
}
