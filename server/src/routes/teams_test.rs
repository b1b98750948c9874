use super::*;

#[test]
fn roster_errors_map_to_expected_statuses() {
    assert_eq!(status_for(&RosterError::NotFound), StatusCode::NOT_FOUND);
    assert_eq!(status_for(&RosterError::Forbidden), StatusCode::FORBIDDEN);
    assert_eq!(
        status_for(&RosterError::Database(sqlx::Error::PoolClosed)),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn create_team_body_accepts_missing_season() {
    let body: CreateTeamBody = serde_json::from_str(r#"{"name":"Tigers"}"#).unwrap();
    assert_eq!(body.name, "Tigers");
    assert_eq!(body.season, None);
}

#[test]
fn create_player_body_accepts_null_jersey() {
    let body: CreatePlayerBody =
        serde_json::from_str(r#"{"name":"Robin","jersey_number":null}"#).unwrap();
    assert_eq!(body.name, "Robin");
    assert_eq!(body.jersey_number, None);
}

#[test]
fn update_bodies_default_all_fields() {
    let team: UpdateTeamBody = serde_json::from_str("{}").unwrap();
    assert_eq!(team.name, None);
    assert_eq!(team.season, None);
    let player: UpdatePlayerBody = serde_json::from_str("{}").unwrap();
    assert_eq!(player.name, None);
    assert_eq!(player.jersey_number, None);
}
