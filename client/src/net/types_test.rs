use super::*;

#[test]
fn user_serde_round_trip() {
    let user = User {
        id: "u-1".to_owned(),
        name: "Casey".to_owned(),
        email: Some("casey@example.com".to_owned()),
        avatar_url: None,
    };
    let json = serde_json::to_string(&user).unwrap();
    let restored: User = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, user);
}

#[test]
fn user_optional_fields_default_when_missing() {
    let user: User = serde_json::from_str(r#"{"id":"u-2","name":"Sam"}"#).unwrap();
    assert_eq!(user.email, None);
    assert_eq!(user.avatar_url, None);
}

#[test]
fn team_season_defaults_to_none() {
    let team: Team = serde_json::from_str(r#"{"id":"t-1","name":"Tigers"}"#).unwrap();
    assert_eq!(team.season, None);
}

#[test]
fn player_round_trip_preserves_jersey_number() {
    let player = Player {
        id: "p-1".to_owned(),
        team_id: "t-1".to_owned(),
        name: "Robin".to_owned(),
        jersey_number: Some(42),
    };
    let json = serde_json::to_string(&player).unwrap();
    let restored: Player = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, player);
}

#[test]
fn null_user_body_parses_as_none() {
    // /api/auth/user answers `200 null` for anonymous sessions.
    let user: Option<User> = serde_json::from_str("null").unwrap();
    assert!(user.is_none());
}
