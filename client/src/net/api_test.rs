use super::*;

#[test]
fn players_endpoint_embeds_team_id() {
    assert_eq!(players_endpoint("t-7"), "/api/teams/t-7/players");
}

#[test]
fn team_endpoint_embeds_team_id() {
    assert_eq!(team_endpoint("t-7"), "/api/teams/t-7");
}

#[test]
fn player_endpoint_embeds_player_id() {
    assert_eq!(player_endpoint("p-3"), "/api/players/p-3");
}

#[test]
fn abort_handle_is_inert_off_browser() {
    // Native build has no AbortController; abort must be a no-op, not
    // a panic, because fetcher teardown calls it unconditionally.
    let handle = AbortHandle::new();
    handle.abort();
    let cloned = handle.clone();
    cloned.abort();
}

#[test]
fn api_error_messages_are_descriptive() {
    let net = ApiError::Network("connection refused".to_owned());
    assert_eq!(net.to_string(), "network error: connection refused");
    let unauth = ApiError::Unauthorized;
    assert_eq!(unauth.to_string(), "unauthorized");
    let http = ApiError::Http { status: 500, body: "boom".to_owned() };
    assert_eq!(http.to_string(), "http 500: boom");
}
