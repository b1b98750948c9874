use super::*;

const JWT: &str = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiJ1LTEifQ.c2ln";

fn store() -> CredentialStore {
    CredentialStore::in_memory()
}

#[test]
fn well_formed_token_requires_three_nonempty_segments() {
    assert!(is_well_formed_token(JWT));
    assert!(is_well_formed_token("a.b.c"));
    assert!(!is_well_formed_token(""));
    assert!(!is_well_formed_token("a.b"));
    assert!(!is_well_formed_token("a.b.c.d"));
    assert!(!is_well_formed_token("a..c"));
    assert!(!is_well_formed_token(".b.c"));
    assert!(!is_well_formed_token("a.b."));
}

#[test]
fn plain_visit_changes_nothing() {
    let store = store();
    let outcome = normalize(&store, "/app", "", "", 1_000);
    assert_eq!(outcome, NormalizeOutcome::default());
    assert_eq!(store.bearer_token(), None);
    assert_eq!(store.redirect_marker(), None);
}

#[test]
fn query_token_is_persisted_and_stripped() {
    let store = store();
    let outcome = normalize(&store, "/app", &format!("?auth_token={JWT}&just_logged_in=true"), "", 1_000);
    assert!(outcome.token_persisted);
    assert_eq!(store.bearer_token(), Some(JWT.to_owned()));
    // Token removed from the URL; callback param kept for the
    // confirmation effect to observe and strip later.
    assert_eq!(outcome.replace_url, Some("/app?just_logged_in=true".to_owned()));
}

#[test]
fn malformed_query_token_is_discarded() {
    let store = store();
    let outcome = normalize(&store, "/app", "?auth_token=not-a-jwt", "", 1_000);
    assert!(!outcome.token_persisted);
    assert_eq!(store.bearer_token(), None);
    // The bad value is still stripped from the URL.
    assert_eq!(outcome.replace_url, Some("/app".to_owned()));
}

#[test]
fn fragment_token_used_only_when_query_has_none() {
    let store = store();
    let outcome = normalize(&store, "/app", "", &format!("access_token={JWT}&state=xyz"), 1_000);
    assert!(outcome.token_persisted);
    assert_eq!(store.bearer_token(), Some(JWT.to_owned()));
    // The whole fragment is dropped from the rewritten URL.
    assert_eq!(outcome.replace_url, Some("/app".to_owned()));
}

#[test]
fn query_token_wins_over_fragment_token() {
    let store = store();
    let query_jwt = "eyJxdWVyeSI.eyJib2R5In0.c2ln";
    let outcome = normalize(
        &store,
        "/app",
        &format!("?auth_token={query_jwt}"),
        &format!("access_token={JWT}"),
        1_000,
    );
    assert!(outcome.token_persisted);
    assert_eq!(store.bearer_token(), Some(query_jwt.to_owned()));
    // Fragment untouched when the query supplied the token.
    assert_eq!(
        outcome.replace_url,
        Some(format!("/app#access_token={JWT}"))
    );
}

#[test]
fn bare_jwt_fragment_is_recognized() {
    let store = store();
    let outcome = normalize(&store, "/app", "", JWT, 1_000);
    assert!(outcome.token_persisted);
    assert_eq!(store.bearer_token(), Some(JWT.to_owned()));
    assert_eq!(outcome.replace_url, Some("/app".to_owned()));
}

#[test]
fn generic_token_param_in_fragment_is_found() {
    let store = store();
    let outcome = normalize(&store, "/app", "", &format!("state=abc&id_token={JWT}"), 1_000);
    assert!(outcome.token_persisted);
    assert_eq!(store.bearer_token(), Some(JWT.to_owned()));
}

#[test]
fn hosting_redirect_is_decoded_before_token_extraction() {
    let store = store();
    // The 404 handler rewrote /app?auth_token=...&just_logged_in=true
    // into /?/app&auth_token=...~and~just_logged_in=true.
    let search = format!("?/app&auth_token={JWT}~and~just_logged_in=true");
    let outcome = normalize(&store, "/", &search, "", 1_000);
    assert!(outcome.token_persisted, "token must be clean after sentinel decoding");
    assert_eq!(store.bearer_token(), Some(JWT.to_owned()));
    assert_eq!(outcome.replace_url, Some("/app?just_logged_in=true".to_owned()));
}

#[test]
fn hosting_redirect_without_query_restores_path() {
    let store = store();
    let outcome = normalize(&store, "/", "?/app", "", 1_000);
    assert_eq!(outcome.replace_url, Some("/app".to_owned()));
    assert!(!outcome.token_persisted);
}

#[test]
fn ordinary_query_is_not_mistaken_for_rewrite() {
    let store = store();
    let outcome = normalize(&store, "/app", "?tab=roster", "", 1_000);
    assert_eq!(outcome.replace_url, None);
}

#[test]
fn callback_landing_writes_marker_once() {
    let store = store();
    let outcome = normalize(&store, "/app", "?just_logged_in=true", "", 1_234);
    assert!(outcome.marker_written);
    assert_eq!(store.redirect_marker(), Some(1_234));

    // A second normalization (e.g. reload before consumption) must not
    // overwrite the original timestamp.
    let again = normalize(&store, "/app", "?just_logged_in=true", "", 9_999);
    assert!(!again.marker_written);
    assert_eq!(store.redirect_marker(), Some(1_234));
}

#[test]
fn token_persistence_alone_marks_redirect() {
    let store = store();
    let outcome = normalize(&store, "/app", &format!("?auth_token={JWT}"), "", 77);
    assert!(outcome.marker_written);
    assert_eq!(store.redirect_marker(), Some(77));
}

#[test]
fn login_page_never_marks_redirect() {
    let store = store();
    let outcome = normalize(&store, "/app/login", "?just_logged_in=true", "", 1_000);
    assert!(!outcome.marker_written);
    assert_eq!(store.redirect_marker(), None);
}

#[test]
fn off_surface_landing_never_marks_redirect() {
    let store = store();
    let outcome = normalize(&store, "/", "?just_logged_in=true", "", 1_000);
    assert!(!outcome.marker_written);
}

#[test]
fn app_surface_classification() {
    assert!(is_app_surface("/app"));
    assert!(is_app_surface("/app/"));
    assert!(is_app_surface("/app/teams/t-1"));
    assert!(!is_app_surface("/app/login"));
    assert!(!is_app_surface("/app/login/"));
    assert!(!is_app_surface("/"));
    assert!(!is_app_surface("/application"));
}

#[test]
fn multibyte_char_after_percent_sign_is_left_intact() {
    // A lone `%` followed within two bytes by a multibyte character
    // must not split the character; the `%` passes through literally.
    assert_eq!(percent_decode("%a\u{e9}"), "%a\u{e9}");
    assert_eq!(percent_decode("%\u{e9}x"), "%\u{e9}x");
    assert_eq!(percent_decode("caf%C3%A9"), "caf\u{e9}");

    // End to end: such a query can arrive in the live location.
    let store = store();
    let outcome = normalize(&store, "/app", "?x=%a\u{e9}", "", 1_000);
    assert_eq!(outcome, NormalizeOutcome::default());
    assert_eq!(store.bearer_token(), None);
}

#[test]
fn percent_encoded_query_values_survive_round_trip() {
    let store = store();
    let outcome = normalize(
        &store,
        "/app",
        &format!("?auth_token={JWT}&name=Spring%20Tigers"),
        "",
        1_000,
    );
    assert_eq!(outcome.replace_url, Some("/app?name=Spring%20Tigers".to_owned()));
}
