use super::*;

// =============================================================================
// env_bool — uses unique env var names to avoid races with parallel tests.
// =============================================================================

#[test]
fn env_bool_true_variants() {
    for (i, val) in ["1", "true", "yes", "on"].iter().enumerate() {
        let key = format!("__TEST_EB_TRUE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(true), "expected true for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_false_variants() {
    for (i, val) in ["0", "false", "no", "off"].iter().enumerate() {
        let key = format!("__TEST_EB_FALSE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(false), "expected false for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_invalid_returns_none() {
    let key = "__TEST_EB_INVALID_4471__";
    unsafe { std::env::set_var(key, "maybe") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_bool_unset_returns_none() {
    assert_eq!(env_bool("__TEST_EB_SURELY_UNSET_XYZ_17__"), None);
}

// =============================================================================
// bearer_token
// =============================================================================

#[test]
fn bearer_token_parses_authorization_header() {
    let mut headers = axum::http::HeaderMap::new();
    headers.insert(AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
    assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
}

#[test]
fn bearer_token_requires_bearer_scheme() {
    let mut headers = axum::http::HeaderMap::new();
    headers.insert(AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());
    assert_eq!(bearer_token(&headers), None);
}

#[test]
fn bearer_token_rejects_empty_token() {
    let mut headers = axum::http::HeaderMap::new();
    headers.insert(AUTHORIZATION, "Bearer ".parse().unwrap());
    assert_eq!(bearer_token(&headers), None);
}

#[test]
fn bearer_token_absent_header_is_none() {
    let headers = axum::http::HeaderMap::new();
    assert_eq!(bearer_token(&headers), None);
}

// =============================================================================
// callback redirect
// =============================================================================

#[test]
fn callback_redirect_lands_on_app_with_token_and_flag() {
    let url = callback_redirect_url("eyJa.eyJb.sig");
    assert_eq!(url, "/app?auth_token=eyJa.eyJb.sig&just_logged_in=true");
}
