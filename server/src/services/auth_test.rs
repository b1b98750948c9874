use super::*;

#[test]
fn authorize_url_carries_client_id_and_state() {
    let config = GitHubConfig {
        client_id: "cid-123".into(),
        client_secret: "secret".into(),
        redirect_uri: "https://dugout.example/auth/github/callback".into(),
    };
    let url = config.authorize_url("csrf-state-xyz");
    assert!(url.starts_with("https://github.com/login/oauth/authorize?"));
    assert!(url.contains("client_id=cid-123"));
    assert!(url.contains("state=csrf-state-xyz"));
    assert!(url.contains("redirect_uri=https://dugout.example/auth/github/callback"));
}

#[test]
fn display_name_prefers_profile_name() {
    let gh = GitHubUser {
        id: 1,
        login: "octocat".into(),
        name: Some("The Octocat".into()),
        email: None,
        avatar_url: None,
    };
    assert_eq!(gh.display_name(), "The Octocat");
}

#[test]
fn display_name_falls_back_to_login() {
    let gh = GitHubUser { id: 1, login: "octocat".into(), name: None, email: None, avatar_url: None };
    assert_eq!(gh.display_name(), "octocat");
    let blank = GitHubUser {
        id: 1,
        login: "octocat".into(),
        name: Some(String::new()),
        email: None,
        avatar_url: None,
    };
    assert_eq!(blank.display_name(), "octocat");
}

#[test]
fn github_user_parses_minimal_payload() {
    let gh: GitHubUser =
        serde_json::from_str(r#"{"id": 42, "login": "octocat", "name": null, "email": null, "avatar_url": null}"#)
            .unwrap();
    assert_eq!(gh.id, 42);
    assert_eq!(gh.login, "octocat");
}
