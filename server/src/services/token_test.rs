use super::*;

#[test]
fn mint_verify_round_trip() {
    let signer = TokenSigner::for_tests();
    let user_id = Uuid::new_v4();
    let token = signer.mint(user_id).unwrap();
    assert_eq!(signer.verify(&token), Some(user_id));
}

#[test]
fn minted_token_has_three_segments() {
    // The client validates token shape before persisting it.
    let signer = TokenSigner::for_tests();
    let token = signer.mint(Uuid::new_v4()).unwrap();
    assert_eq!(token.split('.').filter(|s| !s.is_empty()).count(), 3);
    assert!(token.starts_with("eyJ"));
}

#[test]
fn wrong_secret_fails_verification() {
    let signer = TokenSigner::for_tests();
    let other = TokenSigner::new("another-secret-another-secret-another!", 3600).unwrap();
    let token = signer.mint(Uuid::new_v4()).unwrap();
    assert_eq!(other.verify(&token), None);
}

#[test]
fn tampered_token_fails_verification() {
    let signer = TokenSigner::for_tests();
    let token = signer.mint(Uuid::new_v4()).unwrap();
    let mut tampered = token.clone();
    tampered.pop();
    tampered.push('A');
    assert_eq!(signer.verify(&tampered), None);
}

#[test]
fn garbage_fails_verification() {
    let signer = TokenSigner::for_tests();
    assert_eq!(signer.verify(""), None);
    assert_eq!(signer.verify("not-a-token"), None);
    assert_eq!(signer.verify("a.b.c"), None);
}

#[test]
fn expired_token_fails_verification() {
    let signer = TokenSigner::for_tests();
    // Hand-roll claims with an exp far in the past.
    let claims = Claims { sub: Uuid::new_v4(), iat: 1_000, exp: 2_000 };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"test-secret-test-secret-test-secret!"),
    )
    .unwrap();
    assert_eq!(signer.verify(&token), None);
}

#[test]
fn short_secret_is_rejected() {
    assert!(matches!(TokenSigner::new("short", 3600), Err(TokenError::WeakSecret)));
}
