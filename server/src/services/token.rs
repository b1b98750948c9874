//! Signed bearer tokens for the cookie-less fallback path.
//!
//! SYSTEM CONTEXT
//! ==============
//! Some browsers refuse the session cookie on the redirect back from
//! GitHub (cross-site tracking protections). The OAuth callback also
//! hands the client a short-lived signed token in the redirect URL;
//! the client stores it and replays it as `Authorization: Bearer`.
//! Requests are authenticated cookie-first, bearer-fallback.
//!
//! Tokens are HS256 JWTs carrying only the user id. They are a
//! fallback credential, not a replacement for sessions: the cookie
//! session outlives them.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const DEFAULT_EXPIRY_SECONDS: u64 = 60 * 60 * 24 * 7;
const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("JWT_SECRET must be at least {MIN_SECRET_LEN} characters")]
    WeakSecret,
    #[error("token encoding failed: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id the token authenticates.
    sub: Uuid,
    iat: u64,
    exp: u64,
}

/// Mints and verifies bearer tokens.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_seconds: u64,
}

impl TokenSigner {
    /// # Errors
    ///
    /// Rejects secrets shorter than 32 characters.
    pub fn new(secret: &str, expiry_seconds: u64) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(TokenError::WeakSecret);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_seconds,
        })
    }

    /// Signer from `JWT_SECRET`, or an ephemeral random secret when
    /// unset. Ephemeral means bearer tokens die with the process;
    /// cookie sessions are unaffected.
    ///
    /// # Errors
    ///
    /// Returns an error when `JWT_SECRET` is set but too short.
    pub fn from_env() -> Result<Self, TokenError> {
        match std::env::var("JWT_SECRET") {
            Ok(secret) => Self::new(&secret, DEFAULT_EXPIRY_SECONDS),
            Err(_) => {
                tracing::warn!("JWT_SECRET not set; bearer tokens will not survive restarts");
                let secret = super::session::generate_token();
                Self::new(&secret, DEFAULT_EXPIRY_SECONDS)
            }
        }
    }

    #[cfg(test)]
    #[must_use]
    pub fn for_tests() -> Self {
        Self::new("test-secret-test-secret-test-secret!", DEFAULT_EXPIRY_SECONDS)
            .expect("test secret is long enough")
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }

    /// Mint a token for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn mint(&self, user_id: Uuid) -> Result<String, TokenError> {
        let iat = Self::now();
        let claims = Claims { sub: user_id, iat, exp: iat + self.expiry_seconds };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Verify a token and return the user id it authenticates.
    /// Invalid, expired, or tampered tokens return `None`; the caller
    /// treats that the same as no credential at all.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<Uuid> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation)
            .ok()
            .map(|data| data.claims.sub)
    }
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
