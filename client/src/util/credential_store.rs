//! Persisted credential and flag storage with fail-soft semantics.
//!
//! SYSTEM CONTEXT
//! ==============
//! The bootstrap normalizer, the auth reconciliation machinery, and the
//! roster fetchers all read and write a small set of persisted keys:
//! the bearer token, the guest-mode flag, the last-selected team, and
//! the one-shot OAuth redirect marker. Access is synchronous and
//! single-threaded; no two keys ever need to change atomically.
//!
//! ERROR HANDLING
//! ==============
//! Browser storage can throw (private browsing, quota, disabled
//! cookies). Every failure is caught here, logged as a warning, and
//! degraded to a no-op write or an absent read. The one exception is
//! the guest flag: an unreadable flag reads as `true`, because failing
//! toward guest mode never enables authenticated-only fetches (those
//! are independently gated on a confirmed identity) while failing
//! toward `false` could strand a guest user on the login screen.

#[cfg(test)]
#[path = "credential_store_test.rs"]
mod credential_store_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const BEARER_TOKEN_KEY: &str = "dugout_auth_token";
const GUEST_MODE_KEY: &str = "dugout_guest_mode";
const LAST_TEAM_KEY: &str = "dugout_last_team";
const REDIRECT_MARKER_KEY: &str = "dugout_oauth_redirect";

/// Underlying storage failed; never propagated past this module.
#[derive(Debug, thiserror::Error)]
#[error("storage unavailable: {0}")]
pub struct StorageError(pub String);

/// Pluggable key-value persistence.
///
/// `Send + Sync` so the store can live in the app context; the browser
/// backend re-resolves `localStorage` per call instead of holding a
/// thread-bound handle.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory backend for native builds, SSR, and tests.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StorageError("memory backend poisoned".to_owned()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError("memory backend poisoned".to_owned()))?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError("memory backend poisoned".to_owned()))?;
        entries.remove(key);
        Ok(())
    }
}

/// Browser `localStorage` backend.
#[cfg(feature = "hydrate")]
#[derive(Debug, Default)]
pub struct WebStorageBackend;

#[cfg(feature = "hydrate")]
impl WebStorageBackend {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError("no window".to_owned()))?
            .local_storage()
            .map_err(|e| StorageError(format!("{e:?}")))?
            .ok_or_else(|| StorageError("localStorage unavailable".to_owned()))
    }
}

#[cfg(feature = "hydrate")]
impl StorageBackend for WebStorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError(format!("{e:?}")))
    }
}

/// Shared handle over the persisted credential keys.
///
/// Constructed once at app start and injected everywhere; tests build a
/// fresh in-memory instance per case.
#[derive(Clone)]
pub struct CredentialStore {
    backend: Arc<dyn StorageBackend>,
}

impl CredentialStore {
    /// Store backed by browser `localStorage`; in-memory outside the browser.
    #[must_use]
    pub fn browser() -> Self {
        #[cfg(feature = "hydrate")]
        {
            Self::with_backend(Arc::new(WebStorageBackend))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self::in_memory()
        }
    }

    /// Fresh store backed by an in-memory map.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_backend(Arc::new(MemoryBackend::default()))
    }

    #[must_use]
    pub fn with_backend(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(e) => {
                leptos::logging::warn!("credential store read failed for {key}: {e}");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.backend.set(key, value) {
            leptos::logging::warn!("credential store write failed for {key}: {e}");
        }
    }

    fn erase(&self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            leptos::logging::warn!("credential store remove failed for {key}: {e}");
        }
    }

    /// Bearer token written by the bootstrap normalizer, if any.
    #[must_use]
    pub fn bearer_token(&self) -> Option<String> {
        self.read(BEARER_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn set_bearer_token(&self, token: &str) {
        self.write(BEARER_TOKEN_KEY, token);
    }

    pub fn clear_bearer_token(&self) {
        self.erase(BEARER_TOKEN_KEY);
    }

    /// Guest-mode flag. Unreadable storage reads as `true` (fail toward
    /// guest mode); an absent key reads as `false`.
    #[must_use]
    pub fn guest_mode(&self) -> bool {
        match self.backend.get(GUEST_MODE_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                leptos::logging::warn!("guest flag unreadable, defaulting to guest: {e}");
                true
            }
        }
    }

    pub fn set_guest_mode(&self, enabled: bool) {
        self.write(GUEST_MODE_KEY, if enabled { "true" } else { "false" });
    }

    /// Last team the user selected, if it was persisted.
    #[must_use]
    pub fn last_team_id(&self) -> Option<String> {
        self.read(LAST_TEAM_KEY).filter(|t| !t.is_empty())
    }

    pub fn set_last_team_id(&self, team_id: &str) {
        self.write(LAST_TEAM_KEY, team_id);
    }

    /// Unconsumed OAuth redirect marker (ms since epoch), if present.
    #[must_use]
    pub fn redirect_marker(&self) -> Option<i64> {
        self.read(REDIRECT_MARKER_KEY)
            .and_then(|raw| raw.parse::<i64>().ok())
    }

    pub fn set_redirect_marker(&self, timestamp_ms: i64) {
        self.write(REDIRECT_MARKER_KEY, &timestamp_ms.to_string());
    }

    /// Read and delete the redirect marker in one step; at most one
    /// caller can observe a given marker.
    #[must_use]
    pub fn take_redirect_marker(&self) -> Option<i64> {
        let marker = self.redirect_marker();
        if marker.is_some() {
            self.erase(REDIRECT_MARKER_KEY);
        }
        marker
    }
}
