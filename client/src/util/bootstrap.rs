//! Pre-mount URL normalization.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs once before the router mounts, against the raw browser URL.
//! Three concerns, in order:
//!
//! 1. Undo the static-host 404 rewrite. Hosts that serve a single-page
//!    app from a 404 handler redirect deep links to
//!    `/?/path&restquery`, with literal `&` in the original query
//!    encoded as `~and~`. Decoding must happen before anything reads
//!    the query, or a rewritten `auth_token` value would still carry
//!    the sentinel.
//! 2. Extract a bearer token from the decoded query (or, failing that,
//!    the hash fragment), validate its shape, and persist it.
//! 3. Write the one-shot redirect marker when this page view looks
//!    like an OAuth callback landing.
//!
//! Everything except the final `history.replaceState` is pure string
//! and store manipulation, exercised by plain tests via [`normalize`].
//!
//! ERROR HANDLING
//! ==============
//! A malformed token is logged and discarded rather than persisted; a
//! failed store write degrades silently inside the credential store.
//! Normalization never blocks mounting.

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod bootstrap_test;

use crate::util::credential_store::CredentialStore;

/// Query parameter carrying the bearer token after an OAuth callback.
pub const TOKEN_PARAM: &str = "auth_token";
/// Query parameter marking an OAuth callback landing.
pub const CALLBACK_PARAM: &str = "just_logged_in";
/// Stand-in for `&` inside the 404-rewrite payload.
const REDIRECT_SENTINEL: &str = "~and~";
/// Base64url of `{"` — every JSON-header JWT starts with this.
const JWT_PREFIX: &str = "eyJ";

/// What [`normalize`] decided, for the caller to act on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizeOutcome {
    /// New URL (path + query + hash) to install via `replaceState`,
    /// when it differs from the original.
    pub replace_url: Option<String>,
    /// A well-formed token was extracted and persisted.
    pub token_persisted: bool,
    /// The redirect marker was written for this page view.
    pub marker_written: bool,
}

fn hex_nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            // Decoded byte-wise: a multibyte character right after the
            // `%` must not be sliced mid-sequence.
            b'%' if i + 2 < bytes.len() => {
                if let (Some(hi), Some(lo)) = (hex_nibble(bytes[i + 1]), hex_nibble(bytes[i + 2])) {
                    out.push((hi << 4) | lo);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Split a query string (no leading `?`) into decoded key/value pairs.
/// Pairs without `=` keep an empty value.
pub(crate) fn parse_pairs(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once('=') {
            Some((key, value)) => (percent_decode(key), percent_decode(value)),
            None => (percent_decode(part), String::new()),
        })
        .collect()
}

fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

pub(crate) fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            if value.is_empty() {
                percent_encode(key)
            } else {
                format!("{}={}", percent_encode(key), percent_encode(value))
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}

pub(crate) fn remove_pair(pairs: &mut Vec<(String, String)>, key: &str) -> Option<String> {
    let index = pairs.iter().position(|(k, _)| k == key)?;
    Some(pairs.remove(index).1)
}

/// Shape check for a bearer token: three non-empty dot-separated
/// segments. Signature validity is the server's business; this only
/// keeps obviously mangled values (rewrite residue, truncation) out of
/// storage.
#[must_use]
pub fn is_well_formed_token(token: &str) -> bool {
    let mut segments = token.split('.');
    let well_formed = segments.by_ref().take(3).filter(|s| !s.is_empty()).count() == 3;
    well_formed && segments.next().is_none()
}

/// Token from the hash fragment (no leading `#`). OAuth providers
/// differ in how they deliver it, so three strategies in order: a
/// known parameter name, any `token=`-suffixed parameter, or the whole
/// fragment when it reads as a bare JWT.
fn token_from_fragment(fragment: &str) -> Option<String> {
    let pairs = parse_pairs(fragment);
    for key in [TOKEN_PARAM, "access_token", "id_token", "token"] {
        if let Some((_, value)) = pairs.iter().find(|(k, _)| k == key)
            && !value.is_empty()
        {
            return Some(value.clone());
        }
    }
    if let Some(start) = fragment.find("token=") {
        let rest = &fragment[start + "token=".len()..];
        let value = rest.split('&').next().unwrap_or(rest);
        if !value.is_empty() {
            return Some(percent_decode(value));
        }
    }
    if fragment.starts_with(JWT_PREFIX) {
        return Some(fragment.to_owned());
    }
    None
}

/// Undo the static-host 404 rewrite: `/?/players&a=1~and~b=2` becomes
/// path `/players`, query `a=1&b=2`. Returns `None` when the query is
/// not a rewrite payload.
fn decode_hosting_redirect(search: &str) -> Option<(String, String)> {
    let payload = search.strip_prefix('?')?.strip_prefix('/')?;
    let (path_part, query_part) = match payload.split_once('&') {
        Some((p, q)) => (p, q.replace(REDIRECT_SENTINEL, "&")),
        None => (payload, String::new()),
    };
    let mut path = String::from("/");
    path.push_str(path_part.trim_start_matches('/'));
    Some((path, query_part))
}

/// Whether `path` sits on the authenticated app surface, where an
/// OAuth callback can land. The login page is excluded; landing there
/// is never a callback.
#[must_use]
pub fn is_app_surface(path: &str) -> bool {
    let trimmed = path.trim_end_matches('/');
    (trimmed == "/app" || trimmed.starts_with("/app/")) && trimmed != "/app/login"
}

/// Normalize the raw browser URL. `path` is the pathname, `search` the
/// raw query including `?` (or empty), `hash` the fragment without `#`
/// (or empty). `now_ms` stamps the redirect marker.
#[must_use]
pub fn normalize(
    store: &CredentialStore,
    path: &str,
    search: &str,
    hash: &str,
    now_ms: i64,
) -> NormalizeOutcome {
    let mut outcome = NormalizeOutcome::default();

    // 404-rewrite reversal first; token extraction reads the decoded
    // query, never the raw one.
    let (effective_path, query, rewrote) = match decode_hosting_redirect(search) {
        Some((decoded_path, decoded_query)) => (decoded_path, decoded_query, true),
        None => (
            path.to_owned(),
            search.strip_prefix('?').unwrap_or(search).to_owned(),
            false,
        ),
    };

    let mut pairs = parse_pairs(&query);
    let mut query_changed = false;
    let mut hash_cleared = false;

    let query_token = remove_pair(&mut pairs, TOKEN_PARAM);
    if query_token.is_some() {
        query_changed = true;
    }

    let token = match query_token {
        Some(token) => Some(token),
        None => {
            let from_fragment = token_from_fragment(hash);
            if from_fragment.is_some() {
                hash_cleared = true;
            }
            from_fragment
        }
    };
    if let Some(token) = token {
        if is_well_formed_token(&token) {
            store.set_bearer_token(&token);
            outcome.token_persisted = true;
        } else {
            leptos::logging::warn!("discarding malformed bearer token from URL");
        }
    }

    let has_callback_param = pairs.iter().any(|(k, _)| k == CALLBACK_PARAM);
    if is_app_surface(&effective_path)
        && (has_callback_param || outcome.token_persisted)
        && store.redirect_marker().is_none()
    {
        store.set_redirect_marker(now_ms);
        outcome.marker_written = true;
    }

    if rewrote || query_changed || hash_cleared {
        let encoded = encode_pairs(&pairs);
        let mut url = effective_path;
        if !encoded.is_empty() {
            url.push('?');
            url.push_str(&encoded);
        }
        if !hash.is_empty() && !hash_cleared {
            url.push('#');
            url.push_str(hash);
        }
        outcome.replace_url = Some(url);
    }

    outcome
}

/// Browser entry point: read the live location, normalize, and install
/// the cleaned URL without adding a history entry.
pub fn run(store: &CredentialStore) {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let location = window.location();
        let (Ok(path), Ok(search), Ok(hash)) =
            (location.pathname(), location.search(), location.hash())
        else {
            return;
        };
        let fragment = hash.strip_prefix('#').unwrap_or(&hash);
        #[allow(clippy::cast_possible_truncation)]
        let now_ms = js_sys::Date::now() as i64;
        let outcome = normalize(store, &path, &search, fragment, now_ms);
        if let Some(url) = outcome.replace_url
            && let Ok(history) = window.history()
            && let Err(e) =
                history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url))
        {
            leptos::logging::warn!("failed to rewrite URL after bootstrap: {e:?}");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = store;
    }
}
