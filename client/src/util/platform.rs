//! Browser detection for storage timing quirks.
//!
//! Safari's Intelligent Tracking Prevention can delay `localStorage`
//! visibility right after a cross-site OAuth redirect. Affected
//! browsers get a short settle delay before the roster fetch gate
//! opens; everyone else proceeds immediately.

#[cfg(test)]
#[path = "platform_test.rs"]
mod platform_test;

/// Whether this user agent is known to delay storage writes after a
/// cross-site redirect. Matches Safari proper and all iOS browsers
/// (every iOS browser wraps WebKit).
#[must_use]
pub fn is_storage_delayed_browser(user_agent: &str) -> bool {
    let ios = user_agent.contains("iPhone")
        || user_agent.contains("iPad")
        || user_agent.contains("iPod");
    if ios {
        return true;
    }
    // Chrome, Edge, and Opera all advertise "Safari" in their UA;
    // require Safari without any of their markers.
    user_agent.contains("Safari")
        && !user_agent.contains("Chrome")
        && !user_agent.contains("Chromium")
        && !user_agent.contains("CriOS")
        && !user_agent.contains("Edg")
        && !user_agent.contains("OPR")
        && !user_agent.contains("Android")
}

/// Whether the running browser needs the post-redirect settle delay.
/// Always `false` outside the browser.
#[must_use]
pub fn requires_settle_delay() -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.navigator().user_agent().ok())
            .is_some_and(|ua| is_storage_delayed_browser(&ua))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}
