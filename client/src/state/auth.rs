//! Auth reconciliation state.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`AuthState`] lives in a signal in the app context. Effects in
//! `util::auth` drive it: the mount-time identity check, the OAuth
//! redirect confirmation, and guest-mode toggles. Fetchers read
//! [`AuthState::gate_inputs`] to decide whether they may run.
//!
//! DESIGN
//! ======
//! Identity checks are versioned by a generation counter: starting a
//! check bumps the generation and returns a token, and a resolution
//! carrying a stale token is discarded. That makes the post-redirect
//! re-check idempotent — however many checks start, only the newest
//! one's answer lands.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;
use crate::state::gate::GateInputs;

/// Post-redirect storage settle status.
///
/// Browsers that delay storage visibility after a cross-site redirect
/// (see `util::platform`) hold the fetch gate closed until a short
/// timer elapses; everyone else starts at `NotRequired`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SettleState {
    /// No delay needed on this browser.
    #[default]
    NotRequired,
    /// Delay timer armed; gate held closed.
    Waiting,
    /// Delay timer fired; gate may open.
    Elapsed,
}

impl SettleState {
    /// Whether the settle condition is satisfied for gating purposes.
    #[must_use]
    pub fn elapsed(self) -> bool {
        !matches!(self, Self::Waiting)
    }
}

/// Outcome of resolving an identity check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckResolution {
    /// A newer check superseded this one; nothing changed.
    Stale,
    /// Resolved anonymous.
    Anonymous,
    /// Resolved to a confirmed user.
    Confirmed {
        /// The guest flag was set and has been cleared in state; the
        /// caller must also clear the persisted flag.
        cleared_guest_flag: bool,
    },
}

/// Client-side view of who is signed in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    user: Option<User>,
    loading: bool,
    guest_flag: bool,
    redirect_handled: bool,
    settle: SettleState,
    check_generation: u64,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            // Loading until the first identity check resolves, so the
            // login redirect never fires on a stale anonymous view.
            loading: true,
            guest_flag: false,
            redirect_handled: false,
            settle: SettleState::NotRequired,
            check_generation: 0,
        }
    }
}

impl AuthState {
    /// Initial state seeded with the persisted guest flag.
    #[must_use]
    pub fn with_guest_flag(guest: bool) -> Self {
        Self { guest_flag: guest, ..Self::default() }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Guest mode holds only while no confirmed identity exists; a
    /// confirmed user always overrides the flag.
    #[must_use]
    pub fn is_guest_mode(&self) -> bool {
        self.guest_flag && self.user.is_none()
    }

    /// Whether the first identity check has resolved.
    #[must_use]
    pub fn check_complete(&self) -> bool {
        !self.loading
    }

    #[must_use]
    pub fn redirect_handled(&self) -> bool {
        self.redirect_handled
    }

    #[must_use]
    pub fn settle(&self) -> SettleState {
        self.settle
    }

    /// Snapshot the conditions the fetch gate evaluates.
    #[must_use]
    pub fn gate_inputs(&self) -> GateInputs {
        GateInputs {
            identity_check_complete: self.check_complete(),
            identity_confirmed: self.is_authenticated(),
            settle_elapsed: self.settle.elapsed(),
        }
    }

    /// Start an identity check; the returned token must accompany the
    /// resolution. Supersedes any check still in flight.
    pub fn begin_check(&mut self) -> u64 {
        self.check_generation += 1;
        self.loading = true;
        self.check_generation
    }

    /// Resolve the check identified by `token`. Stale tokens change
    /// nothing.
    pub fn finish_check(&mut self, token: u64, user: Option<User>) -> CheckResolution {
        if token != self.check_generation {
            return CheckResolution::Stale;
        }
        self.loading = false;
        match user {
            Some(user) => {
                self.user = Some(user);
                let cleared = self.guest_flag;
                self.guest_flag = false;
                CheckResolution::Confirmed { cleared_guest_flag: cleared }
            }
            None => {
                self.user = None;
                CheckResolution::Anonymous
            }
        }
    }

    pub fn set_guest_mode(&mut self, enabled: bool) {
        self.guest_flag = enabled;
    }

    /// Record that redirect confirmation ran for this page view.
    pub fn mark_redirect_handled(&mut self) {
        self.redirect_handled = true;
    }

    /// Allow confirmation again (component teardown).
    pub fn reset_redirect_handled(&mut self) {
        self.redirect_handled = false;
    }

    pub fn set_settle(&mut self, settle: SettleState) {
        self.settle = settle;
    }

    /// Drop the confirmed identity and guest flag. Also invalidates any
    /// in-flight check so its resolution cannot resurrect the session.
    pub fn sign_out(&mut self) {
        self.check_generation += 1;
        self.user = None;
        self.guest_flag = false;
        self.loading = false;
    }
}
