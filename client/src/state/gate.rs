//! Fetch gating: when authenticated data may be requested.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

/// Inputs to the fetch gate, snapshotted from auth state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GateInputs {
    /// The identity check has resolved (confirmed or anonymous).
    pub identity_check_complete: bool,
    /// The identity check resolved to a confirmed user.
    pub identity_confirmed: bool,
    /// No settle delay is pending (or none was required).
    pub settle_elapsed: bool,
}

/// Authenticated fetches run only when every condition holds. Guest
/// mode never opens the gate; guests work from local state.
#[must_use]
pub fn compute_fetch_gate(inputs: GateInputs) -> bool {
    inputs.identity_check_complete && inputs.identity_confirmed && inputs.settle_elapsed
}

/// Lifecycle of one gated fetcher.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FetchPhase {
    /// Gate closed; no data and no request in flight.
    #[default]
    Disabled,
    /// Request in flight.
    Loading,
    /// Last request succeeded.
    Ready,
    /// Last request failed; no automatic retry.
    Failed(String),
}

impl FetchPhase {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}
