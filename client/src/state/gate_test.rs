use super::*;

fn inputs(complete: bool, confirmed: bool, settled: bool) -> GateInputs {
    GateInputs {
        identity_check_complete: complete,
        identity_confirmed: confirmed,
        settle_elapsed: settled,
    }
}

#[test]
fn gate_opens_only_when_all_conditions_hold() {
    assert!(compute_fetch_gate(inputs(true, true, true)));
}

#[test]
fn gate_stays_closed_when_any_condition_fails() {
    assert!(!compute_fetch_gate(inputs(false, true, true)));
    assert!(!compute_fetch_gate(inputs(true, false, true)));
    assert!(!compute_fetch_gate(inputs(true, true, false)));
    assert!(!compute_fetch_gate(inputs(false, false, false)));
}

#[test]
fn anonymous_completion_keeps_gate_closed() {
    // Check finished but resolved to anonymous: no fetches.
    assert!(!compute_fetch_gate(inputs(true, false, true)));
}

#[test]
fn default_phase_is_disabled() {
    assert_eq!(FetchPhase::default(), FetchPhase::Disabled);
    assert!(!FetchPhase::default().is_loading());
}
