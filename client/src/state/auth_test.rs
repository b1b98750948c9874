use super::*;

fn user(id: &str) -> User {
    User {
        id: id.to_owned(),
        name: "Coach".to_owned(),
        email: None,
        avatar_url: None,
    }
}

#[test]
fn default_state_is_loading_and_anonymous() {
    let state = AuthState::default();
    assert!(state.is_loading());
    assert!(!state.is_authenticated());
    assert!(!state.is_guest_mode());
    assert!(!state.check_complete());
}

#[test]
fn check_resolving_confirmed_sets_user() {
    let mut state = AuthState::default();
    let token = state.begin_check();
    let resolution = state.finish_check(token, Some(user("u-1")));
    assert_eq!(resolution, CheckResolution::Confirmed { cleared_guest_flag: false });
    assert!(state.is_authenticated());
    assert!(state.check_complete());
    assert_eq!(state.user().unwrap().id, "u-1");
}

#[test]
fn check_resolving_anonymous_clears_user() {
    let mut state = AuthState::default();
    let token = state.begin_check();
    assert_eq!(state.finish_check(token, None), CheckResolution::Anonymous);
    assert!(!state.is_authenticated());
    assert!(state.check_complete());
}

#[test]
fn stale_resolution_is_discarded() {
    let mut state = AuthState::default();
    let stale = state.begin_check();
    let fresh = state.begin_check();
    // The superseded check resolves first with a user; it must not land.
    assert_eq!(state.finish_check(stale, Some(user("u-old"))), CheckResolution::Stale);
    assert!(state.is_loading());
    assert!(!state.is_authenticated());
    // The current check's anonymous answer wins.
    assert_eq!(state.finish_check(fresh, None), CheckResolution::Anonymous);
    assert!(!state.is_authenticated());
}

#[test]
fn confirmed_identity_overrides_guest_flag() {
    let mut state = AuthState::with_guest_flag(true);
    assert!(state.is_guest_mode());
    let token = state.begin_check();
    let resolution = state.finish_check(token, Some(user("u-1")));
    assert_eq!(resolution, CheckResolution::Confirmed { cleared_guest_flag: true });
    assert!(!state.is_guest_mode());
    assert!(state.is_authenticated());
}

#[test]
fn guest_flag_survives_anonymous_resolution() {
    let mut state = AuthState::with_guest_flag(true);
    let token = state.begin_check();
    state.finish_check(token, None);
    assert!(state.is_guest_mode());
}

#[test]
fn guest_mode_toggle() {
    let mut state = AuthState::default();
    state.set_guest_mode(true);
    assert!(state.is_guest_mode());
    state.set_guest_mode(false);
    assert!(!state.is_guest_mode());
}

#[test]
fn gate_inputs_reflect_confirmed_identity() {
    let mut state = AuthState::default();
    assert!(!crate::state::gate::compute_fetch_gate(state.gate_inputs()));
    let token = state.begin_check();
    state.finish_check(token, Some(user("u-1")));
    assert!(crate::state::gate::compute_fetch_gate(state.gate_inputs()));
}

#[test]
fn gate_stays_closed_for_guest() {
    let mut state = AuthState::with_guest_flag(true);
    let token = state.begin_check();
    state.finish_check(token, None);
    assert!(state.is_guest_mode());
    assert!(!crate::state::gate::compute_fetch_gate(state.gate_inputs()));
}

#[test]
fn settle_waiting_holds_gate_closed() {
    let mut state = AuthState::default();
    let token = state.begin_check();
    state.finish_check(token, Some(user("u-1")));
    state.set_settle(SettleState::Waiting);
    assert!(!crate::state::gate::compute_fetch_gate(state.gate_inputs()));
    state.set_settle(SettleState::Elapsed);
    assert!(crate::state::gate::compute_fetch_gate(state.gate_inputs()));
}

#[test]
fn settle_not_required_counts_as_elapsed() {
    assert!(SettleState::NotRequired.elapsed());
    assert!(SettleState::Elapsed.elapsed());
    assert!(!SettleState::Waiting.elapsed());
}

#[test]
fn sign_out_clears_identity_and_guest_flag() {
    let mut state = AuthState::with_guest_flag(true);
    let token = state.begin_check();
    state.finish_check(token, Some(user("u-1")));
    state.sign_out();
    assert!(!state.is_authenticated());
    assert!(!state.is_guest_mode());
    assert!(state.check_complete());
}

#[test]
fn sign_out_invalidates_in_flight_check() {
    let mut state = AuthState::default();
    let token = state.begin_check();
    state.sign_out();
    assert_eq!(state.finish_check(token, Some(user("u-1"))), CheckResolution::Stale);
    assert!(!state.is_authenticated());
}

#[test]
fn redirect_handled_round_trip() {
    let mut state = AuthState::default();
    assert!(!state.redirect_handled());
    state.mark_redirect_handled();
    assert!(state.redirect_handled());
    state.reset_redirect_handled();
    assert!(!state.redirect_handled());
}
