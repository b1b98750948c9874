use super::*;

#[test]
fn confirmation_runs_for_callback_param_alone() {
    assert!(should_confirm_redirect(true, false, false));
}

#[test]
fn confirmation_runs_for_marker_alone() {
    // Callback param already stripped by an earlier page view, marker
    // still unconsumed.
    assert!(should_confirm_redirect(false, true, false));
}

#[test]
fn confirmation_skipped_without_any_indicator() {
    assert!(!should_confirm_redirect(false, false, false));
}

#[test]
fn confirmation_runs_at_most_once_per_view() {
    assert!(!should_confirm_redirect(true, true, true));
    assert!(!should_confirm_redirect(true, false, true));
    assert!(!should_confirm_redirect(false, true, true));
}

#[test]
fn callback_param_detected_with_and_without_question_mark() {
    assert!(has_callback_param("?just_logged_in=true"));
    assert!(has_callback_param("just_logged_in=true"));
    assert!(has_callback_param("?tab=roster&just_logged_in=true"));
    assert!(!has_callback_param("?tab=roster"));
    assert!(!has_callback_param(""));
}

#[test]
fn stripping_callback_keeps_other_params() {
    assert_eq!(
        search_without_callback("?tab=roster&just_logged_in=true"),
        Some("tab=roster".to_owned())
    );
    assert_eq!(search_without_callback("?just_logged_in=true"), Some(String::new()));
    assert_eq!(search_without_callback("?tab=roster"), None);
    assert_eq!(search_without_callback(""), None);
}
