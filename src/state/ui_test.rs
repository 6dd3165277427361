use super::*;

// =============================================================
// UiState defaults
// =============================================================

#[test]
fn ui_state_default_has_no_toast() {
    let state = UiState::default();
    assert!(state.toast.is_none());
    assert_eq!(state.toast_seq, 0);
    assert!(!state.uploading);
}

#[test]
fn toast_severity_default_is_info() {
    assert_eq!(ToastSeverity::default(), ToastSeverity::Info);
}

// =============================================================
// toasts
// =============================================================

#[test]
fn show_toast_replaces_previous_and_bumps_seq() {
    let mut state = UiState::default();
    let first = state.show_toast(ToastSeverity::Info, "Uploading", "photo.png");
    let second = state.show_toast(ToastSeverity::Success, "Uploaded", "photo.png");
    assert_eq!(first, 1);
    assert_eq!(second, 2);
    let toast = state.toast.expect("toast");
    assert_eq!(toast.severity, ToastSeverity::Success);
    assert_eq!(toast.summary, "Uploaded");
}

#[test]
fn dismiss_only_clears_matching_toast() {
    let mut state = UiState::default();
    let stale = state.show_toast(ToastSeverity::Info, "a", "");
    let current = state.show_toast(ToastSeverity::Error, "b", "");

    state.dismiss_toast(stale);
    assert!(state.toast.is_some());

    state.dismiss_toast(current);
    assert!(state.toast.is_none());
}
