//! Local UI chrome state (toasts, upload progress).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of domain state (`auth`, `chat`,
//! the gallery) so notifications can evolve independently of data flow.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// How long a toast stays visible.
pub const TOAST_LIFETIME_MS: u64 = 4_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastSeverity {
    #[default]
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Sequence number; a dismiss timer only clears the toast it was armed for.
    pub seq: u64,
    pub severity: ToastSeverity,
    pub summary: String,
    pub detail: String,
}

/// UI state for notifications and the upload button.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub toast: Option<Toast>,
    pub toast_seq: u64,
    /// An upload request is in flight.
    pub uploading: bool,
}

impl UiState {
    /// Show a toast, replacing any visible one. Returns its sequence number.
    pub fn show_toast(&mut self, severity: ToastSeverity, summary: impl Into<String>, detail: impl Into<String>) -> u64 {
        self.toast_seq += 1;
        self.toast = Some(Toast {
            seq: self.toast_seq,
            severity,
            summary: summary.into(),
            detail: detail.into(),
        });
        self.toast_seq
    }

    /// Dismiss the toast with sequence `seq` if it is still the visible one.
    pub fn dismiss_toast(&mut self, seq: u64) {
        if self.toast.as_ref().is_some_and(|toast| toast.seq == seq) {
            self.toast = None;
        }
    }
}
