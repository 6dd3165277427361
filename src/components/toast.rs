//! Transient notification shown over the workspace.

use leptos::prelude::*;

use crate::state::ui::{ToastSeverity, UiState};

#[component]
pub fn ToastHost() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    let visible_seq = Memo::new(move |_| ui.with(|u| u.toast.as_ref().map(|t| t.seq)));

    Effect::new(move || {
        let Some(seq) = visible_seq.get() else {
            return;
        };

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            gloo_timers::future::sleep(std::time::Duration::from_millis(crate::state::ui::TOAST_LIFETIME_MS)).await;
            ui.update(|u| u.dismiss_toast(seq));
        });

        #[cfg(not(feature = "csr"))]
        let _ = seq;
    });

    move || {
        ui.get().toast.map(|toast| {
            let class = match toast.severity {
                ToastSeverity::Info => "toast toast--info",
                ToastSeverity::Success => "toast toast--success",
                ToastSeverity::Error => "toast toast--error",
            };
            let seq = toast.seq;
            view! {
                <div class=class role="status" on:click=move |_| ui.update(|u| u.dismiss_toast(seq))>
                    <strong class="toast__summary">{toast.summary}</strong>
                    <span class="toast__detail">{toast.detail}</span>
                </div>
            }
        })
    }
}
