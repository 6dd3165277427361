//! Top bar with the image upload button, the signed-in user, and logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! The upload button opens a hidden file input restricted to images; the
//! picked file goes to `net::upload`, which keeps the gallery and toasts in
//! step with the request.

use leptos::prelude::*;

use crate::config::AppConfig;
use crate::gallery::GalleryBridge;
use crate::net::upload::IMAGE_ACCEPT;
use crate::state::auth::AuthState;
use crate::state::ui::UiState;

#[component]
pub fn Toolbar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let bridge = StoredValue::new(expect_context::<GalleryBridge>());
    let config = StoredValue::new(expect_context::<AppConfig>());

    let file_ref = NodeRef::<leptos::html::Input>::new();
    #[cfg(not(feature = "csr"))]
    let _ = bridge;

    let on_upload_click = move |_| {
        #[cfg(feature = "csr")]
        {
            if let Some(input) = file_ref.get() {
                input.click();
            }
        }
    };

    let on_file_change = move |_ev: leptos::ev::Event| {
        #[cfg(feature = "csr")]
        {
            let Some(input) = file_ref.get() else {
                return;
            };
            let file = input.files().and_then(|files| files.get(0));
            input.set_value("");
            if let Some(file) = file {
                crate::net::upload::upload_file(file, ui, auth, bridge.get_value(), config.get_value());
            }
        }
    };

    let on_logout = move |_| {
        #[cfg(feature = "csr")]
        crate::util::auth::logout(&config.get_value());
    };

    let user_label = move || {
        auth.with(|a| a.user.as_ref().map(|user| user.display_name().to_owned()))
    };
    let can_logout = move || config.with_value(|c| c.auth.is_some());

    view! {
        <div class="toolbar">
            <span class="toolbar__title">"Rose"</span>
            <span class="toolbar__spacer"></span>

            <input
                class="toolbar__file-input"
                type="file"
                accept=IMAGE_ACCEPT
                style="display: none"
                node_ref=file_ref
                on:change=on_file_change
            />
            <button
                class="btn btn--primary toolbar__upload"
                on:click=on_upload_click
                disabled=move || ui.get().uploading
                title="Upload Image"
            >
                {move || if ui.get().uploading { "Uploading..." } else { "Upload Image" }}
            </button>

            {move || user_label().map(|name| view! { <span class="toolbar__self">{name}</span> })}

            <Show when=can_logout>
                <button class="btn toolbar__logout" on:click=on_logout title="Logout">
                    "Logout"
                </button>
            </Show>
        </div>
    }
}
