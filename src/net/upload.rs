//! Upload flow: local preview first, remote image once the backend confirms.
//!
//! SYSTEM CONTEXT
//! ==============
//! Triggered by the toolbar's hidden file input. The picked file is shown
//! right away through a `blob:` object url marked `is_local`; the gallery
//! then swaps it for the uploaded copy, or drops it when the upload fails.
//! All gallery writes go through the [`GalleryBridge`].

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use crate::gallery::{AddImageOptions, GalleryBridge};

pub const UPLOAD_SUCCESS: &str = "Image uploaded";
pub const UPLOAD_FAILED: &str = "Upload failed";
/// `accept` filter for the file input.
pub const IMAGE_ACCEPT: &str = "image/*";

/// Insert the local preview for `file_name` and make it the active image.
pub fn publish_preview(bridge: &GalleryBridge, preview_url: &str, file_name: &str) {
    bridge.add_image_by_url(
        preview_url,
        AddImageOptions {
            description: Some(file_name.to_owned()),
            is_local: true,
            ..AddImageOptions::default()
        },
    );
    bridge.set_active_image_url(preview_url);
}

/// Replace the preview with the uploaded image and make it active.
pub fn publish_remote(bridge: &GalleryBridge, preview_url: &str, remote_url: &str, file_name: &str) {
    bridge.add_image_by_url(
        remote_url,
        AddImageOptions::described(file_name).with_source_id(remote_url),
    );
    bridge.remove_image_by_url(preview_url);
    bridge.set_active_image_url(remote_url);
}

/// Drop the preview after a failed upload.
pub fn discard_preview(bridge: &GalleryBridge, preview_url: &str) {
    bridge.remove_image_by_url(preview_url);
}

#[cfg(feature = "csr")]
pub use browser::upload_file;

#[cfg(feature = "csr")]
mod browser {
    use leptos::prelude::*;

    use super::{UPLOAD_FAILED, UPLOAD_SUCCESS, discard_preview, publish_preview, publish_remote};
    use crate::config::AppConfig;
    use crate::gallery::GalleryBridge;
    use crate::net::api;
    use crate::state::auth::AuthState;
    use crate::state::ui::{ToastSeverity, UiState};
    use crate::util::auth;

    /// Upload `file`, keeping the gallery and toasts in step.
    pub fn upload_file(
        file: web_sys::File,
        ui: RwSignal<UiState>,
        auth_state: RwSignal<AuthState>,
        bridge: GalleryBridge,
        config: AppConfig,
    ) {
        if !auth_state.get_untracked().is_authenticated() {
            auth::login(&config, None);
            return;
        }

        let file_name = file.name();
        let preview_url = match web_sys::Url::create_object_url_with_blob(&file) {
            Ok(url) => url,
            Err(e) => {
                leptos::logging::error!("unable to create preview url: {e:?}");
                String::new()
            }
        };
        if !preview_url.is_empty() {
            publish_preview(&bridge, &preview_url, &file_name);
        }
        ui.update(|u| u.uploading = true);

        leptos::task::spawn_local(async move {
            let result = match auth::access_token(&config).await {
                Ok(token) => api::upload_image(&config, token.as_deref().unwrap_or_default(), &file)
                    .await
                    .map_err(|e| e.user_message()),
                Err(e) => Err(e.to_string()),
            };

            match result {
                Ok(uploaded) => {
                    publish_remote(&bridge, &preview_url, &uploaded.url, &file_name);
                    ui.update(|u| {
                        u.show_toast(ToastSeverity::Success, UPLOAD_SUCCESS, file_name.clone());
                    });
                }
                Err(message) => {
                    leptos::logging::error!("image upload failed: {message}");
                    discard_preview(&bridge, &preview_url);
                    ui.update(|u| {
                        u.show_toast(ToastSeverity::Error, UPLOAD_FAILED, message.clone());
                    });
                }
            }

            if !preview_url.is_empty() {
                let _ = web_sys::Url::revoke_object_url(&preview_url);
            }
            ui.update(|u| u.uploading = false);
        });
    }
}
