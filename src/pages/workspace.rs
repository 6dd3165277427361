//! Workspace page: chat on the left, 3D preview and image gallery on the right.
//!
//! SYSTEM CONTEXT
//! ==============
//! This page is the single gallery owner. It installs a `GalleryOwner` on
//! mount, mirrors every published `GalleryView` into a signal for the gallery
//! panel, and releases the registration on cleanup so the bridge never points
//! at a dead page.

use std::sync::Arc;

use leptos::prelude::*;

use crate::components::chat_panel::ChatPanel;
use crate::components::gallery_panel::GalleryPanel;
use crate::components::scene_preview::ScenePreview;
use crate::components::toast::ToastHost;
use crate::components::toolbar::Toolbar;
use crate::gallery::{GalleryBridge, GalleryOwner, GalleryView};

#[component]
pub fn WorkspacePage() -> impl IntoView {
    let bridge = expect_context::<GalleryBridge>();
    let gallery = RwSignal::new(GalleryView::default());

    let owner = GalleryOwner::install(
        bridge,
        Arc::new(move |view: &GalleryView| {
            let _ = gallery.try_set(view.clone());
        }),
    );
    gallery.set(owner.view());
    let owner = StoredValue::new(owner);

    on_cleanup(move || {
        owner.try_with_value(GalleryOwner::release);
    });

    let on_select = Callback::new(move |index: usize| {
        owner.with_value(|o| o.select_index(index));
    });

    view! {
        <div class="app-shell">
            <Toolbar />
            <div class="app-container">
                <div class="chat-container">
                    <ChatPanel />
                </div>
                <div class="visual-container">
                    <div class="visual-item">
                        <h2>"3D Preview"</h2>
                        <ScenePreview />
                    </div>
                    <div class="visual-item">
                        <h2>"Image Gallery"</h2>
                        <GalleryPanel gallery=gallery on_select=on_select />
                    </div>
                </div>
            </div>
            <ToastHost />
        </div>
    }
}
