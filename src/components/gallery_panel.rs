//! Image gallery view: the active image, caption, and a thumbnail strip.
//!
//! SYSTEM CONTEXT
//! ==============
//! Purely presentational. The workspace page owns the gallery and passes the
//! latest `GalleryView` plus a selection callback; navigation here never
//! writes to the collection.

#[cfg(test)]
#[path = "gallery_panel_test.rs"]
mod gallery_panel_test;

use leptos::prelude::*;

use crate::gallery::GalleryView;

/// Index after `current`, wrapping to the first image.
#[must_use]
pub fn next_index(current: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (current + 1) % len }
}

/// Index before `current`, wrapping to the last image.
#[must_use]
pub fn prev_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + len - 1) % len
    }
}

/// Whether there is anything to show besides the empty placeholder.
#[must_use]
pub fn has_images(view: &GalleryView) -> bool {
    !view.items.is_empty()
}

#[component]
pub fn GalleryPanel(gallery: RwSignal<GalleryView>, on_select: Callback<usize>) -> impl IntoView {
    let len = move || gallery.with(|v| v.items.len());
    let index = move || gallery.with(|v| v.selection.index);

    let on_prev = move |_| on_select.run(prev_index(index(), len()));
    let on_next = move |_| on_select.run(next_index(index(), len()));

    view! {
        <div class="image-gallery-panel">
            <Show
                when=move || gallery.with(has_images)
                fallback=|| view! { <div class="image-gallery-panel__empty">"No images yet"</div> }
            >
                <div class="image-gallery-panel__stage">
                    <button class="btn image-gallery-panel__nav" on:click=on_prev title="Previous image">
                        "‹"
                    </button>
                    {move || {
                        gallery.with(|v| v.current().cloned())
                            .map(|record| {
                                view! {
                                    <figure class="image-gallery-panel__current">
                                        <img src=record.original.clone() alt=record.description.clone() />
                                        <figcaption>{record.description}</figcaption>
                                    </figure>
                                }
                            })
                    }}
                    <button class="btn image-gallery-panel__nav" on:click=on_next title="Next image">
                        "›"
                    </button>
                </div>
                <div class="image-gallery-panel__thumbnails">
                    {move || {
                        let active = index();
                        gallery.get()
                            .items
                            .into_iter()
                            .enumerate()
                            .map(|(i, record)| {
                                view! {
                                    <button
                                        class="image-gallery-panel__thumbnail"
                                        class:image-gallery-panel__thumbnail--active={i == active}
                                        class:image-gallery-panel__thumbnail--local=record.is_local
                                        on:click=move |_| on_select.run(i)
                                    >
                                        <img src=record.thumbnail alt=record.description />
                                    </button>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </div>
            </Show>
        </div>
    }
}
