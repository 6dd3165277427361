//! Facade any component can use to read or mutate the gallery.
//!
//! SYSTEM CONTEXT
//! ==============
//! The chat agent, the upload flow, and the gallery view live in unrelated UI
//! trees. They all hold a clone of one [`GalleryBridge`] (provided through
//! Leptos context) and never touch the owner's [`GalleryStore`] directly.
//! Exactly one owner is registered at a time.
//!
//! ERROR HANDLING
//! ==============
//! Every operation is best effort. A missing owner, an empty url, or input
//! without a resolvable original url turns the call into a no-op; callers
//! such as late chat responses can never take the page down over gallery
//! bookkeeping. Debug builds log a warning when no owner is registered.

#[cfg(test)]
#[path = "bridge_test.rs"]
mod bridge_test;

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::record::{ImageInput, ImageRecord};
use super::store::{GalleryMutation, GalleryStore};

/// Optional fields for [`GalleryBridge::add_image_by_url`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AddImageOptions {
    pub thumbnail: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub source_id: Option<String>,
    pub is_local: bool,
}

impl AddImageOptions {
    #[must_use]
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

#[derive(Debug, Default)]
struct BridgeState {
    owner: Option<GalleryStore>,
    active_url: String,
}

/// Shared handle to the gallery owner registration and the active image url.
#[derive(Clone, Debug, Default)]
pub struct GalleryBridge {
    state: Arc<Mutex<BridgeState>>,
}

impl GalleryBridge {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BridgeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Install (`Some`) or release (`None`) the gallery owner.
    ///
    /// Installing replaces any previous owner and clears the active url when
    /// the new owner's collection is empty. Releasing forgets the collection
    /// and clears the active url so nothing stale leaks to the next owner.
    pub fn register(&self, owner: Option<GalleryStore>) {
        let mut state = self.lock();
        if let Some(store) = owner {
            if store.is_empty() {
                state.active_url.clear();
            }
            state.owner = Some(store);
        } else {
            state.owner = None;
            state.active_url.clear();
        }
    }

    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.lock().owner.is_some()
    }

    /// Whether `store` is the currently registered owner.
    #[must_use]
    pub fn is_owned_by(&self, store: &GalleryStore) -> bool {
        self.lock().owner.as_ref().is_some_and(|owner| owner.ptr_eq(store))
    }

    fn owner(&self) -> Option<GalleryStore> {
        let owner = self.lock().owner.clone();
        if owner.is_none() {
            warn_missing_owner();
        }
        owner
    }

    /// Normalize `input` and upsert it at the front of the collection.
    pub fn add_item(&self, input: ImageInput, fallback_description: Option<&str>) {
        let Some(owner) = self.owner() else {
            return;
        };
        let Ok(record) = input.normalize(fallback_description) else {
            return;
        };
        owner.apply(GalleryMutation::Upsert(record));
    }

    /// Add an image from a bare url. Empty `url` is a no-op.
    pub fn add_image_by_url(&self, url: &str, options: AddImageOptions) {
        if url.is_empty() {
            return;
        }
        let AddImageOptions { thumbnail, description, metadata, source_id, is_local } = options;
        self.add_item(
            ImageInput {
                original: Some(url.to_owned()),
                thumbnail: thumbnail.or_else(|| Some(url.to_owned())),
                description,
                source_id: source_id.or_else(|| Some(url.to_owned())),
                is_local: Some(is_local),
                metadata,
                ..ImageInput::default()
            },
            None,
        );
    }

    /// Add each input in order; a rejected input does not stop the rest.
    pub fn add_items<I>(&self, inputs: I)
    where
        I: IntoIterator<Item = ImageInput>,
    {
        for input in inputs {
            self.add_item(input, None);
        }
    }

    /// Remove every record whose original, thumbnail, or source id equals `url`.
    pub fn remove_image_by_url(&self, url: &str) {
        if url.is_empty() {
            return;
        }
        if let Some(owner) = self.owner() {
            owner.apply(GalleryMutation::Remove(url.to_owned()));
        }
    }

    pub fn clear(&self) {
        if let Some(owner) = self.owner() {
            owner.apply(GalleryMutation::Clear);
        }
    }

    /// Last collection snapshot known from the owner; empty without one.
    #[must_use]
    pub fn items(&self) -> Vec<ImageRecord> {
        self.lock().owner.as_ref().map(GalleryStore::items).unwrap_or_default()
    }

    /// Distinct original urls currently in the gallery.
    #[must_use]
    pub fn all_image_urls(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.items()
            .into_iter()
            .map(|record| record.original)
            .filter(|url| !url.is_empty() && seen.insert(url.clone()))
            .collect()
    }

    /// Set the active image url.
    ///
    /// Accepts urls not (yet) present in the collection, e.g. while an upload
    /// is still in flight.
    pub fn set_active_image_url(&self, url: &str) {
        url.clone_into(&mut self.lock().active_url);
    }

    #[must_use]
    pub fn active_image_url(&self) -> String {
        self.lock().active_url.clone()
    }
}

fn warn_missing_owner() {
    #[cfg(debug_assertions)]
    leptos::logging::warn!(
        "Gallery owner is not registered. Install a GalleryOwner in the page that renders the gallery."
    );
}
