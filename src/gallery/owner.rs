//! Page-side gallery ownership: registration, reconciliation, and publishing.
//!
//! DESIGN
//! ======
//! The page that renders the gallery installs one [`GalleryOwner`]. It owns
//! the [`GalleryStore`], registers it with the shared [`GalleryBridge`], and
//! reacts to every store change in a single step: pick the displayed index
//! (front after an upsert), reconcile it against the new collection, publish
//! the resulting active url to the bridge, then hand a [`GalleryView`] to the
//! rendering layer. Mutation and publication never drift apart.
//!
//! Releasing the owner (explicitly or on drop) unregisters it, which resets
//! the bridge's collection and active url.

#[cfg(test)]
#[path = "owner_test.rs"]
mod owner_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::bridge::GalleryBridge;
use super::reconcile::{ActiveSelection, reconcile};
use super::record::ImageRecord;
use super::store::{GalleryStore, GallerySubscription, MutationKind};

/// What the gallery view renders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GalleryView {
    pub items: Vec<ImageRecord>,
    pub selection: ActiveSelection,
}

impl GalleryView {
    /// Record at the displayed index, if any.
    #[must_use]
    pub fn current(&self) -> Option<&ImageRecord> {
        self.items.get(self.selection.index)
    }
}

/// Callback receiving every new [`GalleryView`].
pub type ViewListener = Arc<dyn Fn(&GalleryView) + Send + Sync>;

struct OwnerShared {
    bridge: GalleryBridge,
    store: GalleryStore,
    selection: Mutex<ActiveSelection>,
    on_change: ViewListener,
}

impl OwnerShared {
    fn selection(&self) -> MutexGuard<'_, ActiveSelection> {
        self.selection.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, start_index: usize, items: Vec<ImageRecord>) {
        let active = self.bridge.active_image_url();
        let next = reconcile(start_index, &items, &active);
        if next.active_url != active {
            self.bridge.set_active_image_url(&next.active_url);
        }
        *self.selection() = next.clone();
        (self.on_change)(&GalleryView { items, selection: next });
    }
}

/// RAII registration of the page as the single gallery owner.
pub struct GalleryOwner {
    shared: Arc<OwnerShared>,
    subscription: Mutex<Option<GallerySubscription>>,
}

impl std::fmt::Debug for GalleryOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalleryOwner")
            .field("store", &self.shared.store)
            .field("selection", &*self.shared.selection())
            .finish_non_exhaustive()
    }
}

impl GalleryOwner {
    /// Create an empty store, register it with `bridge`, and start publishing.
    pub fn install(bridge: GalleryBridge, on_change: ViewListener) -> Self {
        Self::install_with_items(bridge, Vec::new(), on_change)
    }

    /// Like [`GalleryOwner::install`], seeding the store with `items`.
    pub fn install_with_items(bridge: GalleryBridge, items: Vec<ImageRecord>, on_change: ViewListener) -> Self {
        let store = GalleryStore::with_items(items);
        bridge.register(Some(store.clone()));

        let shared = Arc::new(OwnerShared {
            bridge,
            store,
            selection: Mutex::new(ActiveSelection::default()),
            on_change,
        });

        let weak = Arc::downgrade(&shared);
        let subscription = shared.store.subscribe(Arc::new(move |kind: MutationKind, items: &[ImageRecord]| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let start_index = match kind {
                MutationKind::Upsert => 0,
                MutationKind::Remove | MutationKind::Clear | MutationKind::Replace => shared.selection().index,
            };
            shared.publish(start_index, items.to_vec());
        }));

        if !shared.store.is_empty() {
            shared.publish(0, shared.store.items());
        }

        Self {
            shared,
            subscription: Mutex::new(Some(subscription)),
        }
    }

    /// The store this owner registered.
    #[must_use]
    pub fn store(&self) -> &GalleryStore {
        &self.shared.store
    }

    /// Current collection and selection.
    #[must_use]
    pub fn view(&self) -> GalleryView {
        GalleryView {
            items: self.shared.store.items(),
            selection: self.shared.selection().clone(),
        }
    }

    /// Report user navigation from the gallery view.
    pub fn select_index(&self, index: usize) {
        if !self.is_active() {
            return;
        }
        self.shared.publish(index, self.shared.store.items());
    }

    /// Unregister from the bridge and stop publishing. Safe to call twice.
    ///
    /// A newer owner that already replaced this one stays registered.
    pub fn release(&self) {
        let subscription = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if subscription.is_none() {
            return;
        }
        drop(subscription);
        if self.shared.bridge.is_owned_by(&self.shared.store) {
            self.shared.bridge.register(None);
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl Drop for GalleryOwner {
    fn drop(&mut self) {
        self.release();
    }
}
