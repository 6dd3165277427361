//! Authoritative gallery collection with change subscriptions.
//!
//! DESIGN
//! ======
//! The store is the one place the ordered image list lives. Mutations are
//! plain values ([`GalleryMutation`]) applied by a pure function, and every
//! applied mutation is announced to subscribers so the rendering layer can
//! redraw without a shared parent component.
//!
//! Subscribers run after the internal lock is released, so a subscriber may
//! read the store or apply further mutations from inside its callback.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::record::ImageRecord;

/// A change to the gallery collection.
#[derive(Clone, Debug, PartialEq)]
pub enum GalleryMutation {
    /// Drop every colliding record and insert this one at the front.
    Upsert(ImageRecord),
    /// Drop every record whose original, thumbnail, or source id equals the url.
    Remove(String),
    /// Empty the collection.
    Clear,
    /// Replace the whole collection.
    Replace(Vec<ImageRecord>),
}

/// Discriminant of a [`GalleryMutation`], handed to subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationKind {
    Upsert,
    Remove,
    Clear,
    Replace,
}

impl GalleryMutation {
    #[must_use]
    pub fn kind(&self) -> MutationKind {
        match self {
            Self::Upsert(_) => MutationKind::Upsert,
            Self::Remove(_) => MutationKind::Remove,
            Self::Clear => MutationKind::Clear,
            Self::Replace(_) => MutationKind::Replace,
        }
    }

    /// Apply this mutation to `items` in place.
    pub fn apply_to(self, items: &mut Vec<ImageRecord>) {
        match self {
            Self::Upsert(record) => {
                items.retain(|existing| !existing.same_image(&record));
                items.insert(0, record);
            }
            Self::Remove(url) => items.retain(|existing| !existing.matches_url(&url)),
            Self::Clear => items.clear(),
            Self::Replace(next) => *items = next,
        }
    }
}

/// Callback invoked after every applied mutation with the resulting collection.
pub type GalleryListener = Arc<dyn Fn(MutationKind, &[ImageRecord]) + Send + Sync>;

#[derive(Default)]
struct StoreInner {
    items: Vec<ImageRecord>,
    listeners: Vec<(u64, GalleryListener)>,
}

/// Cloneable handle to one gallery collection.
///
/// Clones share the same collection; independent stores never do.
#[derive(Clone, Default)]
pub struct GalleryStore {
    inner: Arc<Mutex<StoreInner>>,
    next_listener_id: Arc<AtomicU64>,
}

impl std::fmt::Debug for GalleryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("GalleryStore")
            .field("items", &inner.items)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl GalleryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an initial collection.
    #[must_use]
    pub fn with_items(items: Vec<ImageRecord>) -> Self {
        let store = Self::default();
        store.lock().items = items;
        store
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether two handles point at the same collection.
    #[must_use]
    pub fn ptr_eq(&self, other: &GalleryStore) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Snapshot of the current collection, front first.
    #[must_use]
    pub fn items(&self) -> Vec<ImageRecord> {
        self.lock().items.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    /// Apply `mutation`, notify subscribers, and return the new collection.
    pub fn apply(&self, mutation: GalleryMutation) -> Vec<ImageRecord> {
        let kind = mutation.kind();
        let (items, listeners) = {
            let mut inner = self.lock();
            mutation.apply_to(&mut inner.items);
            let listeners = inner
                .listeners
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect::<Vec<_>>();
            (inner.items.clone(), listeners)
        };

        for listener in listeners {
            listener(kind, &items);
        }
        items
    }

    /// Register `listener` for every future mutation.
    ///
    /// The listener stays registered until the returned handle is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: GalleryListener) -> GallerySubscription {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.lock().listeners.push((id, listener));
        GallerySubscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock().listeners.len()
    }
}

/// Live registration of a store listener; unsubscribes on drop.
pub struct GallerySubscription {
    id: u64,
    inner: std::sync::Weak<Mutex<StoreInner>>,
}

impl std::fmt::Debug for GallerySubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GallerySubscription").field("id", &self.id).finish()
    }
}

impl Drop for GallerySubscription {
    fn drop(&mut self) {
        let Some(shared) = self.inner.upgrade() else {
            return;
        };
        let mut inner = shared.lock().unwrap_or_else(PoisonError::into_inner);
        inner.listeners.retain(|(id, _)| *id != self.id);
    }
}
