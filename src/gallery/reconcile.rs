//! Displayed-index reconciliation after the collection changes shape.

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod reconcile_test;

use super::record::ImageRecord;

/// Which image the gallery view shows and which url is published as active.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveSelection {
    pub index: usize,
    pub active_url: String,
}

impl ActiveSelection {
    /// The url to publish when moving from `previous` to `self`, if it changed.
    #[must_use]
    pub fn changed_url(&self, previous: &ActiveSelection) -> Option<&str> {
        (self.active_url != previous.active_url).then_some(self.active_url.as_str())
    }
}

/// Reconcile a previously displayed index against a new collection.
///
/// * empty collection: index 0, no active url
/// * index past the end: clamped to the last record
/// * otherwise the active url follows the record at the (clamped) index
///
/// Pure and idempotent: feeding the output back in with the same collection
/// returns the same selection.
#[must_use]
pub fn reconcile(prev_index: usize, items: &[ImageRecord], active_url: &str) -> ActiveSelection {
    let Some(last) = items.len().checked_sub(1) else {
        return ActiveSelection::default();
    };

    let index = prev_index.min(last);
    let current = &items[index].original;
    let active_url = if current == active_url { active_url } else { current.as_str() };

    ActiveSelection {
        index,
        active_url: active_url.to_owned(),
    }
}
