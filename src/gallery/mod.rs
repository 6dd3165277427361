//! Cross-component image gallery synchronization.
//!
//! ARCHITECTURE
//! ============
//! `record` defines the image model and input normalization, `store` holds the
//! authoritative collection and its subscribers, `bridge` is the facade every
//! producer and reader goes through, `reconcile` keeps the displayed index
//! consistent with the collection, and `owner` ties them together for the page
//! that renders the gallery.

pub mod bridge;
pub mod owner;
pub mod reconcile;
pub mod record;
pub mod store;

pub use bridge::{AddImageOptions, GalleryBridge};
pub use owner::{GalleryOwner, GalleryView};
pub use reconcile::{ActiveSelection, reconcile};
pub use record::{ImageInput, ImageRecord, NormalizeError};
pub use store::{GalleryMutation, GalleryStore, GallerySubscription, MutationKind};
