//! Image records and input normalization.
//!
//! DESIGN
//! ======
//! Producers (chat replies, uploads, manual url entry) hand the gallery loosely
//! shaped input. Everything funnels through [`ImageInput::normalize`], which
//! applies one fixed precedence table and either yields a fully populated
//! [`ImageRecord`] or rejects the input.
//!
//! | field         | precedence                                        |
//! |---------------|---------------------------------------------------|
//! | `original`    | `original` → `url` → `itemImageSrc` → reject      |
//! | `thumbnail`   | `thumbnail` → `thumbnailImageSrc` → `original`    |
//! | `description` | `description` → fallback → `""`                   |
//! | `source_id`   | `sourceId` → `id` → `url` → `original`            |
//! | `is_local`    | `isLocal` → `false`                               |
//!
//! Empty strings count as absent for every url-like field.

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use serde::{Deserialize, Serialize};

/// One displayable image in the gallery.
///
/// Records are immutable once inserted; replacing an image means upserting a
/// new record with a colliding identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    /// Full-resolution image url.
    pub original: String,
    /// Thumbnail url; equals `original` when the producer had none.
    pub thumbnail: String,
    /// Caption shown under the image (may be empty).
    pub description: String,
    /// Stable identity key used for deduplication.
    pub source_id: String,
    /// True for transient browser-local references such as `blob:` previews.
    #[serde(default)]
    pub is_local: bool,
    /// Opaque producer payload, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl ImageRecord {
    /// Whether `other` refers to the same logical image.
    ///
    /// Any one of source id, original url, or thumbnail url matching is enough.
    #[must_use]
    pub fn same_image(&self, other: &ImageRecord) -> bool {
        self.source_id == other.source_id || self.original == other.original || self.thumbnail == other.thumbnail
    }

    /// Whether `url` names this record by original, thumbnail, or source id.
    #[must_use]
    pub fn matches_url(&self, url: &str) -> bool {
        self.original == url || self.thumbnail == url || self.source_id == url
    }
}

/// Reasons an [`ImageInput`] cannot become an [`ImageRecord`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("image input has no resolvable original url")]
    MissingOriginal,
}

/// Loosely shaped producer input accepted by the gallery.
///
/// Deserializes from the field aliases the various producers emit, so a raw
/// artifact JSON object can be turned into gallery input directly.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInput {
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub item_image_src: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub thumbnail_image_src: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub is_local: Option<bool>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl ImageInput {
    /// Input naming only a full-resolution url.
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            original: Some(url.into()),
            ..Self::default()
        }
    }

    /// Resolve aliases and defaults into a complete record.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::MissingOriginal`] when none of `original`,
    /// `url`, or `itemImageSrc` carries a non-empty value.
    pub fn normalize(self, fallback_description: Option<&str>) -> Result<ImageRecord, NormalizeError> {
        let original = first_present([&self.original, &self.url, &self.item_image_src])
            .ok_or(NormalizeError::MissingOriginal)?
            .to_owned();

        let thumbnail = first_present([&self.thumbnail, &self.thumbnail_image_src])
            .map_or_else(|| original.clone(), str::to_owned);

        let description = self
            .description
            .as_deref()
            .or(fallback_description)
            .unwrap_or_default()
            .to_owned();

        let source_id = first_present([&self.source_id, &self.id, &self.url])
            .map_or_else(|| original.clone(), str::to_owned);

        Ok(ImageRecord {
            original,
            thumbnail,
            description,
            source_id,
            is_local: self.is_local.unwrap_or(false),
            metadata: self.metadata,
        })
    }
}

impl From<ImageRecord> for ImageInput {
    fn from(record: ImageRecord) -> Self {
        Self {
            original: Some(record.original),
            thumbnail: Some(record.thumbnail),
            description: Some(record.description),
            source_id: Some(record.source_id),
            is_local: Some(record.is_local),
            metadata: record.metadata,
            ..Self::default()
        }
    }
}

fn first_present<const N: usize>(candidates: [&Option<String>; N]) -> Option<&str> {
    candidates
        .into_iter()
        .filter_map(Option::as_deref)
        .find(|value| !value.is_empty())
}
