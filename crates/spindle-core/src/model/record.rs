use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::model::ids::RecordId;
use crate::model::patch::RecordPatch;

/// Current wall-clock time in epoch milliseconds.
#[must_use]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// User-editable description of a pressing.
///
/// The four string fields are always present (empty when unknown); the
/// remaining fields are filled in when a record comes from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VinylData {
    #[serde(default)]
    pub artist_name: String,

    #[serde(default)]
    pub album_name: String,

    /// Catalog number as printed on the sleeve or label.
    #[serde(default)]
    pub serial_number: String,

    /// Matrix / runout etchings from the dead wax.
    #[serde(default)]
    pub matrix_runout: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Human-readable format summary, e.g. `1 × Vinyl (LP, Album)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discogs_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discogs_url: Option<String>,
}

/// A record as persisted in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VinylRecord {
    pub id: RecordId,

    #[serde(flatten)]
    pub data: VinylData,

    /// A `data:` URI or an external image URL.
    #[serde(default)]
    pub image_url: Option<String>,

    /// Epoch milliseconds; set once at creation.
    pub created_at: i64,

    /// Epoch milliseconds; refreshed by every update.
    pub updated_at: i64,
}

impl VinylRecord {
    /// Build a brand-new record from partial input.
    ///
    /// Missing strings become `""`, a missing or empty image becomes
    /// `None`, and both timestamps are `now`.
    #[must_use]
    pub fn from_patch(id: RecordId, patch: &RecordPatch, now: i64) -> Self {
        let mut data = VinylData::default();
        patch.apply_to(&mut data);
        Self {
            id,
            data,
            image_url: patch.image_url.clone().filter(|url| !url.is_empty()),
            created_at: now,
            updated_at: now,
        }
    }

    /// `"Artist - Album"`, falling back to whichever half is known.
    #[must_use]
    pub fn display_title(&self) -> String {
        match (
            self.data.artist_name.is_empty(),
            self.data.album_name.is_empty(),
        ) {
            (false, false) => format!("{} - {}", self.data.artist_name, self.data.album_name),
            (false, true) => self.data.artist_name.clone(),
            (true, false) => self.data.album_name.clone(),
            (true, true) => String::from("(untitled)"),
        }
    }
}
