use serde::{Deserialize, Serialize};

use crate::model::record::{VinylData, VinylRecord};

/// Partial record input.
///
/// Used as the body of a create (absent strings default to `""`) and as
/// the patch of an update (absent fields keep their previous value).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix_runout: Option<String>,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discogs_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discogs_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl RecordPatch {
    /// Whether the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite every field of `data` that this patch carries.
    pub fn apply_to(&self, data: &mut VinylData) {
        fn set<T: Clone>(slot: &mut T, value: Option<&T>) {
            if let Some(v) = value {
                slot.clone_from(v);
            }
        }
        fn set_opt<T: Clone>(slot: &mut Option<T>, value: Option<&T>) {
            if let Some(v) = value {
                *slot = Some(v.clone());
            }
        }

        set(&mut data.artist_name, self.artist_name.as_ref());
        set(&mut data.album_name, self.album_name.as_ref());
        set(&mut data.serial_number, self.serial_number.as_ref());
        set(&mut data.matrix_runout, self.matrix_runout.as_ref());
        set_opt(&mut data.year, self.year.as_ref());
        set_opt(&mut data.country, self.country.as_ref());
        set_opt(&mut data.genre, self.genre.as_ref());
        set_opt(&mut data.style, self.style.as_ref());
        set_opt(&mut data.label, self.label.as_ref());
        set_opt(&mut data.format, self.format.as_ref());
        set_opt(&mut data.discogs_id, self.discogs_id.as_ref());
        set_opt(&mut data.discogs_url, self.discogs_url.as_ref());
    }
}

impl From<VinylData> for RecordPatch {
    fn from(data: VinylData) -> Self {
        Self {
            artist_name: Some(data.artist_name),
            album_name: Some(data.album_name),
            serial_number: Some(data.serial_number),
            matrix_runout: Some(data.matrix_runout),
            year: data.year,
            country: data.country,
            genre: data.genre,
            style: data.style,
            label: data.label,
            format: data.format,
            discogs_id: data.discogs_id,
            discogs_url: data.discogs_url,
            image_url: None,
        }
    }
}

/// Shallow-merge `patch` onto `existing`.
///
/// `id` and `created_at` never change. `updated_at` becomes `now`, or one
/// millisecond past the previous value if the clock has not moved on, so
/// it always strictly increases.
#[must_use]
pub fn merge(existing: &VinylRecord, patch: &RecordPatch, now: i64) -> VinylRecord {
    let mut merged = existing.clone();
    patch.apply_to(&mut merged.data);
    if let Some(image) = &patch.image_url {
        merged.image_url = Some(image.clone());
    }
    merged.updated_at = now.max(existing.updated_at + 1);
    merged
}
