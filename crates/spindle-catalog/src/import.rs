//! Turning catalog releases into collection records.

use spindle_core::RecordPatch;

use crate::types::{ReleaseDetails, ReleaseFormat};

/// Map a fetched release onto the fields of a new record.
///
/// Every string field is set (possibly to `""`) so the result can go
/// straight into [`RecordStore::create_record`].
///
/// [`RecordStore::create_record`]: spindle_core::RecordStore::create_record
#[must_use]
pub fn release_to_patch(release: &ReleaseDetails) -> RecordPatch {
    let first_label = release.labels.first();

    RecordPatch {
        artist_name: Some(artist_credit(release)),
        album_name: Some(release.title.clone()),
        serial_number: Some(first_label.map(|l| l.catno.clone()).unwrap_or_default()),
        matrix_runout: Some(matrix_runout(release)),
        year: release.year.filter(|y| *y > 0),
        country: release.country.clone().filter(|c| !c.is_empty()),
        genre: non_empty(&release.genres),
        style: non_empty(&release.styles),
        label: first_label.map(|l| l.name.clone()),
        format: format_summary(&release.formats),
        discogs_id: Some(release.id),
        discogs_url: release.uri.clone(),
        image_url: release.images.first().map(|i| i.uri.clone()),
    }
}

fn artist_credit(release: &ReleaseDetails) -> String {
    release
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values of every identifier that looks like a dead-wax etching.
fn matrix_runout(release: &ReleaseDetails) -> String {
    release
        .identifiers
        .iter()
        .filter(|id| {
            let kind = id.kind.to_lowercase();
            kind.contains("matrix") || kind.contains("runout")
        })
        .map(|id| id.value.as_str())
        .collect::<Vec<_>>()
        .join(" // ")
}

/// `"1 × Vinyl (LP, Album), 1 × CD"`
fn format_summary(formats: &[ReleaseFormat]) -> Option<String> {
    if formats.is_empty() {
        return None;
    }
    let parts: Vec<String> = formats
        .iter()
        .map(|f| {
            if f.descriptions.is_empty() {
                format!("{} × {}", f.qty, f.name)
            } else {
                format!("{} × {} ({})", f.qty, f.name, f.descriptions.join(", "))
            }
        })
        .collect();
    Some(parts.join(", "))
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}
