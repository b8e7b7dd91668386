//! Wire types of the Discogs database API.
//!
//! Only the fields spindle reads are modelled. Everything except ids and
//! titles is defaulted so partial payloads still deserialize.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result category filter for database searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Release,
    Master,
    Artist,
    Label,
    /// Any category Discogs adds later.
    #[serde(other)]
    Other,
}

impl SearchType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::Master => "master",
            Self::Artist => "artist",
            Self::Label => "label",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "release" => Ok(Self::Release),
            "master" => Ok(Self::Master),
            "artist" => Ok(Self::Artist),
            "label" => Ok(Self::Label),
            other => Err(format!(
                "unknown search type '{other}' (expected release, master, artist or label)"
            )),
        }
    }
}

/// Response of `GET /database/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub items: u64,
    #[serde(default)]
    pub urls: PaginationUrls,
}

impl Pagination {
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

/// A single hit from the database search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: SearchType,
    /// Combined "Artist - Title" string.
    pub title: String,
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub country: Option<String>,
    /// Discogs sends the search-result year as a string.
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub format: Vec<String>,
    #[serde(default)]
    pub label: Vec<String>,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub style: Vec<String>,
    #[serde(default)]
    pub catno: Option<String>,
    #[serde(default)]
    pub barcode: Vec<String>,
    #[serde(default)]
    pub master_id: Option<u64>,
    #[serde(default)]
    pub resource_url: String,
    #[serde(default)]
    pub uri: Option<String>,
}

/// Full release details from `GET /releases/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub artists: Vec<ReleaseArtist>,
    /// Discogs uses `0` for an unknown year.
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub released: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub labels: Vec<ReleaseLabel>,
    #[serde(default)]
    pub formats: Vec<ReleaseFormat>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub tracklist: Vec<Track>,
    #[serde(default)]
    pub images: Vec<ReleaseImage>,
    #[serde(default)]
    pub identifiers: Vec<Identifier>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub resource_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseArtist {
    pub name: String,
    /// Artist name variation as credited on this release.
    #[serde(default)]
    pub anv: Option<String>,
    #[serde(default)]
    pub id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseLabel {
    pub name: String,
    #[serde(default)]
    pub catno: String,
    #[serde(default)]
    pub id: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseFormat {
    pub name: String,
    #[serde(default)]
    pub qty: String,
    #[serde(default)]
    pub descriptions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub position: String,
    pub title: String,
    #[serde(default)]
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseImage {
    /// `primary` or `secondary`.
    #[serde(rename = "type", default)]
    pub kind: String,
    pub uri: String,
    #[serde(default)]
    pub uri150: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// A printed identifier: barcode, matrix/runout, rights society, ...
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(default)]
    pub description: Option<String>,
}
