//! Discogs catalog access for spindle.
//!
//! Provides a normalizing client for the Discogs database API, the
//! configuration it is built from, and the mapping from a fetched release
//! to a new collection record.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod config;
pub mod error;
pub mod import;
pub mod types;

pub use client::{ClientConfig, Credentials, DiscogsClient, DEFAULT_PAGE, DEFAULT_PER_PAGE};
pub use config::Config;
pub use error::{CatalogError, CatalogResult};
pub use import::release_to_patch;
pub use types::{
    Identifier, Pagination, ReleaseDetails, ReleaseFormat, ReleaseLabel, SearchResponse,
    SearchResult, SearchType,
};
