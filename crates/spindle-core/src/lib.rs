//! Core domain model and local persistence for spindle.
//!
//! This crate defines the vinyl record model, the SQLite-backed key-value
//! medium the collection lives in, the [`RecordStore`] that performs CRUD
//! over that collection, and the stored catalog credentials.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod ocr;
pub mod schema;
pub mod settings;
pub mod store;

pub use error::{Error, Result};
pub use model::{merge, now_millis, RecordId, RecordPatch, VinylData, VinylRecord};
pub use schema::{Database, KeyValueStore};
pub use settings::{CredentialStore, StoredCredentials};
pub use store::{ReadPolicy, RecordStore, COLLECTION_KEY};
