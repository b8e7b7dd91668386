//! CRUD over the vinyl collection.
//!
//! The whole collection is one JSON array stored under [`COLLECTION_KEY`]
//! in a [`KeyValueStore`]. Every mutation is read-modify-write of that
//! array; there is no locking, so overlapping writers race and the last
//! write wins.
//!
//! Reads and writes fail differently. A failed *write* always surfaces
//! as [`Error::Persistence`]. A failed *read* is governed by the store's
//! [`ReadPolicy`]: the default, [`ReadPolicy::EmptyOnFailure`], treats an
//! unreadable collection as empty so callers can always render a list.

use crate::error::{Error, Result};
use crate::model::{merge, now_millis, RecordId, RecordPatch, VinylRecord};
use crate::schema::KeyValueStore;

/// Storage key of the persisted collection.
pub const COLLECTION_KEY: &str = "vinyl_records";

/// What a failed read of the collection turns into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Log the failure and carry on with an empty collection.
    #[default]
    EmptyOnFailure,
    /// Propagate the failure as [`Error::Persistence`].
    Strict,
}

/// The record store.
#[derive(Debug)]
pub struct RecordStore<S> {
    backend: S,
    read_policy: ReadPolicy,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Create a store with the default [`ReadPolicy::EmptyOnFailure`].
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            read_policy: ReadPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_read_policy(mut self, policy: ReadPolicy) -> Self {
        self.read_policy = policy;
        self
    }

    pub const fn read_policy(&self) -> ReadPolicy {
        self.read_policy
    }

    pub const fn backend(&self) -> &S {
        &self.backend
    }

    /// All records in insertion order.
    pub async fn list_records(&self) -> Result<Vec<VinylRecord>> {
        self.load()
    }

    /// A single record by id.
    pub async fn get_record(&self, id: &RecordId) -> Result<VinylRecord> {
        self.load()?
            .into_iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| not_found(id))
    }

    /// Append a new record built from `patch` and persist the collection.
    pub async fn create_record(&self, patch: RecordPatch) -> Result<VinylRecord> {
        let mut records = self.load()?;
        let now = now_millis();

        let mut id = RecordId::generate(now);
        while records.iter().any(|r| r.id == id) {
            log::warn!("Generated record id {} already in use; regenerating", id);
            id = RecordId::generate(now);
        }

        let record = VinylRecord::from_patch(id, &patch, now);
        records.push(record.clone());
        self.save(&records)?;

        log::info!("Created record {} ({})", record.id, record.display_title());
        Ok(record)
    }

    /// Merge `patch` onto the record with `id` and persist the collection.
    pub async fn update_record(&self, id: &RecordId, patch: RecordPatch) -> Result<VinylRecord> {
        let mut records = self.load()?;
        let slot = records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| not_found(id))?;

        *slot = merge(slot, &patch, now_millis());
        let updated = slot.clone();
        self.save(&records)?;

        log::info!("Updated record {}", updated.id);
        Ok(updated)
    }

    /// Remove the record with `id`. Deleting a missing id is a no-op.
    pub async fn delete_record(&self, id: &RecordId) -> Result<()> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| &r.id != id);

        if records.len() == before {
            log::debug!("Delete of unknown record {} ignored", id);
            return Ok(());
        }

        self.save(&records)?;
        log::info!("Deleted record {}", id);
        Ok(())
    }

    /// Store an image and return the reference to put in `image_url`.
    ///
    /// Images live inline in the record, so the reference is the input.
    pub async fn upload_image(&self, image: String) -> Result<String> {
        Ok(image)
    }

    fn load(&self) -> Result<Vec<VinylRecord>> {
        match self.read_collection() {
            Ok(records) => Ok(records),
            Err(e) => match self.read_policy {
                ReadPolicy::EmptyOnFailure => {
                    log::warn!("Error reading record collection, treating as empty: {}", e);
                    Ok(Vec::new())
                }
                ReadPolicy::Strict => Err(e.into_persistence()),
            },
        }
    }

    fn read_collection(&self) -> Result<Vec<VinylRecord>> {
        match self.backend.get(COLLECTION_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, records: &[VinylRecord]) -> Result<()> {
        let json = serde_json::to_string(records).map_err(|e| Error::from(e).into_persistence())?;
        self.backend
            .set(COLLECTION_KEY, &json)
            .map_err(|e| {
                log::error!("Error saving record collection: {}", e);
                e.into_persistence()
            })
    }
}

fn not_found(id: &RecordId) -> Error {
    Error::NotFound { id: id.to_string() }
}
