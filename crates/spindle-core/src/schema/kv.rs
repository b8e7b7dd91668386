use crate::error::Result;

/// A flat string-to-string store holding named entries.
///
/// This is the only seam between the record/credential stores and the
/// durable medium.
pub trait KeyValueStore {
    /// Read an entry; `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace an entry.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete an entry. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
