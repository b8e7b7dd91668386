//! Stored catalog credentials.
//!
//! Three independent secrets live in the same key-value medium as the
//! collection: a personal access token, and a consumer key/secret pair.
//! Each can be set or cleared on its own; deciding which of them is
//! actually used is the catalog client's job.

use crate::error::Result;
use crate::schema::KeyValueStore;

pub const TOKEN_KEY: &str = "discogs_token";
pub const CONSUMER_KEY_KEY: &str = "discogs_consumer_key";
pub const CONSUMER_SECRET_KEY: &str = "discogs_consumer_secret";

/// Snapshot of whatever credentials are currently stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredCredentials {
    pub token: Option<String>,
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
}

impl StoredCredentials {
    /// Whether nothing at all is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.consumer_key.is_none() && self.consumer_secret.is_none()
    }
}

/// Reads and writes the stored credentials.
#[derive(Debug)]
pub struct CredentialStore<S> {
    backend: S,
}

impl<S: KeyValueStore> CredentialStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn load(&self) -> Result<StoredCredentials> {
        Ok(StoredCredentials {
            token: self.backend.get(TOKEN_KEY)?,
            consumer_key: self.backend.get(CONSUMER_KEY_KEY)?,
            consumer_secret: self.backend.get(CONSUMER_SECRET_KEY)?,
        })
    }

    /// Store a personal access token. A blank token clears it.
    pub fn set_token(&self, token: &str) -> Result<()> {
        self.put(TOKEN_KEY, token)
    }

    /// Store a consumer key/secret pair. Blank values clear their key.
    pub fn set_consumer_credentials(&self, key: &str, secret: &str) -> Result<()> {
        self.put(CONSUMER_KEY_KEY, key)?;
        self.put(CONSUMER_SECRET_KEY, secret)
    }

    pub fn set_consumer_key(&self, key: &str) -> Result<()> {
        self.put(CONSUMER_KEY_KEY, key)
    }

    pub fn set_consumer_secret(&self, secret: &str) -> Result<()> {
        self.put(CONSUMER_SECRET_KEY, secret)
    }

    pub fn clear_token(&self) -> Result<()> {
        self.backend.remove(TOKEN_KEY)
    }

    pub fn clear_consumer_key(&self) -> Result<()> {
        self.backend.remove(CONSUMER_KEY_KEY)
    }

    pub fn clear_consumer_secret(&self) -> Result<()> {
        self.backend.remove(CONSUMER_SECRET_KEY)
    }

    pub fn clear_consumer_credentials(&self) -> Result<()> {
        self.clear_consumer_key()?;
        self.clear_consumer_secret()
    }

    pub fn clear_all(&self) -> Result<()> {
        self.clear_token()?;
        self.clear_consumer_credentials()?;
        log::info!("Cleared stored catalog credentials");
        Ok(())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            self.backend.remove(key)
        } else {
            self.backend.set(key, value)
        }
    }
}
