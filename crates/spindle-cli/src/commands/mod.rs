pub mod catalog;
pub mod config;
pub mod credentials;
pub mod image;
pub mod records;

use anyhow::{Context as _, Result};
use spindle_catalog::{CatalogError, Config, DiscogsClient};
use spindle_core::{CredentialStore, Database, RecordStore};

pub use catalog::{
    import_release, search, search_barcode, search_catno, show_master, show_release,
};
pub use config::{run_config, ConfigCommand};
pub use credentials::{run_credentials, ClearTarget, CredentialsCommand};
pub use records::{
    add_record, delete_record, edit_record, list_records, scan_label, show_record, RecordFields,
};

/// Everything a command needs: the effective config and an open database.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    db: Database,
}

impl Context {
    pub fn open(config: Config) -> Result<Self> {
        let db = Database::open(&config.database_path).with_context(|| {
            format!(
                "Failed to open database at {}",
                config.database_path.display()
            )
        })?;
        Ok(Self { config, db })
    }

    pub fn records(&self) -> RecordStore<&Database> {
        RecordStore::new(&self.db)
    }

    pub fn credentials(&self) -> CredentialStore<&Database> {
        CredentialStore::new(&self.db)
    }

    /// A catalog client using saved credentials, then config/env ones.
    pub fn catalog(&self) -> Result<DiscogsClient> {
        let stored = self.credentials().load()?;
        let client = DiscogsClient::new(self.config.client_config(&stored))?;
        Ok(client)
    }
}

/// Attach a hint on how to fix configuration problems.
pub fn explain(err: CatalogError) -> anyhow::Error {
    match err {
        CatalogError::NotConfigured => anyhow::Error::new(err).context(
            "No Discogs credentials found.\n\n\
             Save a personal access token with:\n  \
             spindle credentials set-token <TOKEN>\n\
             or a consumer key/secret pair with:\n  \
             spindle credentials set-consumer <KEY> <SECRET>\n\
             or set SPINDLE_DISCOGS_TOKEN in the environment.",
        ),
        other => anyhow::Error::new(other),
    }
}
