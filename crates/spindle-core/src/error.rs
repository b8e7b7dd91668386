use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("record not found: {id}")]
    NotFound { id: String },

    /// Writing the collection (or a stored setting) back to the local
    /// medium failed. Reads never produce this under the default policy.
    #[error("failed to save data: {0}")]
    Persistence(String),
}

impl Error {
    /// Returns `true` when the error indicates the record was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Collapse any low-level storage failure into [`Error::Persistence`].
    ///
    /// `NotFound` passes through untouched.
    #[must_use]
    pub fn into_persistence(self) -> Self {
        match self {
            Self::NotFound { .. } | Self::Persistence(_) => self,
            other => Self::Persistence(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
