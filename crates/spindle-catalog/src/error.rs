//! Catalog client error types.

use thiserror::Error;

/// Errors that can occur while talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No token and no complete consumer key/secret pair is configured.
    #[error("Discogs API not configured. Please provide authentication credentials.")]
    NotConfigured,

    /// The service answered with a non-success status.
    #[error("Discogs API error: {status}. {message}")]
    Upstream { status: u16, message: String },

    /// The request never got a response.
    #[error("Failed to fetch data from Discogs API: {0}")]
    Unreachable(String),

    /// A success response whose body did not match the expected shape.
    #[error("parse error from Discogs: {0}")]
    Parse(String),

    /// The configured base URL cannot be used.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl CatalogError {
    /// Returns `true` when the error is transient and the operation may
    /// succeed if the caller retries it.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Unreachable(_) => true,
            Self::Upstream { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` when the service reported the entity as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Upstream { status: 404, .. })
    }
}

/// Convenience alias for catalog results.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
