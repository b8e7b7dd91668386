//! Discogs database API client.
//!
//! A [`DiscogsClient`] is an immutable handle: credentials are resolved
//! once, when its [`ClientConfig`] is built, and captured for the life of
//! the client. To switch credentials, build a new client.
//!
//! No retries happen here. Every failure surfaces to the caller as a
//! [`CatalogError`]; [`CatalogError::is_transient`] tells the caller
//! whether trying again could help.

use std::fmt;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{CatalogError, CatalogResult};
use crate::types::{ReleaseDetails, SearchResponse, SearchType};

pub const DISCOGS_API_BASE: &str = "https://api.discogs.com";
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 20;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const GENERIC_FAILURE: &str = "request failed";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// How requests authenticate.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Personal access token, sent as `Authorization: Discogs token=...`.
    Token(String),
    /// Consumer key/secret, sent as `key` and `secret` query parameters.
    Consumer { key: String, secret: String },
}

impl Credentials {
    /// Pick credentials out of three independently stored values.
    ///
    /// A non-blank token wins. Otherwise the consumer values are used only
    /// when both are non-blank. Anything else means "not configured".
    #[must_use]
    pub fn resolve(
        token: Option<&str>,
        consumer_key: Option<&str>,
        consumer_secret: Option<&str>,
    ) -> Option<Self> {
        fn clean(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|v| !v.is_empty())
        }

        if let Some(token) = clean(token) {
            return Some(Self::Token(token.to_string()));
        }
        match (clean(consumer_key), clean(consumer_secret)) {
            (Some(key), Some(secret)) => Some(Self::Consumer {
                key: key.to_string(),
                secret: secret.to_string(),
            }),
            _ => None,
        }
    }

    /// Short label for status output; never includes the secret itself.
    #[must_use]
    pub const fn mode(&self) -> &'static str {
        match self {
            Self::Token(_) => "personal access token",
            Self::Consumer { .. } => "consumer key/secret",
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(_) => f.debug_tuple("Token").field(&"<redacted>").finish(),
            Self::Consumer { key, .. } => f
                .debug_struct("Consumer")
                .field("key", key)
                .field("secret", &"<redacted>")
                .finish(),
        }
    }
}

/// Everything needed to build a [`DiscogsClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub credentials: Option<Credentials>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DISCOGS_API_BASE.to_string(),
            user_agent: format!("spindle/{}", env!("CARGO_PKG_VERSION")),
            timeout: DEFAULT_TIMEOUT,
            credentials: None,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(credentials: Option<Credentials>) -> Self {
        Self {
            credentials,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::Token(token.into()));
        self
    }

    #[must_use]
    pub fn with_consumer_credentials(
        mut self,
        key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::Consumer {
            key: key.into(),
            secret: secret.into(),
        });
        self
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Error body Discogs returns alongside non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Discogs API client.
#[derive(Debug, Clone)]
pub struct DiscogsClient {
    http: Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl DiscogsClient {
    /// Create a client from `config`.
    ///
    /// The base URL must be non-empty and use `http://` or `https://`;
    /// trailing slashes are dropped. A client without credentials can be
    /// built, but every request on it fails with
    /// [`CatalogError::NotConfigured`].
    pub fn new(config: ClientConfig) -> CatalogResult<Self> {
        let base_url = normalize_base_url(&config.base_url)?;

        let http = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url,
            credentials: config.credentials,
        })
    }

    /// Whether a token or a complete consumer pair is present.
    pub const fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    pub const fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Free-text database search.
    pub async fn search(
        &self,
        query: &str,
        kind: Option<SearchType>,
        page: u32,
        per_page: u32,
    ) -> CatalogResult<SearchResponse> {
        let mut params = vec![
            ("q", query.to_string()),
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        if let Some(kind) = kind {
            params.push(("type", kind.as_str().to_string()));
        }
        self.request("/database/search", params).await
    }

    /// Search releases by artist and album name.
    pub async fn search_release(
        &self,
        artist: &str,
        album: &str,
        page: u32,
    ) -> CatalogResult<SearchResponse> {
        let query = format!("{artist} {album}");
        self.search(&query, Some(SearchType::Release), page, DEFAULT_PER_PAGE)
            .await
    }

    /// Exact barcode (UPC/EAN) lookup over releases.
    pub async fn search_by_barcode(&self, barcode: &str) -> CatalogResult<SearchResponse> {
        let params = vec![
            ("barcode", barcode.to_string()),
            ("type", SearchType::Release.as_str().to_string()),
        ];
        self.request("/database/search", params).await
    }

    /// Catalog number lookup over releases.
    pub async fn search_by_catalog_number(
        &self,
        catno: &str,
        page: u32,
    ) -> CatalogResult<SearchResponse> {
        let params = vec![
            ("catno", catno.to_string()),
            ("type", SearchType::Release.as_str().to_string()),
            ("page", page.to_string()),
        ];
        self.request("/database/search", params).await
    }

    /// Full details of one release.
    pub async fn get_release(&self, id: u64) -> CatalogResult<ReleaseDetails> {
        self.request(&format!("/releases/{id}"), Vec::new()).await
    }

    /// Master release as raw JSON; masters are shown, never imported.
    pub async fn get_master_release(&self, id: u64) -> CatalogResult<serde_json::Value> {
        self.request(&format!("/masters/{id}"), Vec::new()).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        mut params: Vec<(&'static str, String)>,
    ) -> CatalogResult<T> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(CatalogError::NotConfigured)?;

        let mut request = self
            .http
            .get(format!("{}{endpoint}", self.base_url))
            .header(CONTENT_TYPE, "application/json");

        match credentials {
            Credentials::Token(token) => {
                request = request.header(AUTHORIZATION, format!("Discogs token={token}"));
            }
            Credentials::Consumer { key, secret } => {
                params.push(("key", key.clone()));
                params.push(("secret", secret.clone()));
            }
        }

        log::debug!("GET {} via {}", endpoint, credentials.mode());

        let response = request.query(&params).send().await.map_err(|e| {
            log::warn!("Discogs request to {} failed: {}", endpoint, e);
            CatalogError::Unreachable(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = upstream_message(&body);
            log::warn!("Discogs returned {} for {}: {}", status, endpoint, message);
            return Err(CatalogError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

fn normalize_base_url(raw: &str) -> CatalogResult<String> {
    let url = raw.trim().trim_end_matches('/');
    if url.is_empty() {
        return Err(CatalogError::InvalidUrl("URL cannot be empty".into()));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CatalogError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }
    Ok(url.to_string())
}

/// The `message` of a JSON error body, or a generic fallback.
fn upstream_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_token_wins() {
        let creds = Credentials::resolve(Some("tok"), Some("key"), Some("secret"));
        assert_eq!(creds, Some(Credentials::Token("tok".into())));
    }

    #[test]
    fn test_resolve_consumer_pair() {
        let creds = Credentials::resolve(None, Some("key"), Some("secret"));
        assert_eq!(
            creds,
            Some(Credentials::Consumer {
                key: "key".into(),
                secret: "secret".into()
            })
        );
    }

    #[test]
    fn test_resolve_half_pair_is_unconfigured() {
        assert!(Credentials::resolve(None, Some("key"), None).is_none());
        assert!(Credentials::resolve(None, None, Some("secret")).is_none());
        assert!(Credentials::resolve(None, None, None).is_none());
    }

    #[test]
    fn test_resolve_blank_values_ignored() {
        assert!(Credentials::resolve(Some("  "), Some(""), Some("secret")).is_none());
        let creds = Credentials::resolve(Some(" "), Some(" key "), Some(" secret "));
        assert_eq!(
            creds,
            Some(Credentials::Consumer {
                key: "key".into(),
                secret: "secret".into()
            })
        );
    }

    #[test]
    fn test_credentials_debug_redacts_secrets() {
        let token = format!("{:?}", Credentials::Token("super-secret".into()));
        assert!(!token.contains("super-secret"));

        let consumer = format!(
            "{:?}",
            Credentials::Consumer {
                key: "ck".into(),
                secret: "cs-hidden".into()
            }
        );
        assert!(consumer.contains("ck"));
        assert!(!consumer.contains("cs-hidden"));
    }

    #[test]
    fn test_client_is_configured() {
        let unconfigured = DiscogsClient::new(ClientConfig::default()).unwrap();
        assert!(!unconfigured.is_configured());

        let configured = DiscogsClient::new(ClientConfig::default().with_token("t")).unwrap();
        assert!(configured.is_configured());

        let consumer =
            DiscogsClient::new(ClientConfig::default().with_consumer_credentials("k", "s")).unwrap();
        assert!(consumer.is_configured());
    }

    #[test]
    fn test_base_url_normalization() {
        let client = DiscogsClient::new(
            ClientConfig::default().with_base_url("https://api.example.com///"),
        )
        .unwrap();
        assert_eq!(client.base_url(), "https://api.example.com");
    }

    #[test]
    fn test_base_url_rejected() {
        for bad in ["", "api.discogs.com", "ftp://api.discogs.com"] {
            let result = DiscogsClient::new(ClientConfig::default().with_base_url(bad));
            assert!(matches!(result, Err(CatalogError::InvalidUrl(_))), "{bad}");
        }
    }

    #[test]
    fn test_upstream_message_from_json() {
        assert_eq!(upstream_message(r#"{"message": "not found"}"#), "not found");
    }

    #[test]
    fn test_upstream_message_fallback() {
        assert_eq!(upstream_message("<html>502</html>"), GENERIC_FAILURE);
        assert_eq!(upstream_message(r#"{"error": 1}"#), GENERIC_FAILURE);
        assert_eq!(upstream_message(""), GENERIC_FAILURE);
    }

    #[test]
    fn test_client_debug_hides_token() {
        let client = DiscogsClient::new(ClientConfig::default().with_token("hidden-token")).unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("DiscogsClient"));
        assert!(!debug.contains("hidden-token"));
    }
}
