use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use spindle_core::StoredCredentials;

use crate::client::{ClientConfig, Credentials, DISCOGS_API_BASE};

/// Configuration for spindle.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Credentials saved with `spindle credentials` (catalog credentials only)
/// 3. Environment variables (SPINDLE_* prefix)
/// 4. Config file (~/.config/spindle/config.toml)
/// 5. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Discogs personal access token.
    ///
    /// Can be set via:
    /// - ENV: SPINDLE_DISCOGS_TOKEN
    /// - Config: discogs_token = "..."
    #[serde(default)]
    pub discogs_token: Option<String>,

    /// Discogs consumer key. Only used together with the secret.
    ///
    /// Can be set via:
    /// - ENV: SPINDLE_DISCOGS_CONSUMER_KEY
    /// - Config: discogs_consumer_key = "..."
    #[serde(default)]
    pub discogs_consumer_key: Option<String>,

    /// Discogs consumer secret. Only used together with the key.
    ///
    /// Can be set via:
    /// - ENV: SPINDLE_DISCOGS_CONSUMER_SECRET
    /// - Config: discogs_consumer_secret = "..."
    #[serde(default)]
    pub discogs_consumer_secret: Option<String>,

    /// Base URL of the Discogs API.
    #[serde(default = "default_base_url")]
    pub discogs_base_url: String,

    /// Path to the SQLite database holding the collection.
    ///
    /// Can be set via:
    /// - CLI: --db /path/to/db
    /// - ENV: SPINDLE_DATABASE_PATH
    /// - Config: database_path = "/path/to/db"
    /// - Default: ~/.local/share/spindle/spindle.db
    #[serde(default = "default_db_path")]
    pub database_path: PathBuf,

    /// Token passed with `--token`; beats every other source.
    #[serde(skip)]
    pub cli_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discogs_token: None,
            discogs_consumer_key: None,
            discogs_consumer_secret: None,
            discogs_base_url: default_base_url(),
            database_path: default_db_path(),
            cli_token: None,
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/spindle/config.toml
    /// Reads environment variables with SPINDLE_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new()
            .context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path.to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder.add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("spindle");
        builder.add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration with custom database path.
    ///
    /// This is used when the --db CLI flag is provided.
    pub fn load_with_db_path(db_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.database_path = db_path;
        Ok(config)
    }

    /// Resolve the catalog credentials.
    ///
    /// A `--token` wins outright. Otherwise saved values are preferred,
    /// each falling back to the configured one on its own;
    /// [`Credentials::resolve`] then applies token-over-pair precedence.
    #[must_use]
    pub fn credentials(&self, stored: &StoredCredentials) -> Option<Credentials> {
        let cli_token = self
            .cli_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        if let Some(token) = cli_token {
            return Some(Credentials::Token(token.to_string()));
        }

        Credentials::resolve(
            stored.token.as_deref().or(self.discogs_token.as_deref()),
            stored
                .consumer_key
                .as_deref()
                .or(self.discogs_consumer_key.as_deref()),
            stored
                .consumer_secret
                .as_deref()
                .or(self.discogs_consumer_secret.as_deref()),
        )
    }

    /// Build the catalog client configuration.
    #[must_use]
    pub fn client_config(&self, stored: &StoredCredentials) -> ClientConfig {
        ClientConfig::new(self.credentials(stored)).with_base_url(self.discogs_base_url.clone())
    }

    /// This configuration as TOML, with secrets masked.
    pub fn to_redacted_toml(&self) -> Result<String> {
        let mut shown = self.clone();
        for secret in [
            &mut shown.discogs_token,
            &mut shown.discogs_consumer_key,
            &mut shown.discogs_consumer_secret,
        ] {
            if let Some(value) = secret.as_mut() {
                *value = mask(value);
            }
        }
        toml::to_string_pretty(&shown).context("Failed to render configuration")
    }
}

/// Keep the last four characters of a secret.
pub fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

fn default_base_url() -> String {
    DISCOGS_API_BASE.to_string()
}

/// Get the default database path.
///
/// Returns: ~/.local/share/spindle/spindle.db (or platform equivalent)
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spindle")
        .join("spindle.db")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/spindle/config.toml
/// - macOS: ~/Library/Application Support/spindle/config.toml
/// - Windows: %APPDATA%\spindle\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spindle")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Spindle Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Credentials saved with `spindle credentials`
# 3. Environment variables (SPINDLE_* prefix)
# 4. This config file
# 5. Built-in defaults (lowest priority)

# Discogs authentication: EITHER a personal access token...
#
# Generate one at: https://www.discogs.com/settings/developers
#
# Can also be set via:
# - Environment: SPINDLE_DISCOGS_TOKEN=your-token-here
#discogs_token = "your-personal-access-token"

# ...OR a consumer key/secret pair (both are required).
# A token, when present, takes precedence.
#discogs_consumer_key = "your-consumer-key"
#discogs_consumer_secret = "your-consumer-secret"

# Discogs API base URL
#discogs_base_url = "https://api.discogs.com"

# Path to the SQLite database holding your collection
#
# Can also be set via:
# - CLI: spindle --db /custom/path.db list
# - Environment: SPINDLE_DATABASE_PATH=/custom/path.db
#
# Default: Platform-specific data directory
#database_path = "/path/to/custom/spindle.db"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config())
        .context("Failed to write config file")?;

    Ok(true)
}
