//! Tagging configuration
//!
//! Loaded from TOML, then overridden from the environment:
//!
//! ```toml
//! taxonomy_path = "taxonomy.json"
//! log_filter = "info"
//! log_json = false
//!
//! [publishing_api]
//! base_url = "http://publishing-api.dev.gov.uk"
//! bearer_token = "..."
//! timeout_secs = 10
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tagging_links::PublishingApiConfig;
use url::Url;

/// Overrides `publishing_api.base_url`
pub const ENV_PUBLISHING_API_URL: &str = "TAGGING_PUBLISHING_API_URL";
/// Overrides `publishing_api.bearer_token`
pub const ENV_PUBLISHING_API_BEARER_TOKEN: &str = "TAGGING_PUBLISHING_API_BEARER_TOKEN";
/// Overrides `taxonomy_path`
pub const ENV_TAXONOMY_PATH: &str = "TAGGING_TAXONOMY_PATH";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Tagging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggingConfig {
    /// Publishing API connection
    pub publishing_api: PublishingApiConfig,
    /// Taxonomy snapshot file
    pub taxonomy_path: PathBuf,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
    /// Emit logs as JSON
    pub log_json: bool,
}

impl TaggingConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// `Parse` if the text is not valid for this schema.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read configuration from a TOML file
    ///
    /// # Errors
    /// `Io` if the file cannot be read, `Parse` if it is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Apply overrides from the process environment
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    #[must_use]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_PUBLISHING_API_URL) {
            self.publishing_api.base_url = url;
        }
        if let Some(token) = lookup(ENV_PUBLISHING_API_BEARER_TOKEN) {
            self.publishing_api.bearer_token = Some(token);
        }
        if let Some(path) = lookup(ENV_TAXONOMY_PATH) {
            self.taxonomy_path = PathBuf::from(path);
        }
        self
    }

    /// With publishing API settings
    #[inline]
    #[must_use]
    pub fn with_publishing_api(mut self, publishing_api: PublishingApiConfig) -> Self {
        self.publishing_api = publishing_api;
        self
    }

    /// With taxonomy snapshot path
    #[inline]
    #[must_use]
    pub fn with_taxonomy_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.taxonomy_path = path.into();
        self
    }

    /// Check values that serde cannot
    ///
    /// # Errors
    /// `Invalid` for an unusable base URL or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.publishing_api.base_url).map_err(|e| {
            ConfigError::Invalid(format!(
                "publishing_api.base_url {:?}: {e}",
                self.publishing_api.base_url
            ))
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::Invalid(format!(
                "publishing_api.base_url {:?} cannot carry a path",
                self.publishing_api.base_url
            )));
        }
        if self.publishing_api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "publishing_api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for TaggingConfig {
    fn default() -> Self {
        Self {
            publishing_api: PublishingApiConfig::default(),
            taxonomy_path: PathBuf::from("taxonomy.json"),
            log_filter: "info".to_string(),
            log_json: false,
        }
    }
}
