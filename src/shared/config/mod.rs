//! Application configuration module
//!
//! Provides configuration types for the widget: which Grist document and table
//! to talk to, how columns are mapped, and the controller/sanitizer options.
//!
//! Values come from defaults, then an optional TOML file, then environment
//! overrides (see [`AppConfig::apply_env`]).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::record::ColumnMapping;

/// Default Grist server (self-hosted default port)
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8484";

/// Default tracing filter
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Grist server URL
    pub server_url: String,
    /// Document id (`/api/docs/<doc_id>`)
    pub doc_id: Option<String>,
    /// Table holding the URL/Content columns
    pub table_id: Option<String>,
    /// API key sent as a bearer token
    pub api_key: Option<String>,
    /// Logical column -> actual column id
    pub columns: BTreeMap<String, String>,
    /// Fetch as soon as the active record changes
    pub auto_fetch: bool,
    /// Deadline for fetching a page, in seconds
    pub fetch_timeout_secs: Option<u64>,
    /// Extra HTML tags the sanitizer keeps
    pub allowed_tags: Vec<String>,
    /// Extra HTML attributes the sanitizer keeps
    pub allowed_attributes: Vec<String>,
    /// tracing filter used when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            doc_id: None,
            table_id: None,
            api_key: None,
            columns: BTreeMap::new(),
            auto_fetch: false,
            fetch_timeout_secs: None,
            allowed_tags: Vec::new(),
            allowed_attributes: Vec::new(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(source)?;
        check_server_url(&config.server_url)?;
        Ok(config)
    }

    /// Read a TOML configuration file
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Apply environment overrides through `lookup` (normally `std::env::var`)
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("GRIST_SERVER_URL") {
            check_server_url(&url)?;
            self.server_url = url;
        }
        if let Some(doc_id) = lookup("GRIST_DOC_ID") {
            self.doc_id = Some(doc_id);
        }
        if let Some(table_id) = lookup("GRIST_TABLE_ID") {
            self.table_id = Some(table_id);
        }
        if let Some(api_key) = lookup("GRIST_API_KEY") {
            self.api_key = Some(api_key);
        }
        if let Some(value) = lookup("GRISTFETCH_AUTO_FETCH") {
            self.auto_fetch = parse_flag("GRISTFETCH_AUTO_FETCH", &value)?;
        }
        if let Some(value) = lookup("GRISTFETCH_FETCH_TIMEOUT_SECS") {
            let secs = value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: "GRISTFETCH_FETCH_TIMEOUT_SECS",
                value: value.clone(),
            })?;
            self.fetch_timeout_secs = Some(secs);
        }
        Ok(())
    }

    /// Validate the configuration for talking to a document
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_server_url(&self.server_url)?;
        if self.doc_id.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingValue("doc_id"));
        }
        if self.table_id.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingValue("table_id"));
        }
        Ok(())
    }

    /// Full URL for a document API path such as `/tables/Pages/records`
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/api/docs/{}{}",
            self.server_url.trim_end_matches('/'),
            self.doc_id.as_deref().unwrap_or_default(),
            path
        )
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }

    /// Column mapping for the configured table, if a table is configured
    pub fn column_mapping(&self) -> Option<ColumnMapping> {
        let table_id = self.table_id.clone()?;
        Some(ColumnMapping {
            table_id,
            columns: self.columns.clone(),
        })
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.config.server_url = url.into();
        self
    }

    pub fn doc_id(mut self, doc_id: impl Into<String>) -> Self {
        self.config.doc_id = Some(doc_id.into());
        self
    }

    pub fn table_id(mut self, table_id: impl Into<String>) -> Self {
        self.config.table_id = Some(table_id.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(api_key.into());
        self
    }

    /// Map a logical column to an actual column id
    pub fn column(mut self, logical: impl Into<String>, actual: impl Into<String>) -> Self {
        self.config.columns.insert(logical.into(), actual.into());
        self
    }

    pub fn auto_fetch(mut self, enabled: bool) -> Self {
        self.config.auto_fetch = enabled;
        self
    }

    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.config.fetch_timeout_secs = Some(secs);
        self
    }

    pub fn allow_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.allowed_tags.push(tag.into());
        self
    }

    pub fn allow_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.config.allowed_attributes.push(attribute.into());
        self
    }

    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.log_filter = filter.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        check_server_url(&self.config.server_url)?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

fn check_server_url(url: &str) -> Result<(), ConfigError> {
    match reqwest::Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(ConfigError::InvalidUrl(url.to_string())),
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}
