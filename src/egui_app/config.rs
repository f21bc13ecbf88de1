use std::path::{Path, PathBuf};

use crate::shared::config::{AppConfig, ConfigError};

/// Environment variable pointing at an explicit config file
pub const CONFIG_PATH_VAR: &str = "GRISTFETCH_CONFIG";

/// Application configuration wrapper.
///
/// Remembers which file (if any) the settings came from so the UI can show it.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
    source: Option<PathBuf>,
}

impl Config {
    /// Load from the default locations and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from);
        Self::load_from(explicit.as_deref(), default_path().as_deref(), |key| {
            std::env::var(key).ok()
        })
    }

    /// Load from `explicit` (must exist) or `fallback` (optional), then apply
    /// environment overrides through `lookup`.
    pub fn load_from<F>(
        explicit: Option<&Path>,
        fallback: Option<&Path>,
        lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (mut app, source) = match (explicit, fallback) {
            (Some(path), _) => (AppConfig::load_file(path)?, Some(path.to_path_buf())),
            (None, Some(path)) if path.exists() => {
                (AppConfig::load_file(path)?, Some(path.to_path_buf()))
            }
            _ => (AppConfig::default(), None),
        };
        app.apply_env(lookup)?;
        Ok(Self { app, source })
    }

    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    /// File the configuration was read from
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Where the settings came from, for the startup log
    pub fn describe_source(&self) -> String {
        match &self.source {
            Some(path) => format!("Loaded configuration from {}", path.display()),
            None => "No configuration file, using defaults and environment".to_string(),
        }
    }
}

/// `<config_dir>/gristfetch/config.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gristfetch").join("config.toml"))
}
