use std::fmt;
use std::path::PathBuf;

use crate::error::ConfigError;

/// TMDB v3 API root.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
/// Log directive used when `CINEMANIA_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "cinemania=info";

pub const API_KEY_VAR: &str = "TMDB_API_KEY";
pub const BASE_URL_VAR: &str = "TMDB_BASE_URL";
pub const LOG_FILTER_VAR: &str = "CINEMANIA_LOG";
pub const LOG_FILE_VAR: &str = "CINEMANIA_LOG_FILE";

/// Runtime settings, read once at startup.
#[derive(Clone)]
pub struct Config {
    /// TMDB v3 API key, sent as the `api_key` query parameter.
    pub api_key: String,
    /// API root, e.g. `https://api.themoviedb.org/3`.
    pub base_url: String,
    /// `tracing` env-filter directive.
    pub log_filter: String,
    /// Explicit log file location; `None` means the platform default.
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Build a config with the given key and default everything else.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_file: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Read the config from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the config through `lookup`, which maps a variable name to its
    /// value. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::MissingApiKey)?;
        let mut config = Self::new(api_key);
        if let Some(url) = get(BASE_URL_VAR) {
            config.base_url = url;
        }
        if let Some(filter) = get(LOG_FILTER_VAR) {
            config.log_filter = filter;
        }
        config.log_file = get(LOG_FILE_VAR).map(PathBuf::from);
        Ok(config)
    }

    /// Where log output goes: the explicit path, or
    /// `<data-local dir>/cinemania/cinemania.log`.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::data_local_dir().map(|dir| dir.join("cinemania").join("cinemania.log"))
        })
    }
}

// Keep the key out of logs and panic messages.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("log_filter", &self.log_filter)
            .field("log_file", &self.log_file)
            .finish()
    }
}
