use std::path::PathBuf;

use thiserror::Error;

/// Error type for movie API operations.
///
/// - `RequestFailed` — network/transport errors (wraps `reqwest::Error`)
/// - `Authentication` — HTTP 401, usually a bad API key
/// - `NotFound` — HTTP 404
/// - `Api` — any other non-2xx status code
/// - `Decode` — a 2xx body that is not the expected JSON shape
#[derive(Debug, Error)]
pub enum MovieApiError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MovieApiError>;

/// Errors raised while loading configuration or setting up logging.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TMDB_API_KEY is not set; export your TMDB API key before starting")]
    MissingApiKey,

    #[error("Cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid log filter: {0}")]
    LogFilter(String),
}
