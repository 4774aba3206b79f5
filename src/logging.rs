//! File-backed `tracing` setup.
//!
//! The terminal belongs to the UI while it runs, so diagnostics go to a log
//! file instead of stderr.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::ConfigError;

/// Install the global subscriber. Returns the path being written to, or
/// `None` when logging is off: no log location could be determined, or the
/// log file could not be opened (a warning goes to stderr).
///
/// Only an invalid filter directive is an error.
pub fn init(config: &Config) -> Result<Option<PathBuf>, ConfigError> {
    let filter = EnvFilter::try_new(&config.log_filter)
        .map_err(|e| ConfigError::LogFilter(e.to_string()))?;

    let Some(path) = config.log_path() else {
        return Ok(None);
    };

    let file = match open_log_file(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("warning: {e}; continuing without a log file");
            return Ok(None);
        }
    };

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init();

    Ok(Some(path))
}

fn open_log_file(path: &Path) -> Result<File, ConfigError> {
    let log_file_error = |source| ConfigError::LogFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(log_file_error)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(log_file_error)
}
