//! Logging initialization for boardtop.
//!
//! The dashboard owns the terminal, so the `tracing` subscriber writes to a
//! log file instead of stderr. Level filtering comes from the `BOARDTOP_LOG`
//! environment variable when set, else from the configured level.
//!
//! ```bash
//! # Debug level for this crate only
//! BOARDTOP_LOG=boardtop=debug boardtop
//! ```

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing::Subscriber;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogLevel;
use crate::config::xdg;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "BOARDTOP_LOG";

/// Errors raised while setting up logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log file could not be created or opened.
    #[error("Failed to open log file: {path}")]
    Open {
        /// Log file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A global subscriber was already installed.
    #[error("Failed to install log subscriber: {0}")]
    Install(String),
}

/// Filter from [`LOG_ENV`], falling back to `level` when unset or invalid.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Opens `path` for appending, creating it and its directory as needed.
pub fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    let open_error = |source| LoggingError::Open {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty() && !p.exists())
    {
        xdg::ensure_dir(parent).map_err(open_error)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(open_error)
}

/// Builds the file subscriber without installing it.
pub fn subscriber(filter: EnvFilter, file: File) -> impl Subscriber + Send + Sync {
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish()
}

/// Installs the global subscriber writing to `path`.
///
/// Call once, before the terminal is taken over.
pub fn init(level: LogLevel, path: &Path) -> Result<(), LoggingError> {
    let file = open_log_file(path)?;
    tracing::subscriber::set_global_default(subscriber(env_filter(level), file))
        .map_err(|e| LoggingError::Install(e.to_string()))?;
    tracing::debug!("logging to {}", path.display());
    Ok(())
}
