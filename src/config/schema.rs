//! TOML configuration schema types for boardtop.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so a partial or empty file is valid.
//!
//! Duration fields hold human-readable strings (e.g. `"500ms"`, `"2s"`)
//! parsed by the `humantime` crate through the accessor methods.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration.
///
/// ```toml
/// [dashboard]
/// [logging]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Dashboard loop settings.
    pub dashboard: DashboardConfig,
    /// Log file settings.
    pub logging: LoggingConfig,
}

impl Config {
    /// Checks values that parse as TOML but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dashboard.interval()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// `[dashboard]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Redraw interval and input wait, e.g. `"500ms"`.
    pub interval: String,
    /// 1-based page shown first. Out-of-range values fall back to page 1.
    pub start_page: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            interval: "500ms".to_string(),
            start_page: 1,
        }
    }
}

impl DashboardConfig {
    /// Parsed redraw interval.
    pub fn interval(&self) -> Result<Duration, ConfigError> {
        parse_interval("dashboard.interval", &self.interval)
    }
}

/// Parses a positive humantime duration.
pub fn parse_interval(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidDuration {
        field,
        value: value.to_string(),
        message,
    };
    let interval = humantime::parse_duration(value).map_err(|e| invalid(e.to_string()))?;
    if interval.is_zero() {
        return Err(invalid("must be greater than zero".to_string()));
    }
    Ok(interval)
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// `[logging]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Logging verbosity.
    pub level: LogLevel,
    /// Path to the log file. Empty string means the XDG state directory.
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            file: String::new(),
        }
    }
}

impl LoggingConfig {
    /// Resolved log file path, with `~` expanded.
    pub fn file_path(&self) -> PathBuf {
        if self.file.is_empty() {
            xdg::log_path()
        } else {
            xdg::expand_tilde(&self.file)
        }
    }
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Filter directive for this level.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
