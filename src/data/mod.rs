//! Status data consumed by dashboard pages.
//!
//! Pages only ever read through [`DataSource`]. Every field except the
//! privilege flag may be absent, and pages render a placeholder when it is.

mod system;

pub use system::SystemSource;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Read-only view of the monitored board.
pub trait DataSource {
    /// `true` when the dashboard runs with elevated privileges.
    fn is_elevated(&self) -> bool;

    /// Time since the board booted.
    fn uptime(&self) -> Option<Duration>;

    /// Static board and software metadata.
    fn board(&self) -> Option<&BoardInfo>;

    /// Hostname and local network interfaces.
    fn local_interfaces(&self) -> Option<&LocalInterfaces>;

    /// Version of the monitoring software.
    fn version(&self) -> Option<&str>;
}

/// Static metadata about the board and the software it runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardInfo {
    /// Device identifier, e.g. the model string from the device tree.
    pub machine: Option<String>,
    /// Software release installed on the board.
    pub software: Option<String>,
    /// Labeled hardware fields.
    pub hardware: BTreeMap<String, String>,
    /// Labeled library versions.
    pub libraries: BTreeMap<String, String>,
}

/// Hostname plus interface name to address mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalInterfaces {
    /// Host name.
    pub hostname: Option<String>,
    /// Interface name to address.
    pub interfaces: BTreeMap<String, String>,
}

/// A fixed set of status values.
///
/// Loadable from JSON so a captured snapshot can be replayed without the
/// board:
///
/// ```json
/// {
///   "elevated": false,
///   "uptime_secs": 93784,
///   "board": { "machine": "Jetson Nano", "software": "Jetpack 4.6" },
///   "version": "3.1.0"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Privilege flag.
    pub elevated: bool,
    /// Uptime in whole seconds.
    pub uptime_secs: Option<u64>,
    /// Board metadata.
    pub board: Option<BoardInfo>,
    /// Network listing.
    pub local_interfaces: Option<LocalInterfaces>,
    /// Monitoring software version.
    pub version: Option<String>,
}

/// Errors raised while loading a snapshot file.
#[derive(Debug, Error)]
pub enum DataError {
    /// The file could not be read.
    #[error("Failed to read snapshot file: {path}")]
    ReadError {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid snapshot.
    #[error("Invalid snapshot at {path}")]
    ParseError {
        /// Path of the invalid file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl Snapshot {
    /// Loads a snapshot from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path).map_err(|e| DataError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| DataError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

impl DataSource for Snapshot {
    fn is_elevated(&self) -> bool {
        self.elevated
    }

    fn uptime(&self) -> Option<Duration> {
        self.uptime_secs.map(Duration::from_secs)
    }

    fn board(&self) -> Option<&BoardInfo> {
        self.board.as_ref()
    }

    fn local_interfaces(&self) -> Option<&LocalInterfaces> {
        self.local_interfaces.as_ref()
    }

    fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}
