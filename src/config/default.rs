//! Default configuration template and file creation.
//!
//! The template is commented TOML that parses to exactly `Config::default()`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

/// Commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# boardtop configuration
#
# This file was generated with the built-in defaults.
# Command-line flags override the values below.
#
# Location: $XDG_CONFIG_HOME/boardtop/config.toml

# ==============================================================================
# Dashboard
# ==============================================================================

[dashboard]

# Redraw interval as a human-readable duration.
# Also the longest time a key read waits, so it bounds how quickly the
# dashboard notices a termination signal.
# Examples: "250ms", "500ms", "1s"
interval = "500ms"

# Page shown at startup, 1-based.
# Values outside the registered pages fall back to the first page.
start_page = 1

# ==============================================================================
# Logging
# ==============================================================================

[logging]

# Logging verbosity.
# Options: "error", "warn", "info", "debug", "trace"
# The BOARDTOP_LOG environment variable overrides this with a full filter,
# e.g. BOARDTOP_LOG=boardtop=debug
level = "info"

# Path to the log file. The dashboard owns the terminal, so logs never go to
# stdout or stderr.
# Empty string means $XDG_STATE_HOME/boardtop/boardtop.log
# Tilde (~) is expanded to the user's home directory.
file = ""
"#;

/// Creates (or force-overwrites) the default config file at the XDG path.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
/// - Returns the path where the config was written.
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();
    write_template(&path, force)?;
    Ok(path)
}

/// Writes the template to `path` with the same backup rules as
/// [`create_default_config`].
pub fn write_template(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    let write_error = |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        xdg::ensure_dir(parent).map_err(write_error)?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_error)?;
    }

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
