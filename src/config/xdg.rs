//! XDG path resolution for boardtop.
//!
//! - Config: `$XDG_CONFIG_HOME/boardtop` or `~/.config/boardtop`
//! - State (log file): `$XDG_STATE_HOME/boardtop` or `~/.local/state/boardtop`

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "boardtop";

/// Returns the configuration directory.
///
/// `$XDG_CONFIG_HOME/boardtop` when the variable is set, otherwise
/// `~/.config/boardtop`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    home_dir().join(".config").join(APP_NAME)
}

/// Returns the path to the main configuration file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the state directory, where the log file lives by default.
pub fn state_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    home_dir().join(".local/state").join(APP_NAME)
}

/// Returns the default log file path.
pub fn log_path() -> PathBuf {
    state_dir().join(format!("{APP_NAME}.log"))
}

/// Home directory, or the working directory when it cannot be determined.
fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Expands a leading `~` in a path string to the user's home directory.
///
/// If the path does not start with `~`, it is returned as-is.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else if path == "~" {
        home_dir()
    } else {
        PathBuf::from(path)
    }
}

/// Creates a directory and all parent directories with mode 0700.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}
