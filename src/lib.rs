//! boardtop library
//!
//! A terminal dashboard that shows one page of board status at a time and
//! routes keyboard input to the active page.
//!
//! # Layers
//!
//! - [`screen`]: cursor-addressed drawing and raw key input on top of
//!   ratatui and crossterm
//! - [`data`]: the read-only status source consumed by pages
//! - [`tui`]: the page contract, the controller loop, key dispatch and the
//!   size-guarded draw pass
//! - [`signal`]: the run flag cleared by termination signals
//!
//! # Platform Support
//!
//! Unix-like systems only. Signal interception relies on
//! `tokio::signal::unix`.

use std::time::Duration;

/// Configuration file schema, loading and XDG path resolution.
pub mod config;

/// Status data consumed by dashboard pages.
pub mod data;

/// Log file setup for the `tracing` subscriber.
pub mod logging;

/// Screen abstraction: styled text output, key input, terminal modes.
pub mod screen;

/// Run flag and termination signal listeners.
pub mod signal;

/// Dashboard controller, pages and rendering.
pub mod tui;

pub use data::{BoardInfo, DataSource, LocalInterfaces, Snapshot, SystemSource};
pub use screen::{Key, Screen, ScreenError};
pub use signal::RunFlag;
pub use tui::app::{Controller, ControllerBuilder, ControllerError, LoopState};
pub use tui::page::{Page, PageArea, PageContext, PageFactory};

/// Product name shown in the header and window title.
pub const PRODUCT_NAME: &str = "boardtop";

/// Crate version, reported by the built-in data source.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default redraw interval, also used as the input wait timeout.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Placeholder rendered wherever an optional data field is absent.
pub const NOT_AVAILABLE: &str = "N/A";
