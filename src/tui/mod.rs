//! TUI module for boardtop.
//!
//! The controller owns an ordered set of pages and one screen. Each loop
//! iteration reads a key, dispatches it, and runs the size-guarded draw pass
//! that paints header, active page and footer menu.

pub mod app;
pub mod event;
pub mod page;
pub mod ui;
pub mod views;

#[cfg(test)]
pub(crate) mod test_utils;
