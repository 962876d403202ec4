//! Screen abstraction used by the dashboard.
//!
//! [`Screen`] is the small cursor-addressed surface the controller and pages draw
//! through: styled text at a (row, column) position, erase and flush, a
//! single-key read bounded by an armed timeout, and terminal mode control.
//! [`TerminalScreen`] implements it on top of a ratatui [`Terminal`] for the
//! frame buffer and a [`Console`] for input and terminal modes.
//!
//! [`Terminal`]: ratatui::Terminal

mod console;
mod palette;
mod terminal;

pub use console::{restore_terminal, Console, CrosstermConsole, ScriptedConsole};
pub use palette::{ColorPair, Palette};
pub use terminal::TerminalScreen;

use ratatui::layout::Size;
use ratatui::style::Style;
use std::io;
use std::time::Duration;
use thiserror::Error;

/// A decoded key press.
///
/// Alt+<char> is never represented directly: like a terminal, the console
/// delivers it as [`Key::Esc`] followed by the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Escape byte.
    Esc,
    /// Enter / Return.
    Enter,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Function key F1..F12.
    F(u8),
    /// A printable character.
    Char(char),
}

impl Key {
    /// Returns the digit value for `'0'..='9'`, `None` for anything else.
    pub fn digit(self) -> Option<usize> {
        match self {
            Key::Char(c) => c.to_digit(10).map(|d| d as usize),
            _ => None,
        }
    }
}

/// Errors raised by screen operations.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// A write started outside the current screen area.
    #[error("write at row {row}, column {col} is outside the screen")]
    OutOfBounds {
        /// Target row.
        row: u16,
        /// Target column.
        col: u16,
    },

    /// The terminal was resized between composing and flushing a frame.
    #[error("terminal resized while drawing")]
    Resized,

    /// Terminal I/O failed.
    #[error("terminal I/O failed")]
    Io(#[from] io::Error),
}

impl ScreenError {
    /// Returns `true` for failures caused by a resize race, which only spoil
    /// the current frame.
    pub fn is_transient(&self) -> bool {
        matches!(self, ScreenError::OutOfBounds { .. } | ScreenError::Resized)
    }
}

/// Cursor-addressed drawing surface with raw key input.
pub trait Screen {
    /// Current terminal size.
    fn size(&self) -> Size;

    /// Writes `text` at (`row`, `col`), clipped at the right edge.
    fn put_str(&mut self, row: u16, col: u16, text: &str, style: Style)
        -> Result<(), ScreenError>;

    /// Clears the pending frame.
    fn erase(&mut self);

    /// Flushes the pending frame to the terminal.
    fn refresh(&mut self) -> Result<(), ScreenError>;

    /// Sets how long [`Screen::read_key`] waits for input.
    fn set_timeout(&mut self, timeout: Duration);

    /// Reads one key, waiting at most the armed timeout. `None` means no input.
    fn read_key(&mut self) -> Result<Option<Key>, ScreenError>;

    /// Reads one key without waiting.
    fn try_read_key(&mut self) -> Result<Option<Key>, ScreenError>;

    /// Sets the terminal window title. Best-effort.
    fn set_title(&mut self, title: &str);

    /// Switches to raw, no-echo input with a hidden cursor.
    fn prepare_input(&mut self) -> Result<(), ScreenError>;

    /// Restores echo, line buffering and the cursor.
    fn restore(&mut self) -> Result<(), ScreenError>;
}
