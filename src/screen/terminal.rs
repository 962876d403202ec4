//! [`Screen`] implementation over a ratatui terminal.
//!
//! Writes land in an off-screen [`Buffer`]; `refresh` hands that buffer to
//! [`Terminal::draw`], which diffs it against the previous frame so only
//! changed cells reach the terminal.

use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Rect, Size};
use ratatui::style::Style;
use ratatui::Terminal;

use super::{Console, Key, Screen, ScreenError};

/// A ratatui terminal paired with a key console.
pub struct TerminalScreen<B: Backend, C: Console> {
    terminal: Terminal<B>,
    console: C,
    frame: Buffer,
    timeout: Duration,
    prepared: bool,
}

impl<B: Backend, C: Console> TerminalScreen<B, C> {
    /// Wraps `backend` and `console`. The input timeout starts at zero, so
    /// reads do not block until the first frame arms it.
    pub fn new(backend: B, console: C) -> Result<Self, ScreenError> {
        let terminal = Terminal::new(backend)?;
        let size = terminal.size()?;
        Ok(Self {
            terminal,
            console,
            frame: Buffer::empty(Rect::new(0, 0, size.width, size.height)),
            timeout: Duration::ZERO,
            prepared: false,
        })
    }

    /// The underlying ratatui terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Mutable access to the underlying ratatui terminal.
    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    /// The key console.
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Mutable access to the key console.
    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// The currently armed input timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<B: Backend, C: Console> Screen for TerminalScreen<B, C> {
    fn size(&self) -> Size {
        self.terminal
            .size()
            .unwrap_or(Size {
                width: self.frame.area.width,
                height: self.frame.area.height,
            })
    }

    fn put_str(
        &mut self,
        row: u16,
        col: u16,
        text: &str,
        style: Style,
    ) -> Result<(), ScreenError> {
        let area = self.frame.area;
        if row >= area.height || col >= area.width {
            return Err(ScreenError::OutOfBounds { row, col });
        }
        self.frame
            .set_stringn(col, row, text, usize::from(area.width - col), style);
        Ok(())
    }

    fn erase(&mut self) {
        let size = self.size();
        self.frame = Buffer::empty(Rect::new(0, 0, size.width, size.height));
    }

    fn refresh(&mut self) -> Result<(), ScreenError> {
        let frame = &self.frame;
        let mut stale = false;
        self.terminal.draw(|f| {
            if f.area() == frame.area {
                f.buffer_mut().merge(frame);
            } else {
                stale = true;
            }
        })?;
        if stale {
            return Err(ScreenError::Resized);
        }
        Ok(())
    }

    fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    fn read_key(&mut self) -> Result<Option<Key>, ScreenError> {
        Ok(self.console.read(self.timeout)?)
    }

    fn try_read_key(&mut self) -> Result<Option<Key>, ScreenError> {
        Ok(self.console.read(Duration::ZERO)?)
    }

    fn set_title(&mut self, title: &str) {
        if let Err(e) = self.console.set_title(title) {
            tracing::debug!("could not set window title: {}", e);
        }
    }

    fn prepare_input(&mut self) -> Result<(), ScreenError> {
        // Marked first so a half-applied setup still gets undone
        self.prepared = true;
        self.console.enter()?;
        if let Err(e) = self.console.hide_cursor() {
            tracing::debug!("could not hide cursor: {}", e);
        }
        Ok(())
    }

    fn restore(&mut self) -> Result<(), ScreenError> {
        if self.prepared {
            self.prepared = false;
            self.console.leave()?;
        }
        Ok(())
    }
}

impl<B: Backend, C: Console> Drop for TerminalScreen<B, C> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::warn!("failed to restore terminal: {}", e);
        }
    }
}
