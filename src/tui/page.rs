//! The page contract.
//!
//! A page paints one screenful between the header and the footer menu and may
//! react to keys the controller does not bind globally.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use ratatui::layout::Size;

use crate::data::DataSource;
use crate::screen::{Key, Palette, Screen, ScreenError};

/// Shared inputs handed to every page at construction.
#[derive(Clone)]
pub struct PageContext {
    /// The status source, read-only.
    pub data: Rc<dyn DataSource>,
    /// Configured redraw interval.
    pub interval: Duration,
    /// Color pairs.
    pub palette: Palette,
}

impl fmt::Debug for PageContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageContext")
            .field("interval", &self.interval)
            .field("palette", &self.palette)
            .finish_non_exhaustive()
    }
}

/// Usable page area for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageArea {
    /// Rows from `first` to the bottom of the terminal.
    pub height: u16,
    /// Terminal width.
    pub width: u16,
    /// Row of the title line: 1 below the privilege banner, 0 without it.
    pub first: u16,
}

impl PageArea {
    /// Derives the area from the terminal size and the privilege flag.
    pub fn measure(size: Size, elevated: bool) -> Self {
        let first = u16::from(!elevated);
        Self {
            height: size.height.saturating_sub(first),
            width: size.width,
            first,
        }
    }

    /// Row of the footer menu. Page content stays above it.
    pub fn bottom(&self) -> u16 {
        (self.first + self.height).saturating_sub(1)
    }
}

/// One selectable full-screen view.
pub trait Page {
    /// Display name, unique within a controller.
    fn name(&self) -> &str;

    /// Construction inputs.
    fn context(&self) -> &PageContext;

    /// Paints the page body. `key` is the key read this iteration.
    ///
    /// Must not assume a fixed size and must not fail on absent data.
    fn draw(&mut self, screen: &mut dyn Screen, key: Option<Key>) -> Result<(), ScreenError>;

    /// Reacts to a key the controller did not consume.
    fn keyboard(&mut self, _key: Key) {}

    /// Height, width and first row for the current frame.
    fn size_page(&self, screen: &dyn Screen) -> PageArea {
        PageArea::measure(screen.size(), self.context().data.is_elevated())
    }
}

/// Builds one page from the shared context.
pub type PageFactory = Box<dyn FnOnce(PageContext) -> Box<dyn Page>>;
